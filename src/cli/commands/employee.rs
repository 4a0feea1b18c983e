use crate::cli::parser::{Commands, EmployeeCmd};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{audit, employees};
use crate::errors::AppResult;
use crate::ui::messages::{detail, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        EmployeeCmd::Add { name, code } => {
            let id = employees::add_employee(conn, name, code)?;
            audit::audit(
                conn,
                "employee_add",
                &id.to_string(),
                &format!("employee '{}' ({})", name, code),
            )?;
            success(format!("Employee created: id {} ({} / {})", id, name, code));
        }

        EmployeeCmd::List => {
            let all = employees::list_employees(conn)?;
            if all.is_empty() {
                println!("No employees.");
            }
            for e in all {
                let home = match e.home() {
                    Some((c, r)) => format!("home ({}, {}) r={}m", c.lat, c.lng, r),
                    None => "home unset".to_string(),
                };
                println!(
                    "{:>4}  {:<20} {:<10} {:<8} {}",
                    e.id,
                    e.name,
                    e.code,
                    if e.is_active { "active" } else { "inactive" },
                    home
                );
            }
        }

        EmployeeCmd::Del { id } => {
            employees::delete_employee(conn, *id)?;
            audit::audit(conn, "employee_del", &id.to_string(), "employee deleted")?;
            success(format!("Employee {} deleted.", id));
        }

        EmployeeCmd::SetHome {
            id,
            lat,
            lng,
            radius_m,
        } => {
            employees::set_home(conn, *id, *lat, *lng, *radius_m)?;
            audit::audit(
                conn,
                "employee_home",
                &id.to_string(),
                &format!("home set to ({}, {}) r={}m", lat, lng, radius_m),
            )?;
            success(format!("Home geofence set for employee {}.", id));
            detail(format!("center ({}, {}), radius {} m", lat, lng, radius_m));
        }
    }

    Ok(())
}
