use crate::cli::parser::{AssignCmd, Commands};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{assignments, employees};
use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeRef;
use crate::ui::messages::success;
use crate::utils::date;
use chrono::NaiveDate;

fn resolve_date(opt: &Option<String>) -> AppResult<NaiveDate> {
    match opt {
        Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(date::today()),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Assign { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let conn = &pool.conn;

    match action {
        AssignCmd::Add {
            employee,
            geofence,
            date: day,
        } => {
            let emp = employees::require_employee(conn, &EmployeeRef::parse(employee))?;
            let day = resolve_date(day)?;
            let id = assignments::add_assignment(conn, emp.id, *geofence, day)?;
            success(format!(
                "Assignment {} created: employee {} → geofence {} on {}",
                id,
                emp.id,
                geofence,
                date::format_date(day)
            ));
        }

        AssignCmd::Del { id } => {
            assignments::delete_assignment(conn, *id)?;
            success(format!("Assignment {} deleted.", id));
        }

        AssignCmd::Targets {
            employee,
            date: day,
        } => {
            let emp = employees::require_employee(conn, &EmployeeRef::parse(employee))?;
            let day = resolve_date(day)?;
            let targets = assignments::targets_for(conn, emp.id, day)?;

            if targets.is_empty() {
                println!("No targets for {} on {}.", emp.name, date::format_date(day));
            }
            for t in targets {
                println!(
                    "{:>4}  {:<24} center ({}, {})  radius {} m",
                    t.geofence_id, t.geofence_name, t.center_lat, t.center_lng, t.radius_m
                );
            }
        }
    }

    Ok(())
}
