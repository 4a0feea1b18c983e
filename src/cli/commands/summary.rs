use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{employees, summary};
use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeRef;
use crate::models::summary::DailySummary;
use crate::utils::date;

fn print_rows(rows: &[DailySummary]) {
    if rows.is_empty() {
        println!("No summaries.");
    }
    for s in rows {
        println!(
            "{}  employee {:>4}  distance {:>10}  odometer {} → {}  geofences {}",
            date::format_date(s.date),
            s.employee_id,
            s.total_distance,
            s.odometer_start,
            s.odometer_end,
            s.geofence_count
        );
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Summary {
        employee,
        date: day,
        since,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let conn = &pool.conn;

    if let Some(emp_ref) = employee {
        let emp = employees::require_employee(conn, &EmployeeRef::parse(emp_ref))?;
        let rows = summary::summaries_for_employee(conn, emp.id)?;
        print_rows(&rows);
        return Ok(());
    }

    if let Some(d) = day {
        let d = date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
        print_rows(&summary::summaries_for_date(conn, d)?);
        return Ok(());
    }

    if let Some(d) = since {
        let d = date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
        print_rows(&summary::summaries_since(conn, d)?);
        return Ok(());
    }

    // Default report: today, all employees
    print_rows(&summary::summaries_for_date(conn, date::today())?);

    Ok(())
}
