use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{employees, geofences, sessions};
use crate::errors::AppResult;
use crate::models::employee::EmployeeRef;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Sessions {
        employee,
        session,
        geofences: show_geofences,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let conn = &pool.conn;

    let emp = employees::require_employee(conn, &EmployeeRef::parse(employee))?;

    if let Some(session_id) = session {
        let s = sessions::require_session(conn, *session_id)?;

        println!("Session {} (employee {})", s.id, s.employee_id);
        println!("  check-in : {}", s.check_in_time);
        println!(
            "  check-out: {}",
            s.check_out_time.as_deref().unwrap_or("open")
        );
        println!("  start    : ({}, {})", s.start_lat, s.start_lng);
        match s.end_pos() {
            Some(p) => println!("  last pos : ({}, {})", p.lat, p.lng),
            None => println!("  last pos : none"),
        }
        println!(
            "  odometer : {} → {}",
            s.odometer_start.unwrap_or(0.0),
            s.odometer_end.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
        );

        if *show_geofences {
            let statuses = geofences::statuses_for_session(conn, s.id)?;
            if statuses.is_empty() {
                println!("  geofences: none completed");
            }
            for st in statuses {
                println!(
                    "  geofence {}: completed at {}",
                    st.geofence_id,
                    st.completed_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "-".into())
                );
            }
        }
        return Ok(());
    }

    let all = sessions::list_sessions_by_employee(conn, emp.id)?;
    if all.is_empty() {
        println!("No sessions for {}.", emp.name);
    }
    for s in all {
        println!(
            "{:>4}  in {}  out {}",
            s.id,
            s.check_in_time,
            s.check_out_time.as_deref().unwrap_or("open")
        );
    }

    Ok(())
}
