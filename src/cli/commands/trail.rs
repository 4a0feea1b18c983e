use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::trail;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Trail { session, live } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    if *live {
        match trail::last_point(&pool.conn, *session)? {
            Some(p) => println!("({}, {}) at {}", p.lat, p.lng, p.timestamp.to_rfc3339()),
            None => println!("No location data for session {}.", session),
        }
        return Ok(());
    }

    let points = trail::trail(&pool.conn, *session)?;
    if points.is_empty() {
        println!("No trail for session {}.", session);
    }
    for p in points {
        println!("({}, {}) at {}", p.lat, p.lng, p.timestamp.to_rfc3339());
    }

    Ok(())
}
