use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::track::TrackLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::geo::LatLng;
use crate::ui::messages::{detail, success};
use crate::utils::date;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Track {
        session,
        lat,
        lng,
        at,
    } = cmd
    else {
        return Ok(());
    };

    let now = match at {
        Some(s) => date::parse_ts(s)?,
        None => Utc::now(),
    };

    let mut pool = DbPool::new(&cfg.database)?;

    let outcome = TrackLogic::record(
        &mut pool.conn,
        *session,
        LatLng::new(*lat, *lng),
        now,
        cfg.trail_interval_s,
    )?;

    success(format!("Location recorded for session {}.", session));
    detail(format!(
        "trail point stored: {}",
        if outcome.trail_logged { "yes" } else { "no" }
    ));
    if outcome.newly_completed.is_empty() {
        detail("newly completed geofences: none");
    } else {
        let ids: Vec<String> = outcome
            .newly_completed
            .iter()
            .map(|id| id.to_string())
            .collect();
        detail(format!("newly completed geofences: {}", ids.join(", ")));
    }

    Ok(())
}
