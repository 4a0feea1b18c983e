//! One inbound location event: update the session's last-known position,
//! maybe extend the trail, and evaluate every geofence for first entry.
//! The whole event runs in a single transaction so a failure leaves no
//! half-applied state; the client's next periodic send re-drives it.

use crate::db::{audit, geofences, sessions, trail};
use crate::errors::AppResult;
use crate::geo::{self, LatLng};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

/// What a single location event did.
#[derive(Debug, Clone)]
pub struct LocationOutcome {
    pub session_id: i64,
    /// Whether a throttled trail point was stored for this event.
    pub trail_logged: bool,
    /// Geofences completed for the first time by this event.
    pub newly_completed: Vec<i64>,
}

pub struct TrackLogic;

impl TrackLogic {
    /// Record one (session, lat, lng, timestamp) event.
    ///
    /// Closed sessions are still accepted: trailing updates from a client
    /// that checked out mid-transmission keep logging. The last-known
    /// position is last-write-wins with no ordering guard.
    pub fn record(
        conn: &mut Connection,
        session_id: i64,
        pos: LatLng,
        now: DateTime<Utc>,
        trail_interval_s: i64,
    ) -> AppResult<LocationOutcome> {
        let tx = conn.transaction()?;

        let session = sessions::require_session(&tx, session_id)?;

        sessions::update_last_position(&tx, session_id, pos)?;

        let trail_logged = trail::maybe_append(
            &tx,
            session_id,
            session.employee_id,
            pos,
            now,
            trail_interval_s,
        )?;

        // Geofence scan runs on every event, independent of the trail
        // throttle: detection is dense, storage is sparse.
        let mut newly_completed = Vec::new();
        for gf in geofences::list_geofences(&tx)? {
            if !geo::is_within(pos, gf.center(), gf.radius_m) {
                continue;
            }

            let first_entry = geofences::mark_completed_if_first(
                &tx,
                gf.id,
                session_id,
                session.employee_id,
                now,
            )?;

            if first_entry {
                // Entry points always make it into the trail so the path
                // shows the exact crossing.
                trail::insert_point(&tx, session_id, session.employee_id, pos, now)?;
                audit::audit(
                    &tx,
                    "geofence_entry",
                    &gf.id.to_string(),
                    &format!("session {} entered '{}'", session_id, gf.name),
                )?;
                newly_completed.push(gf.id);
            }
        }

        tx.commit()?;

        Ok(LocationOutcome {
            session_id,
            trail_logged,
            newly_completed,
        })
    }
}
