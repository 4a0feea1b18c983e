use crate::db::conflict_on_unique;
use crate::errors::{AppError, AppResult};
use crate::geo::LatLng;
use crate::models::geofence::{Geofence, GeofenceStatus};
use crate::utils::date;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, Row, params};

pub(crate) fn row_to_geofence(row: &Row) -> Result<Geofence> {
    Ok(Geofence {
        id: row.get("id")?,
        name: row.get("name")?,
        center_lat: row.get("center_lat")?,
        center_lng: row.get("center_lng")?,
        radius_m: row.get("radius_m")?,
        created_at: row.get("created_at")?,
    })
}

fn row_to_status(row: &Row) -> Result<GeofenceStatus> {
    let completed_at: Option<String> = row.get("completed_at")?;
    let completed_at = match completed_at {
        Some(s) => Some(date::parse_ts(&s).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(GeofenceStatus {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        session_id: row.get("session_id")?,
        geofence_id: row.get("geofence_id")?,
        completed: row.get::<_, i64>("completed")? != 0,
        completed_at,
    })
}

/// Create a geofence. Centers are unique; a duplicate is surfaced as
/// `Conflict` (unlike status inserts, which absorb it).
pub fn add_geofence(
    conn: &Connection,
    name: &str,
    center: LatLng,
    radius_m: f64,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO geofences (name, center_lat, center_lng, radius_m, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, center.lat, center.lng, radius_m, Utc::now().to_rfc3339()],
    )
    .map_err(|e| {
        conflict_on_unique(
            e,
            &format!("a geofence already exists at ({}, {})", center.lat, center.lng),
        )
    })?;
    Ok(conn.last_insert_rowid())
}

pub fn list_geofences(conn: &Connection) -> AppResult<Vec<Geofence>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, center_lat, center_lng, radius_m, created_at \
         FROM geofences ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], row_to_geofence)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Delete a geofence and all of its completion statuses in one transaction.
pub fn delete_geofence(conn: &mut Connection, geofence_id: i64) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM geofence_status WHERE geofence_id = ?1",
        [geofence_id],
    )?;
    let changed = tx.execute("DELETE FROM geofences WHERE id = ?1", [geofence_id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("geofence {}", geofence_id)));
    }

    tx.commit()?;
    Ok(())
}

/// Record first entry into a geofence for a session. The UNIQUE constraint
/// on (session_id, geofence_id) plus OR IGNORE makes this at-most-once under
/// concurrent duplicate evaluations: exactly one row survives and neither
/// caller sees an error. Returns true when this call inserted the row.
pub fn mark_completed_if_first(
    conn: &Connection,
    geofence_id: i64,
    session_id: i64,
    employee_id: i64,
    now: DateTime<Utc>,
) -> AppResult<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO geofence_status \
         (employee_id, session_id, geofence_id, completed, completed_at) \
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![employee_id, session_id, geofence_id, now.to_rfc3339()],
    )?;
    Ok(inserted == 1)
}

/// Number of completed geofences for a session.
pub fn count_completed(conn: &Connection, session_id: i64) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "SELECT COUNT(*) FROM geofence_status WHERE session_id = ?1 AND completed = 1",
    )?;
    let n: i64 = stmt.query_row([session_id], |r| r.get(0))?;
    Ok(n)
}

/// All completion statuses of a session.
pub fn statuses_for_session(conn: &Connection, session_id: i64) -> AppResult<Vec<GeofenceStatus>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, employee_id, session_id, geofence_id, completed, completed_at \
         FROM geofence_status WHERE session_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([session_id], row_to_status)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
