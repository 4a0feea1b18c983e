use crate::errors::AppResult;
use crate::geo::LatLng;
use crate::models::trail_point::TrailPoint;
use crate::utils::date;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, Row, params};

fn row_to_point(row: &Row) -> Result<TrailPoint> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = date::parse_ts(&ts_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(TrailPoint {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        employee_id: row.get("employee_id")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        timestamp,
    })
}

const POINT_COLS: &str = "id, session_id, employee_id, lat, lng, timestamp";

/// The most recent trail point of a session, if any.
pub fn last_point(conn: &Connection, session_id: i64) -> AppResult<Option<TrailPoint>> {
    let sql = format!(
        "SELECT {} FROM trail_points WHERE session_id = ?1 \
         ORDER BY timestamp DESC, id DESC LIMIT 1",
        POINT_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    match stmt.query_row([session_id], row_to_point) {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Append a trail point unconditionally. Used for geofence entry points,
/// which bypass the interval throttle.
pub fn insert_point(
    conn: &Connection,
    session_id: i64,
    employee_id: i64,
    pos: LatLng,
    ts: DateTime<Utc>,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO trail_points (session_id, employee_id, lat, lng, timestamp) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![session_id, employee_id, pos.lat, pos.lng, ts.to_rfc3339()],
    )?;
    Ok(())
}

/// Append a trail point only if the session has none yet or the newest one
/// is at least `min_interval_s` old. Returns whether a point was stored.
/// The bound is a soft cap: concurrent sub-second events may occasionally
/// both pass the check, which is acceptable.
pub fn maybe_append(
    conn: &Connection,
    session_id: i64,
    employee_id: i64,
    pos: LatLng,
    now: DateTime<Utc>,
    min_interval_s: i64,
) -> AppResult<bool> {
    let due = match last_point(conn, session_id)? {
        None => true,
        Some(p) => (now - p.timestamp).num_seconds() >= min_interval_s,
    };

    if due {
        insert_point(conn, session_id, employee_id, pos, now)?;
    }
    Ok(due)
}

/// Full trail of a session, oldest point first.
pub fn trail(conn: &Connection, session_id: i64) -> AppResult<Vec<TrailPoint>> {
    let sql = format!(
        "SELECT {} FROM trail_points WHERE session_id = ?1 ORDER BY timestamp ASC, id ASC",
        POINT_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([session_id], row_to_point)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Retention sweep: delete every point strictly older than `cutoff`.
/// Returns the number of rows removed.
pub fn purge_older_than(conn: &Connection, cutoff: DateTime<Utc>) -> AppResult<usize> {
    let deleted = conn.execute(
        "DELETE FROM trail_points WHERE timestamp < ?1",
        [cutoff.to_rfc3339()],
    )?;
    Ok(deleted)
}
