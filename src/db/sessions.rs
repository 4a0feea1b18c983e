use crate::errors::{AppError, AppResult};
use crate::geo::LatLng;
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, Row, params};

pub(crate) fn row_to_session(row: &Row) -> Result<Session> {
    Ok(Session {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        check_in_time: row.get("check_in_time")?,
        check_in_selfie_url: row.get("check_in_selfie_url")?,
        odometer_start_url: row.get("odometer_start_url")?,
        odometer_start: row.get("odometer_start")?,
        check_out_time: row.get("check_out_time")?,
        odometer_end_url: row.get("odometer_end_url")?,
        odometer_end: row.get("odometer_end")?,
        start_lat: row.get("start_lat")?,
        start_lng: row.get("start_lng")?,
        end_lat: row.get("end_lat")?,
        end_lng: row.get("end_lng")?,
    })
}

const SESSION_COLS: &str = "id, employee_id, check_in_time, check_in_selfie_url, \
     odometer_start_url, odometer_start, check_out_time, odometer_end_url, \
     odometer_end, start_lat, start_lng, end_lat, end_lng";

pub struct NewSession<'a> {
    pub employee_id: i64,
    pub start: LatLng,
    pub odometer_start: f64,
    pub selfie_url: Option<&'a str>,
    pub odometer_url: Option<&'a str>,
}

/// Insert an open session at check-in time `now`.
pub fn insert_session(conn: &Connection, s: &NewSession, now: DateTime<Utc>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (employee_id, check_in_time, check_in_selfie_url, \
         odometer_start_url, odometer_start, start_lat, start_lng) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            s.employee_id,
            now.to_rfc3339(),
            s.selfie_url,
            s.odometer_url,
            s.odometer_start,
            s.start.lat,
            s.start.lng
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Retrieve a single session by id.
pub fn get_session(conn: &Connection, session_id: i64) -> AppResult<Option<Session>> {
    let sql = format!("SELECT {} FROM sessions WHERE id = ?1", SESSION_COLS);
    let mut stmt = conn.prepare_cached(&sql)?;
    match stmt.query_row([session_id], row_to_session) {
        Ok(s) => Ok(Some(s)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn require_session(conn: &Connection, session_id: i64) -> AppResult<Session> {
    get_session(conn, session_id)?
        .ok_or_else(|| AppError::NotFound(format!("session {}", session_id)))
}

/// Overwrite the last-known position. Runs on every location event with no
/// rate limit and no ordering guard: last write wins.
pub fn update_last_position(conn: &Connection, session_id: i64, pos: LatLng) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions SET end_lat = ?1, end_lng = ?2 WHERE id = ?3",
        params![pos.lat, pos.lng, session_id],
    )?;
    Ok(())
}

/// Close a session. At-most-once: the WHERE clause only matches an open row,
/// so the loser of a concurrent checkout race sees `AlreadyClosed`.
pub fn close_session(
    conn: &Connection,
    session_id: i64,
    odometer_end: f64,
    odometer_end_url: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<Session> {
    let changed = conn.execute(
        "UPDATE sessions SET check_out_time = ?1, odometer_end = ?2, odometer_end_url = ?3 \
         WHERE id = ?4 AND check_out_time IS NULL",
        params![now.to_rfc3339(), odometer_end, odometer_end_url, session_id],
    )?;

    if changed == 0 {
        return match get_session(conn, session_id)? {
            Some(_) => Err(AppError::AlreadyClosed(session_id)),
            None => Err(AppError::NotFound(format!("session {}", session_id))),
        };
    }

    require_session(conn, session_id)
}

/// All sessions of an employee, newest check-in first.
pub fn list_sessions_by_employee(conn: &Connection, employee_id: i64) -> AppResult<Vec<Session>> {
    let sql = format!(
        "SELECT {} FROM sessions WHERE employee_id = ?1 ORDER BY check_in_time DESC, id DESC",
        SESSION_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([employee_id], row_to_session)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
