use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignedTarget;
use crate::utils::date;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Result, Row, params};

/// Assign a geofence target to an employee for a date.
/// Both sides must exist; assignments are advisory and never consulted by
/// the matcher.
pub fn add_assignment(
    conn: &Connection,
    employee_id: i64,
    geofence_id: i64,
    assigned_date: NaiveDate,
) -> AppResult<i64> {
    let emp_exists: bool = conn
        .prepare_cached("SELECT 1 FROM employees WHERE id = ?1")?
        .exists([employee_id])?;
    if !emp_exists {
        return Err(AppError::NotFound(format!("employee id {}", employee_id)));
    }

    let gf_exists: bool = conn
        .prepare_cached("SELECT 1 FROM geofences WHERE id = ?1")?
        .exists([geofence_id])?;
    if !gf_exists {
        return Err(AppError::NotFound(format!("geofence {}", geofence_id)));
    }

    conn.execute(
        "INSERT INTO geofence_assignments (employee_id, geofence_id, assigned_date, created_at) \
         VALUES (?1, ?2, ?3, ?4)",
        params![
            employee_id,
            geofence_id,
            date::format_date(assigned_date),
            Utc::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_assignment(conn: &Connection, assignment_id: i64) -> AppResult<()> {
    let changed = conn.execute(
        "DELETE FROM geofence_assignments WHERE id = ?1",
        [assignment_id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("assignment {}", assignment_id)));
    }
    Ok(())
}

fn row_to_target(row: &Row) -> Result<AssignedTarget> {
    let date_str: String = row.get("assigned_date")?;
    let assigned_date = date::parse_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(crate::errors::AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(AssignedTarget {
        assignment_id: row.get("assignment_id")?,
        geofence_id: row.get("geofence_id")?,
        geofence_name: row.get("geofence_name")?,
        center_lat: row.get("center_lat")?,
        center_lng: row.get("center_lng")?,
        radius_m: row.get("radius_m")?,
        assigned_date,
    })
}

/// The geofence targets assigned to an employee for one date, joined with
/// the geofence definitions the client needs to render them.
pub fn targets_for(
    conn: &Connection,
    employee_id: i64,
    day: NaiveDate,
) -> AppResult<Vec<AssignedTarget>> {
    let mut stmt = conn.prepare_cached(
        "SELECT a.id AS assignment_id, g.id AS geofence_id, g.name AS geofence_name, \
                g.center_lat, g.center_lng, g.radius_m, a.assigned_date \
         FROM geofence_assignments a \
         JOIN geofences g ON g.id = a.geofence_id \
         WHERE a.employee_id = ?1 AND a.assigned_date = ?2 \
         ORDER BY a.id ASC",
    )?;
    let rows = stmt.query_map(params![employee_id, date::format_date(day)], row_to_target)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
