use crate::errors::AppResult;
use crate::models::summary::DailySummary;
use crate::utils::date;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

fn row_to_summary(row: &Row) -> Result<DailySummary> {
    let date_str: String = row.get("date")?;
    let day = date::parse_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(crate::errors::AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(DailySummary {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date: day,
        odometer_start: row.get("odometer_start")?,
        odometer_end: row.get("odometer_end")?,
        total_distance: row.get("total_distance")?,
        geofence_count: row.get("geofence_count")?,
        start_lat: row.get("start_lat")?,
        start_lng: row.get("start_lng")?,
        end_lat: row.get("end_lat")?,
        end_lng: row.get("end_lng")?,
    })
}

const SUMMARY_COLS: &str = "id, employee_id, date, odometer_start, odometer_end, \
     total_distance, geofence_count, start_lat, start_lng, end_lat, end_lng";

pub struct SummaryInput {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub odometer_start: f64,
    pub odometer_end: f64,
    pub total_distance: f64,
    pub geofence_count: i64,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
}

/// Insert or replace the summary for (employee, date). A second checkout on
/// the same day overwrites the values instead of duplicating the row, which
/// keeps the one-summary-per-employee-per-day invariant intact.
pub fn upsert_summary(conn: &Connection, s: &SummaryInput) -> AppResult<DailySummary> {
    conn.execute(
        "INSERT INTO daily_summary \
         (employee_id, date, odometer_start, odometer_end, total_distance, \
          geofence_count, start_lat, start_lng, end_lat, end_lng) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
         ON CONFLICT (employee_id, date) DO UPDATE SET \
             odometer_start = excluded.odometer_start, \
             odometer_end = excluded.odometer_end, \
             total_distance = excluded.total_distance, \
             geofence_count = excluded.geofence_count, \
             start_lat = excluded.start_lat, \
             start_lng = excluded.start_lng, \
             end_lat = excluded.end_lat, \
             end_lng = excluded.end_lng",
        params![
            s.employee_id,
            date::format_date(s.date),
            s.odometer_start,
            s.odometer_end,
            s.total_distance,
            s.geofence_count,
            s.start_lat,
            s.start_lng,
            s.end_lat,
            s.end_lng
        ],
    )?;

    let sql = format!(
        "SELECT {} FROM daily_summary WHERE employee_id = ?1 AND date = ?2",
        SUMMARY_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row(
        params![s.employee_id, date::format_date(s.date)],
        row_to_summary,
    )?)
}

/// All summaries of one employee, newest first.
pub fn summaries_for_employee(conn: &Connection, employee_id: i64) -> AppResult<Vec<DailySummary>> {
    let sql = format!(
        "SELECT {} FROM daily_summary WHERE employee_id = ?1 ORDER BY date DESC",
        SUMMARY_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([employee_id], row_to_summary)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Summaries of all employees for one date.
pub fn summaries_for_date(conn: &Connection, day: NaiveDate) -> AppResult<Vec<DailySummary>> {
    let sql = format!(
        "SELECT {} FROM daily_summary WHERE date = ?1 ORDER BY employee_id ASC",
        SUMMARY_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([date::format_date(day)], row_to_summary)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Summaries of all employees since a date (inclusive), newest first.
pub fn summaries_since(conn: &Connection, day: NaiveDate) -> AppResult<Vec<DailySummary>> {
    let sql = format!(
        "SELECT {} FROM daily_summary WHERE date >= ?1 ORDER BY date DESC, employee_id ASC",
        SUMMARY_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([date::format_date(day)], row_to_summary)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Every summary in the database, for export. Ordered by date then employee.
pub fn all_summaries(conn: &Connection) -> AppResult<Vec<DailySummary>> {
    let sql = format!(
        "SELECT {} FROM daily_summary ORDER BY date ASC, employee_id ASC",
        SUMMARY_COLS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], row_to_summary)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
