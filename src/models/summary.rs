use chrono::NaiveDate;
use serde::Serialize;

/// The reconciled record of one employee's day: odometer delta, distance and
/// geofence completions. Exactly one row per (employee, date); a second
/// checkout on the same day replaces the values instead of duplicating the row.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate, // ⇔ daily_summary.date (TEXT "YYYY-MM-DD")
    pub odometer_start: f64,
    pub odometer_end: f64,
    pub total_distance: f64,
    pub geofence_count: i64,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
}
