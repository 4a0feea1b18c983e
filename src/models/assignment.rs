use chrono::NaiveDate;
use serde::Serialize;

/// A daily target: which geofence an employee is expected to visit on a
/// given date. Advisory for the client UI; the matcher ignores it.
#[derive(Debug, Clone, Serialize)]
pub struct GeofenceAssignment {
    pub id: i64,
    pub employee_id: i64,
    pub geofence_id: i64,
    pub assigned_date: NaiveDate, // ⇔ geofence_assignments.assigned_date (TEXT "YYYY-MM-DD")
    pub created_at: String,
}

/// An assignment joined with its geofence, as the client UI consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct AssignedTarget {
    pub assignment_id: i64,
    pub geofence_id: i64,
    pub geofence_name: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_m: f64,
    pub assigned_date: NaiveDate,
}
