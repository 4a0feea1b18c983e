use crate::geo::LatLng;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A named circular target zone. Two geofences may never share the same
/// center coordinates (UNIQUE constraint in the schema).
#[derive(Debug, Clone, Serialize)]
pub struct Geofence {
    pub id: i64,
    pub name: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_m: f64,
    pub created_at: String, // ⇔ geofences.created_at (TEXT, ISO8601)
}

impl Geofence {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}

/// Completion fact: a session entered a geofence. At most one row per
/// (session, geofence), never updated after insertion.
#[derive(Debug, Clone, Serialize)]
pub struct GeofenceStatus {
    pub id: i64,
    pub employee_id: i64,
    pub session_id: i64,
    pub geofence_id: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}
