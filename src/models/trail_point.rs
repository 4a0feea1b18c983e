use crate::geo::LatLng;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An immutable trail sample. Points are append-only; the only delete path
/// is the retention sweep.
#[derive(Debug, Clone, Serialize)]
pub struct TrailPoint {
    pub id: i64,
    pub session_id: i64,
    pub employee_id: i64,
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>, // ⇔ trail_points.timestamp (TEXT, ISO8601)
}

impl TrailPoint {
    pub fn pos(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}
