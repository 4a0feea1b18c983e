use crate::geo::LatLng;
use serde::Serialize;

/// One tracked work shift, from check-in to check-out.
/// `check_out_time = NULL` means the session is still open; closing it is a
/// one-way transition enforced by the store.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: i64,
    pub employee_id: i64,
    pub check_in_time: String, // ⇔ sessions.check_in_time (TEXT, ISO8601)
    pub check_in_selfie_url: Option<String>,
    pub odometer_start_url: Option<String>,
    pub odometer_start: Option<f64>,
    pub check_out_time: Option<String>,
    pub odometer_end_url: Option<String>,
    pub odometer_end: Option<f64>,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: Option<f64>, // last known position, updated on every event
    pub end_lng: Option<f64>,
}

impl Session {
    pub fn is_closed(&self) -> bool {
        self.check_out_time.is_some()
    }

    pub fn start_pos(&self) -> LatLng {
        LatLng::new(self.start_lat, self.start_lng)
    }

    pub fn end_pos(&self) -> Option<LatLng> {
        match (self.end_lat, self.end_lng) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }
}
