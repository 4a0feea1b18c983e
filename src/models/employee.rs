use crate::geo::LatLng;
use serde::Serialize;

/// A field employee known to the system.
/// The home geofence columns are optional: when any of them is missing the
/// check-in home test is skipped, not failed.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub code: String,          // ⇔ employees.code (TEXT UNIQUE)
    pub is_active: bool,       // ⇔ employees.is_active (INTEGER 0/1)
    pub home_lat: Option<f64>, // ⇔ employees.home_lat
    pub home_lng: Option<f64>, // ⇔ employees.home_lng
    pub home_radius_m: Option<f64>,
    pub created_at: String, // ⇔ employees.created_at (TEXT, ISO8601)
}

impl Employee {
    /// Home geofence, only when fully configured (lat, lng and radius all set).
    pub fn home(&self) -> Option<(LatLng, f64)> {
        match (self.home_lat, self.home_lng, self.home_radius_m) {
            (Some(lat), Some(lng), Some(r)) => Some((LatLng::new(lat, lng), r)),
            _ => None,
        }
    }
}

/// How a caller refers to an employee. Resolved once at the boundary; the
/// core never sniffs strings for digits.
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeRef {
    ById(i64),
    ByCode(String),
}

impl EmployeeRef {
    /// Parse a CLI identifier: an all-numeric value is an id, anything else
    /// is an employee code.
    pub fn parse(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(id) => EmployeeRef::ById(id),
            Err(_) => EmployeeRef::ByCode(s.to_string()),
        }
    }
}

impl std::fmt::Display for EmployeeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeRef::ById(id) => write!(f, "id {}", id),
            EmployeeRef::ByCode(code) => write!(f, "code {}", code),
        }
    }
}
