pub mod assignment;
pub mod employee;
pub mod geofence;
pub mod session;
pub mod summary;
pub mod trail_point;
