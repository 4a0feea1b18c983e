pub mod assign;
pub mod checkin;
pub mod checkout;
pub mod employee;
pub mod export;
pub mod geofence;
pub mod init;
pub mod log;
pub mod purge;
pub mod sessions;
pub mod summary;
pub mod track;
pub mod trail;
