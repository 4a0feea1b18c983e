pub mod checkin;
pub mod checkout;
pub mod export;
pub mod log;
pub mod services;
pub mod track;
