pub mod log_id;
pub mod travel_log;

pub use log_id::{InvalidLogId, LogId};
pub use travel_log::{TravelLog, ValidationError};
