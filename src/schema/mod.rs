pub mod log_record;

pub use log_record::{ERROR_METHOD, HttpMethod, Level, LogRecord, RequestInfo};
