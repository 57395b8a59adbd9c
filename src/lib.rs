//! Django request log analysis: parse log files, count requests per endpoint
//! and level, and render the result as a plain-text table.

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod processor;
pub mod reader;
pub mod report;
pub mod schema;
pub mod util;

pub use error::{ReqlogError, Result};
pub use parser::LineParser;
pub use schema::LogRecord;
