pub mod handlers;

use crate::schema::LogRecord;
use clap::ValueEnum;

pub use handlers::{AggregateStats, HandlersReport};

/// a report consumes parsed records and produces printable text
pub trait Report {
    fn name(&self) -> &'static str;

    fn generate(&self, records: &[LogRecord]) -> String;
}

/// report types selectable with `--report`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// per-endpoint request counts by level
    Handlers,
}

impl ReportKind {
    pub fn build(self, request_logger: &str) -> Box<dyn Report> {
        match self {
            ReportKind::Handlers => Box::new(HandlersReport::new(request_logger)),
        }
    }
}
