use super::Report;
use crate::schema::{Level, LogRecord};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

const HANDLER_WIDTH: usize = 20;
const LEVEL_WIDTH: usize = 8;

/// request counts per endpoint and level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// path -> raw level token -> count
    pub handlers: BTreeMap<String, BTreeMap<String, u64>>,
    pub total: u64,
}

impl AggregateStats {
    pub fn count(&self, path: &str, level: Level) -> u64 {
        self.handlers
            .get(path)
            .and_then(|levels| levels.get(level.as_str()))
            .copied()
            .unwrap_or(0)
    }

    pub fn level_total(&self, level: Level) -> u64 {
        self.handlers.keys().map(|path| self.count(path, level)).sum()
    }

    /// requests counted in `total` whose level has no report column
    pub fn uncategorized(&self) -> u64 {
        self.handlers
            .values()
            .flat_map(|levels| levels.iter())
            .filter(|(level, _)| level.parse::<Level>().is_err())
            .map(|(_, count)| count)
            .sum()
    }
}

/// state of each API handler broken down by log level
#[derive(Debug, Clone)]
pub struct HandlersReport {
    request_logger: String,
}

impl HandlersReport {
    pub fn new(request_logger: impl Into<String>) -> Self {
        Self {
            request_logger: request_logger.into(),
        }
    }

    pub fn aggregate(&self, records: &[LogRecord]) -> AggregateStats {
        let mut stats = AggregateStats::default();
        for record in records {
            if record.logger != self.request_logger {
                continue;
            }
            let Some(path) = record.path().filter(|p| !p.is_empty()) else {
                continue;
            };
            *stats
                .handlers
                .entry(path.to_string())
                .or_default()
                .entry(record.level.clone())
                .or_default() += 1;
            stats.total += 1;
        }

        let hidden = stats.uncategorized();
        if hidden > 0 {
            tracing::warn!(
                requests = hidden,
                "requests with non-standard levels are counted in the total but have no column"
            );
        }
        stats
    }

    pub fn render(&self, stats: &AggregateStats) -> String {
        let mut out = String::new();
        Self::write_table(&mut out, stats).expect("formatting into a String");
        out
    }

    fn write_table(out: &mut String, stats: &AggregateStats) -> fmt::Result {
        writeln!(out, "\nTotal requests: {}\n", stats.total)?;

        write_row(out, "HANDLER", Level::ALL.map(|level| level.as_str()))?;
        // BTreeMap keys iterate sorted by path
        for path in stats.handlers.keys() {
            write_row(out, path, Level::ALL.map(|level| stats.count(path, level)))?;
        }
        write_row(out, "", Level::ALL.map(|level| stats.level_total(level)))
    }
}

fn write_row<T: fmt::Display>(out: &mut String, handler: &str, cells: [T; 5]) -> fmt::Result {
    write!(out, "{:<HANDLER_WIDTH$}\t", handler)?;
    for cell in cells {
        write!(out, "{:<LEVEL_WIDTH$}\t", cell)?;
    }
    writeln!(out)
}

impl Report for HandlersReport {
    fn name(&self) -> &'static str {
        "handlers"
    }

    fn generate(&self, records: &[LogRecord]) -> String {
        self.render(&self.aggregate(records))
    }
}
