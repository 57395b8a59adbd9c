use crate::schema::{HttpMethod, LogRecord, RequestInfo};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// logger name Django uses for request/response events
pub const DEFAULT_REQUEST_LOGGER: &str = "django.request";

// `<date> <time>,<millis> <LEVEL> <logger>: <message>`, anchored at line start
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2}) ([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3}) (\w+) ([\w.]+): (.+)",
    )
    .expect("line pattern is valid")
});

static REQUEST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(GET|POST|PUT|DELETE|PATCH) (\S+) ([0-9]{3})").expect("request pattern is valid")
});

static ERROR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Error: (\S+)").expect("error pattern is valid"));

/// turns single log lines into records
#[derive(Debug, Clone)]
pub struct LineParser {
    request_logger: String,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_LOGGER)
    }
}

impl LineParser {
    pub fn new(request_logger: impl Into<String>) -> Self {
        Self {
            request_logger: request_logger.into(),
        }
    }

    pub fn request_logger(&self) -> &str {
        &self.request_logger
    }

    /// parse one line, returning None for anything outside the grammar
    /// (including timestamps that are not real calendar values)
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        let caps = LINE_PATTERN.captures(line)?;
        let timestamp = build_timestamp(&caps)?;

        let logger = &caps[9];
        let message = &caps[10];
        let request = if logger == self.request_logger {
            extract_request(message)
        } else {
            None
        };

        Some(LogRecord {
            timestamp,
            level: caps[8].to_string(),
            logger: logger.to_string(),
            message: message.to_string(),
            request,
        })
    }
}

fn build_timestamp(caps: &Captures<'_>) -> Option<NaiveDateTime> {
    let num = |i: usize| caps[i].parse::<u32>().ok();
    // year 0 exists in chrono's proleptic calendar but not in real log timestamps
    let year = caps[1].parse::<i32>().ok().filter(|y| *y >= 1)?;
    NaiveDate::from_ymd_opt(year, num(2)?, num(3)?)?.and_hms_milli_opt(
        num(4)?,
        num(5)?,
        num(6)?,
        num(7)?,
    )
}

/// verb line first, then `Error: <path>`; both searched anywhere in the message
fn extract_request(message: &str) -> Option<RequestInfo> {
    if let Some(caps) = REQUEST_PATTERN.captures(message) {
        // the alternation only admits known verbs
        let method = caps[1].parse::<HttpMethod>().ok()?;
        let status = caps[3].parse::<u16>().ok()?;
        return Some(RequestInfo::Served {
            method,
            path: caps[2].to_string(),
            status,
        });
    }

    ERROR_PATTERN
        .captures(message)
        .map(|caps| RequestInfo::Failed {
            path: caps[1].to_string(),
        })
}
