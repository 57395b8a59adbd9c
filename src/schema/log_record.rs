use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// method reported for request-logger lines that carry an error instead of a verb
pub const ERROR_METHOD: &str = "ERROR";

/// one successfully parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub level: String, // raw token, not validated here
    pub logger: String,
    pub message: String,
    pub request: Option<RequestInfo>,
}

/// request details pulled out of a request-logger message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestInfo {
    /// `<VERB> <path> <status>`
    Served {
        method: HttpMethod,
        path: String,
        status: u16,
    },
    /// `Error: <path>`
    Failed { path: String },
}

impl RequestInfo {
    pub fn method(&self) -> &str {
        match self {
            RequestInfo::Served { method, .. } => method.as_str(),
            RequestInfo::Failed { .. } => ERROR_METHOD,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            RequestInfo::Served { path, .. } | RequestInfo::Failed { path } => path,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestInfo::Served { status, .. } => Some(*status),
            RequestInfo::Failed { .. } => None,
        }
    }
}

impl LogRecord {
    pub fn method(&self) -> Option<&str> {
        self.request.as_ref().map(RequestInfo::method)
    }

    pub fn path(&self) -> Option<&str> {
        self.request.as_ref().map(RequestInfo::path)
    }

    pub fn status(&self) -> Option<u16> {
        self.request.as_ref().and_then(RequestInfo::status)
    }

    /// render back into the line grammar the parser accepts
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S,%3f"),
            self.level,
            self.logger,
            self.message
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown HTTP method: {}", s))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// severity levels shown as report columns, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown level: {}", s))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
