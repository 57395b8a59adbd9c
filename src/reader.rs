use crate::error::{ReqlogError, Result};
use crate::parser::LineParser;
use crate::schema::LogRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// read a log file line by line, keeping the records the parser accepts in file order
pub fn parse_file(parser: &LineParser, path: &Path) -> Result<Vec<LogRecord>> {
    let io_err = |source| ReqlogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(io_err)?;
        // lines() drops "\n" but leaves the "\r" of CRLF files
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if let Some(record) = parser.parse(line) {
            records.push(record);
        }
    }

    tracing::debug!(file = %path.display(), records = records.len(), "parsed log file");
    Ok(records)
}
