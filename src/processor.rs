use crate::error::{ReqlogError, Result};
use crate::parser::LineParser;
use crate::reader;
use crate::schema::LogRecord;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// number of parsing workers to use when none is configured
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// parses a batch of log files in parallel
#[derive(Debug)]
pub struct LogProcessor {
    log_files: Vec<PathBuf>,
    parser: Arc<LineParser>,
    jobs: usize,
}

impl LogProcessor {
    pub fn new(log_files: Vec<PathBuf>, parser: LineParser, jobs: usize) -> Self {
        Self {
            log_files,
            parser: Arc::new(parser),
            jobs: jobs.max(1),
        }
    }

    /// parse every file and concatenate the records in input order
    pub async fn process_files(&self) -> Result<Vec<LogRecord>> {
        let permits = Arc::new(Semaphore::new(self.jobs));
        let mut handles = Vec::with_capacity(self.log_files.len());

        for path in &self.log_files {
            let permits = Arc::clone(&permits);
            let parser = Arc::clone(&self.parser);
            let path = path.clone();
            handles.push(tokio::spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| ReqlogError::Worker(e.to_string()))?;
                let records =
                    tokio::task::spawn_blocking(move || reader::parse_file(&parser, &path))
                        .await
                        .map_err(|e| ReqlogError::Worker(e.to_string()))??;
                Ok::<_, ReqlogError>(records)
            }));
        }

        // join in submission order so output order never depends on scheduling
        let mut all_records = Vec::new();
        for handle in handles {
            let records = handle
                .await
                .map_err(|e| ReqlogError::Worker(e.to_string()))??;
            all_records.extend(records);
        }

        tracing::debug!(
            files = self.log_files.len(),
            records = all_records.len(),
            "finished parsing"
        );
        Ok(all_records)
    }
}
