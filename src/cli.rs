use crate::config::Config;
use crate::error::{ReqlogError, Result};
use crate::parser::LineParser;
use crate::processor::{self, LogProcessor};
use crate::report::ReportKind;
use clap::Parser;
use std::path::PathBuf;

/// Django application log analyzer
#[derive(Parser, Debug, Clone)]
#[command(name = "reqlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// log files to analyze
    #[arg(value_name = "LOG_FILES", required = true, num_args = 1..)]
    pub log_files: Vec<PathBuf>,

    /// report to generate
    #[arg(long, value_enum)]
    pub report: ReportKind,

    /// enable verbose (debug) diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// number of files parsed in parallel (defaults to available cores)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,
}

impl Cli {
    /// parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// every input must exist before any file is read
    pub fn validate(&self) -> Result<()> {
        for log_file in &self.log_files {
            if !log_file.exists() {
                return Err(ReqlogError::Config(format!(
                    "log file does not exist: {}",
                    log_file.display()
                )));
            }
        }
        if self.jobs == Some(0) {
            return Err(ReqlogError::Config("--jobs must be at least 1".into()));
        }
        Ok(())
    }

    /// worker count: flag, then config, then core count
    pub fn jobs(&self, config: &Config) -> usize {
        self.jobs
            .or(config.processing.jobs)
            .filter(|n| *n > 0)
            .unwrap_or_else(processor::default_jobs)
    }

    /// parse all inputs and render the selected report
    pub async fn run(&self, config: &Config) -> Result<String> {
        self.validate()?;

        let request_logger = &config.parser.request_logger;
        let jobs = self.jobs(config);
        tracing::debug!(files = self.log_files.len(), jobs, %request_logger, "starting analysis");

        let processor = LogProcessor::new(
            self.log_files.clone(),
            LineParser::new(request_logger.as_str()),
            jobs,
        );
        let records = processor.process_files().await?;

        let report = self.report.build(request_logger);
        tracing::debug!(report = report.name(), records = records.len(), "generating report");
        Ok(report.generate(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cli(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("reqlog").chain(args.iter().copied()))
    }

    #[test]
    fn parses_files_and_report() {
        let args = cli(&["a.log", "b.log", "--report", "handlers"]).unwrap();
        assert_eq!(args.log_files, vec![PathBuf::from("a.log"), PathBuf::from("b.log")]);
        assert_eq!(args.report, ReportKind::Handlers);
    }

    #[test]
    fn rejects_unknown_report_and_missing_inputs() {
        assert!(cli(&["a.log", "--report", "invalid"]).is_err());
        assert!(cli(&["a.log"]).is_err());
        assert!(cli(&["--report", "handlers"]).is_err());
    }

    #[test]
    fn missing_file_fails_validation() {
        let args = cli(&["/definitely/not/here.log", "--report", "handlers"]).unwrap();
        assert!(matches!(args.validate(), Err(ReqlogError::Config(_))));
    }

    #[test]
    fn jobs_precedence() {
        let mut config = Config::default();
        config.processing.jobs = Some(3);
        let args = cli(&["a.log", "--report", "handlers"]).unwrap();
        assert_eq!(args.jobs(&config), 3);
        let args = cli(&["a.log", "--report", "handlers", "-j", "5"]).unwrap();
        assert_eq!(args.jobs(&config), 5);
    }

    #[tokio::test]
    async fn run_renders_report_for_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let line = "2025-03-27 12:36:45,000 INFO django.request: GET /api/v1/checkout/ 201 OK";
        let err_line =
            "2025-03-27 12:33:05,000 ERROR django.request: Internal Server Error: /api/v1/users/";
        let first = dir.path().join("one.log");
        let second = dir.path().join("two.log");
        fs::write(&first, format!("{line}\n{err_line}\n")).unwrap();
        fs::write(&second, format!("{line}\nnoise\n{err_line}\n")).unwrap();

        let args = Cli {
            log_files: vec![first, second],
            report: ReportKind::Handlers,
            verbose: false,
            config: None,
            jobs: Some(2),
        };
        let out = args.run(&Config::default()).await.unwrap();
        assert!(out.starts_with("\nTotal requests: 4\n"));
    }
}
