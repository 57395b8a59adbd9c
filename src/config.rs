use crate::error::{ReqlogError, Result};
use crate::parser::DEFAULT_REQUEST_LOGGER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// top-level config for reqlog
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub parser: ParserConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String, // error|warn|info|debug|trace
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParserConfig {
    /// logger whose lines describe HTTP requests
    pub request_logger: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { request_logger: DEFAULT_REQUEST_LOGGER.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// parallel file workers; unset means one per available core
    pub jobs: Option<usize>,
}

impl Config {
    /// load config from a toml file, then overlay with env vars (REQLOG_*)
    ///
    /// an explicit path must exist and parse; the default
    /// ~/.reqlog/reqlog.toml is only used when present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
                let default_path = PathBuf::from(home).join(".reqlog").join("reqlog.toml");
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        cfg.overlay_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            ReqlogError::Config(format!("cannot read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&text).map_err(|e| {
            ReqlogError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    fn overlay_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = var("REQLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(logger) = var("REQLOG_REQUEST_LOGGER") {
            self.parser.request_logger = logger;
        }
        if let Some(jobs) = var("REQLOG_JOBS") {
            let jobs = jobs
                .trim()
                .parse::<usize>()
                .map_err(|_| ReqlogError::Config(format!("REQLOG_JOBS is not a number: {}", jobs)))?;
            self.processing.jobs = Some(jobs);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.parser.request_logger, "django.request");
        assert_eq!(cfg.processing.jobs, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reqlog.toml");
        fs::write(&path, "[parser]\nrequest_logger = \"app.http\"\n").unwrap();

        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.parser.request_logger, "app.http");
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn explicit_missing_or_broken_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(missing.as_path())), Err(ReqlogError::Config(_))));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[processing]\njobs = \"many\"\n").unwrap();
        assert!(matches!(Config::load(Some(broken.as_path())), Err(ReqlogError::Config(_))));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("REQLOG_LOG_LEVEL", "debug"),
            ("REQLOG_REQUEST_LOGGER", "api.requests"),
            ("REQLOG_JOBS", " 3 "),
        ]);
        let mut cfg = Config::default();
        cfg.overlay_env(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.parser.request_logger, "api.requests");
        assert_eq!(cfg.processing.jobs, Some(3));
    }

    #[test]
    fn bad_jobs_env_is_rejected() {
        let mut cfg = Config::default();
        let err = cfg
            .overlay_env(|k| (k == "REQLOG_JOBS").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, ReqlogError::Config(_)));
    }
}
