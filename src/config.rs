//! Runtime configuration.
//!
//! Values come from the environment first; the command line can override
//! any of them.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "worksheet.log";

#[derive(Debug, Error)]
#[error("invalid {key} value {value:?}: {message}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// Upper bound for every backend request.
    pub request_timeout: Duration,
    /// Where tracing output goes; the terminal belongs to the UI.
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Read `WORKSHEET_API_URL`, `WORKSHEET_TIMEOUT_SECS` and
    /// `WORKSHEET_LOG_FILE`, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_or(
            "WORKSHEET_TIMEOUT_SECS",
            lookup("WORKSHEET_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;

        let mut config = Self {
            api_url: lookup("WORKSHEET_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            log_file: lookup("WORKSHEET_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        };
        config.validate()?;
        config.api_url = config.api_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Apply command line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        timeout_secs: Option<u64>,
        log_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError {
                key: "WORKSHEET_API_URL",
                value: self.api_url.clone(),
                message: "must start with http:// or https://".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError {
                key: "WORKSHEET_TIMEOUT_SECS",
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            key,
            message: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_reads_environment() {
        let config = load(&[
            ("WORKSHEET_API_URL", "https://quiz.example.org/api/"),
            ("WORKSHEET_TIMEOUT_SECS", "3"),
            ("WORKSHEET_LOG_FILE", "/tmp/ws.log"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "https://quiz.example.org/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.log_file, PathBuf::from("/tmp/ws.log"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("WORKSHEET_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("WORKSHEET_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("WORKSHEET_API_URL", "/api")]).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default()
            .with_overrides(Some("http://10.0.0.2:9000/".to_string()), Some(30), None)
            .unwrap();

        assert_eq!(config.api_url, "http://10.0.0.2:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }
}
