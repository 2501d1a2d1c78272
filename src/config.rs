use serde::Deserialize;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "coreapi.hcl";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] hcl::Error),
    #[error("latency range {min}..{max} is empty")]
    LatencyRange { min: u64, max: u64 },
    #[error("cell size must be non-zero")]
    CellSize,
    #[error("execute delay {delay}ms must be shorter than the request timeout {timeout}ms")]
    DelayExceedsTimeout { delay: u64, timeout: u64 },
}

/// Settings read from `coreapi.hcl`. Every key is optional.
///
/// ```hcl
/// execute_delay_ms = 600
/// theme            = "dracula"
/// auto_track       = true
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: Option<PathBuf>,
    pub execute_delay_ms: u64,
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub request_timeout_ms: u64,
    pub auto_track: bool,
    pub theme: String,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            catalog: None,
            execute_delay_ms: 600,
            latency_min_ms: 50,
            latency_max_ms: 250,
            request_timeout_ms: 5000,
            auto_track: true,
            theme: "default".to_string(),
            log_file: None,
            log_level: "info".to_string(),
            cell_width: 8,
            cell_height: 16,
        }
    }
}

impl Settings {
    pub fn from_hcl(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = hcl::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `path`, or falls back to defaults when `path` is `None` and the
    /// default file does not exist. An explicit path that is missing is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_hcl(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.latency_min_ms >= self.latency_max_ms {
            return Err(ConfigError::LatencyRange {
                min: self.latency_min_ms,
                max: self.latency_max_ms,
            });
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::CellSize);
        }
        if self.execute_delay_ms >= self.request_timeout_ms {
            return Err(ConfigError::DelayExceedsTimeout {
                delay: self.execute_delay_ms,
                timeout: self.request_timeout_ms,
            });
        }
        Ok(())
    }

    pub fn execute_delay(&self) -> Duration {
        Duration::from_millis(self.execute_delay_ms)
    }

    pub fn latency_range(&self) -> Range<u64> {
        self.latency_min_ms..self.latency_max_ms
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("coreapi.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_hcl("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.execute_delay(), Duration::from_millis(600));
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_hcl(
            r#"
execute_delay_ms = 10
theme = "matrix"
auto_track = false
catalog = "my_catalog.json"
"#,
        )
        .unwrap();

        assert_eq!(settings.execute_delay_ms, 10);
        assert_eq!(settings.theme, "matrix");
        assert!(!settings.auto_track);
        assert_eq!(settings.catalog, Some(PathBuf::from("my_catalog.json")));
        assert_eq!(settings.latency_min_ms, 50);
    }

    #[test]
    fn test_rejects_empty_latency_range() {
        let err = Settings::from_hcl("latency_min_ms = 300\nlatency_max_ms = 300").unwrap_err();
        assert!(matches!(err, ConfigError::LatencyRange { min: 300, max: 300 }));
    }

    #[test]
    fn test_rejects_delay_past_timeout() {
        let err = Settings::from_hcl("execute_delay_ms = 5000").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DelayExceedsTimeout {
                delay: 5000,
                timeout: 5000
            }
        ));
        assert!(Settings::from_hcl("execute_delay_ms = 4999").is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Settings::load(Some(Path::new("/definitely/not/here.hcl"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
