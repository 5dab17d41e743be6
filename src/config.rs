//! Courier configuration loaded from `courier.toml`.
//!
//! [`CourierConfig`] holds every tunable parameter. Values missing from the
//! file fall back to defaults. The `COURIER_LOG` environment variable takes
//! precedence over the file for the log level.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::error::CourierError;

/// Default file looked up in the working directory.
pub const CONFIG_FILE: &str = "courier.toml";

/// Environment variable overriding `log_level`.
pub const LOG_ENV: &str = "COURIER_LOG";

/// How a tracking run is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Styled lines and a summary.
    #[default]
    Text,
    /// Pretty-printed JSON audit record.
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourierConfig {
    /// Package id used when none is given on the command line.
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Number of steps `track` performs when `--steps` is absent.
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// `tracing` filter directive, e.g. `warn` or `courier=debug`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_subject() -> String {
    "Test Package".to_string()
}

// Five steps walk a fresh package all the way to delivery.
fn default_steps() -> usize {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            steps: default_steps(),
            log_level: default_log_level(),
            format: OutputFormat::default(),
        }
    }
}

impl CourierConfig {
    /// Load `courier.toml` from the working directory, or `path` if given.
    ///
    /// A missing default file yields defaults; a missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CourierError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                Self::from_file(path)?
            }
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        // The environment wins over the file for the log level.
        if let Ok(level) = std::env::var(LOG_ENV)
            && !level.is_empty()
        {
            config.log_level = level;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, CourierError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str::<CourierConfig>(&contents)?;
        if config.subject.trim().is_empty() {
            return Err(CourierError::Config("subject must not be empty".into()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let config = CourierConfig::default();
        assert_eq!(config.subject, "Test Package");
        assert_eq!(config.steps, 5);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            subject = "PKG-001"
            format = "json"
        "#;
        let config: CourierConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.subject, "PKG-001");
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.steps, 5);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn load_reads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "steps = 2\nsubject = \"box\"").unwrap();

        let config = CourierConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.steps, 2);
        assert_eq!(config.subject, "box");
    }

    #[test]
    fn load_rejects_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = CourierConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_rejects_blank_subject() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "subject = \"  \"").unwrap();
        assert!(CourierConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "steps = \"many\"").unwrap();
        let err = CourierConfig::load(Some(file.path())).unwrap_err();
        assert!(err.downcast_ref::<CourierError>().is_some());
    }

    #[test]
    fn env_overrides_file_log_level() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"info\"").unwrap();

        // SAFETY: only std touches the environment here, and no other test
        // asserts on `log_level` after `load`.
        unsafe { std::env::set_var(LOG_ENV, "courier=trace") };
        let config = CourierConfig::load(Some(file.path())).unwrap();
        unsafe { std::env::set_var(LOG_ENV, "") };
        assert_eq!(config.log_level, "courier=trace");

        let config = CourierConfig::load(Some(file.path())).unwrap();
        unsafe { std::env::remove_var(LOG_ENV) };
        assert_eq!(config.log_level, "info");
    }
}
