//! Runtime configuration for the portfolio core.

use crate::logging::{default_log_level, LogLevel};
use crate::nav::transition::TransitionTimings;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Simulated latency of the credential check.
    pub credential_check_delay_secs: f64,
    pub transition: TransitionTimings,
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            credential_check_delay_secs: 1.0,
            transition: TransitionTimings::default(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("credential_check_delay_secs", self.credential_check_delay_secs)?;
        non_negative("transition.duration_secs", self.transition.duration_secs)?;
        finite("transition.entry_offset_y", self.transition.entry_offset_y)?;
        finite("transition.exit_offset_y", self.transition.exit_offset_y)?;
        LogLevel::parse(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    OutOfRange { field: &'static str, value: f64 },
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "config parse error: {message}"),
            Self::OutOfRange { field, value } => {
                write!(f, "config field `{field}` is out of range: {value}")
            }
            Self::InvalidLogLevel(message) => write!(f, "config log_level: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};

    #[test]
    fn defaults_match_page_timings() {
        let config = CoreConfig::default();
        assert_eq!(config.credential_check_delay_secs, 1.0);
        assert_eq!(config.transition.duration_secs, 0.4);
        assert_eq!(config.transition.entry_offset_y, 20.0);
        assert_eq!(config.transition.exit_offset_y, -20.0);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = CoreConfig::from_json_str(
            r#"{ "credential_check_delay_secs": 0.25, "transition": { "duration_secs": 0.1 } }"#,
        )
        .expect("valid config");
        assert_eq!(config.credential_check_delay_secs, 0.25);
        assert_eq!(config.transition.duration_secs, 0.1);
        assert_eq!(config.transition.entry_offset_y, 20.0);
    }

    #[test]
    fn rejects_negative_delay_and_unknown_fields() {
        let err = CoreConfig::from_json_str(r#"{ "credential_check_delay_secs": -1 }"#)
            .expect_err("negative delay");
        assert!(matches!(err, ConfigError::OutOfRange { .. }));

        let err = CoreConfig::from_json_str(r#"{ "accepted_name": "bob" }"#)
            .expect_err("unknown field");
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = CoreConfig::from_json_str(r#"{ "log_level": "loud" }"#)
            .expect_err("bad level");
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
