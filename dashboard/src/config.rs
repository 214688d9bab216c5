//! Configuration management for the console.
//!
//! Loads configuration from environment variables with defaults. A `.env`
//! file in the working directory is read first by the binary.

use crate::reducer::CompletionPolicy;
use crate::seed::DEFAULT_ADMIN;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Administrator name
pub const ADMIN_VAR: &str = "CALLCENTER_ADMIN";
/// `permissive` or `strict`
pub const POLICY_VAR: &str = "CALLCENTER_COMPLETION_POLICY";
/// Whole hours east of UTC used for audit timestamps
pub const UTC_OFFSET_VAR: &str = "CALLCENTER_UTC_OFFSET_HOURS";
/// Maximum rows in the queue listing
pub const QUEUE_LIMIT_VAR: &str = "CALLCENTER_QUEUE_LIMIT";
/// Standard `tracing` filter
pub const LOG_VAR: &str = "RUST_LOG";

/// Errors from reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value `{value}` for {var}: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Rejected value
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Administrator completed actions are attributed to
    pub admin: String,
    /// Which transitions are accepted
    pub policy: CompletionPolicy,
    /// Hours east of UTC for audit timestamps, -12..=14
    pub utc_offset_hours: i32,
    /// Maximum rows in the queue listing
    pub queue_limit: usize,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin: DEFAULT_ADMIN.to_string(),
            policy: CompletionPolicy::default(),
            utc_offset_hours: 3,
            queue_limit: 10,
            log_level: "callcenter_dashboard=info,callcenter_runtime=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for unset
    /// or blank variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let policy = match get(POLICY_VAR) {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::invalid(POLICY_VAR, &value, e))?,
            None => defaults.policy,
        };

        let utc_offset_hours = match get(UTC_OFFSET_VAR) {
            Some(value) => {
                let hours: i32 = value
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid(UTC_OFFSET_VAR, &value, e))?;
                if !(-12..=14).contains(&hours) {
                    return Err(ConfigError::invalid(
                        UTC_OFFSET_VAR,
                        &value,
                        "expected -12..=14",
                    ));
                }
                hours
            },
            None => defaults.utc_offset_hours,
        };

        let queue_limit = match get(QUEUE_LIMIT_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(0) => return Err(ConfigError::invalid(QUEUE_LIMIT_VAR, &value, "must be positive")),
                Ok(limit) => limit,
                Err(e) => return Err(ConfigError::invalid(QUEUE_LIMIT_VAR, &value, e)),
            },
            None => defaults.queue_limit,
        };

        Ok(Self {
            admin: get(ADMIN_VAR).map_or(defaults.admin, |admin| admin.trim().to_string()),
            policy,
            utc_offset_hours,
            queue_limit,
            log_level: get(LOG_VAR).unwrap_or(defaults.log_level),
        })
    }

    /// Audit timestamp offset
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(crate::reducer::default_utc_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.admin, "Администратор #1");
        assert_eq!(config.utc_offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            (ADMIN_VAR, "Администратор #2"),
            (POLICY_VAR, "strict"),
            (UTC_OFFSET_VAR, "-5"),
            (QUEUE_LIMIT_VAR, "5"),
            (LOG_VAR, "debug"),
        ])
        .unwrap();
        assert_eq!(config.admin, "Администратор #2");
        assert_eq!(config.policy, CompletionPolicy::Strict);
        assert_eq!(config.utc_offset().local_minus_utc(), -5 * 3600);
        assert_eq!(config.queue_limit, 5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = load(&[(ADMIN_VAR, "  "), (QUEUE_LIMIT_VAR, "")]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_bad_values() {
        let err = load(&[(POLICY_VAR, "lenient")]).unwrap_err();
        assert!(err.to_string().contains(POLICY_VAR));

        assert!(load(&[(UTC_OFFSET_VAR, "15")]).is_err());
        assert!(load(&[(UTC_OFFSET_VAR, "three")]).is_err());
        assert!(load(&[(QUEUE_LIMIT_VAR, "0")]).is_err());
        assert!(load(&[(QUEUE_LIMIT_VAR, "-1")]).is_err());
    }
}
