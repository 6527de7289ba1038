//! Configuration management for the tasklist binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Variable holding the tracing filter
pub const LOG_VAR: &str = "TASKLIST_LOG";
/// Variable that disables styling when set to anything
///
/// `NO_COLOR` and `CLICOLOR` are honoured by `colored` itself.
pub const PLAIN_VAR: &str = "TASKLIST_PLAIN";
/// Variable holding the store feedback bound
pub const MAX_FEEDBACK_VAR: &str = "TASKLIST_MAX_FEEDBACK";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable did not parse
    #[error("Invalid value for {var}: {value:?} (expected a positive integer)")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Whether to style output (strike-through for done items)
    pub styled: bool,
    /// Maximum actions effects may feed back per user interaction
    pub max_feedback_actions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "tasklist=info".to_string(),
            styled: true,
            max_feedback_actions: 64,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] if `TASKLIST_MAX_FEEDBACK` is
    /// set but is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let styled = lookup(PLAIN_VAR).is_none();

        let max_feedback_actions = match lookup(MAX_FEEDBACK_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: MAX_FEEDBACK_VAR,
                        value,
                    });
                },
            },
            None => defaults.max_feedback_actions,
        };

        Ok(Self {
            log_filter,
            styled,
            max_feedback_actions,
        })
    }
}
