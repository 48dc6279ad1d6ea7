//! # Check Configuration
//!
//! Plain-data settings for a [`Checker`](crate::Checker). Extension hooks
//! are code and are registered on the checker itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings that change how figures are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Pre-check the data's kind against the kind a literal, mapping or
    /// sequence figure is itself shaped like.
    pub auto: bool,
    /// Maximum number of extension-hook rewrites per figure. `None` leaves
    /// termination to the hooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_limit: Option<usize>,
}

/// Error loading a [`CheckConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not a valid configuration.
    #[error("invalid check configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CheckConfig {
    /// Parse a configuration from a JSON document. Missing fields take
    /// their defaults; unknown fields are rejected.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
