//! Error types for policy construction and enforcement.

use std::path::PathBuf;
use thiserror::Error;

/// Raised by [`Rule::validate`](crate::Rule::validate) when a rule's
/// configuration is structurally invalid.
///
/// The message names the violated constraint and is stable: callers and
/// tests are allowed to match on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConfigurationError {
    message: String,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that prevent a [`Policy`](crate::Policy) from being created.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("invalid configuration for rule `{rule}`: {source}")]
    Configuration {
        rule: String,
        #[source]
        source: ConfigurationError,
    },
    #[error("Policy file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read policy file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse policy configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Policy configuration should be an object mapping rule names to options")]
    NotAnObject,
}

impl PolicyError {
    /// Returns the rule-level error when construction failed validation.
    pub fn configuration(&self) -> Option<&ConfigurationError> {
        match self {
            PolicyError::Configuration { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Returned by [`Policy::assert`](crate::Policy::assert) when a password
/// does not satisfy the policy.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Password does not meet password policy")]
pub struct PolicyViolation;
