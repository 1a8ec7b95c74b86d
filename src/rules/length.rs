//! Length rule - checks password minimum length.

use serde_json::Value;

use super::{Rule, field, number, require_object};
use crate::error::ConfigurationError;
use crate::explanation::Explanation;

/// Requires at least `minLength` characters.
///
/// Configuration: `{"minLength": <number>}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Length;

impl Rule for Length {
    fn validate(&self, options: &Value) -> Result<(), ConfigurationError> {
        require_object(options)?;
        if number(options, "minLength").is_none() {
            return Err(ConfigurationError::new(
                "length expects minLength to be a non-zero number",
            ));
        }
        Ok(())
    }

    fn assert(&self, options: &Value, password: &str) -> bool {
        let Some(min_length) = number(options, "minLength").and_then(|n| n.as_f64()) else {
            return false;
        };
        !password.is_empty() && min_length <= password.chars().count() as f64
    }

    fn explain(&self, options: &Value) -> Explanation {
        // "At least 1 characters" reads badly
        if number(options, "minLength").and_then(|n| n.as_f64()) == Some(1.0) {
            return Explanation::new("nonEmpty", "Non-empty password required");
        }
        Explanation::new("lengthAtLeast", "At least %d characters in length")
            .with_format(vec![field(options, "minLength").into()])
    }
}
