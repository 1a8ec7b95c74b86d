//! Contains rule - every configured character class must be present.

use serde_json::Value;

use super::{Rule, require_object, resolve_expressions, validate_expressions, verified_items};
use crate::charset::Charsets;
use crate::error::ConfigurationError;
use crate::explanation::Explanation;

const MESSAGE: &str = "Should contain:";
const CODE: &str = "shouldContain";

/// Requires a match for every charset listed in `expressions`.
///
/// Configuration: `{"expressions": ["upperCase", "numbers", ...]}`.
#[derive(Debug, Clone)]
pub struct Contains {
    charsets: Charsets,
}

impl Contains {
    pub fn new(charsets: Charsets) -> Self {
        Self { charsets }
    }
}

impl Default for Contains {
    fn default() -> Self {
        Self::new(Charsets::builtin())
    }
}

impl Rule for Contains {
    fn validate(&self, options: &Value) -> Result<(), ConfigurationError> {
        require_object(options)?;
        validate_expressions(
            &self.charsets,
            options,
            "contains expects expressions to be a non-empty array",
            "contains expressions are invalid: each expression should name a registered charset",
        )?;
        Ok(())
    }

    fn assert(&self, options: &Value, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        resolve_expressions(&self.charsets, options)
            .iter()
            .all(|charset| charset.test(password))
    }

    fn explain(&self, options: &Value) -> Explanation {
        let items = resolve_expressions(&self.charsets, options)
            .iter()
            .map(|charset| charset.explain())
            .collect();
        Explanation::new(CODE, MESSAGE).with_items(items)
    }

    fn missing(&self, options: &Value, password: &str) -> Explanation {
        let items = verified_items(&resolve_expressions(&self.charsets, options), password);
        let verified = items.iter().all(Explanation::is_verified);
        Explanation::new(CODE, MESSAGE)
            .with_items(items)
            .with_verified(verified)
    }
}
