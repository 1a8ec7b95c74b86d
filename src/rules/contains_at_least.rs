//! ContainsAtLeast rule - a minimum number of character classes must be present.

use serde_json::Value;

use super::{
    Rule, field, number, require_object, resolve_expressions, validate_expressions,
    verified_items,
};
use crate::charset::Charsets;
use crate::error::ConfigurationError;
use crate::explanation::{Explanation, FormatArg};

const MESSAGE: &str = "At least %d of the following %d types of characters:";
const CODE: &str = "containsAtLeast";

/// Requires matches for at least `atLeast` of the charsets in `expressions`.
///
/// Configuration: `{"atLeast": <number>, "expressions": ["lowerCase", ...]}`.
#[derive(Debug, Clone)]
pub struct ContainsAtLeast {
    charsets: Charsets,
}

impl ContainsAtLeast {
    pub fn new(charsets: Charsets) -> Self {
        Self { charsets }
    }

    fn threshold(options: &Value) -> f64 {
        number(options, "atLeast")
            .and_then(|n| n.as_f64())
            .unwrap_or(f64::NAN)
    }

    fn header(&self, options: &Value, total: usize) -> Explanation {
        Explanation::new(CODE, MESSAGE)
            .with_format(vec![field(options, "atLeast").into(), FormatArg::from(total)])
    }
}

impl Default for ContainsAtLeast {
    fn default() -> Self {
        Self::new(Charsets::builtin())
    }
}

impl Rule for ContainsAtLeast {
    fn validate(&self, options: &Value) -> Result<(), ConfigurationError> {
        require_object(options)?;

        let at_least = Self::threshold(options);
        if at_least.is_nan() || at_least < 1.0 {
            return Err(ConfigurationError::new(
                "atLeast should be a valid, non-NaN number, greater than 0",
            ));
        }

        let total = validate_expressions(
            &self.charsets,
            options,
            "expressions should be an non-empty array",
            "containsAtLeast expressions are invalid: each expression should name a registered charset",
        )?;
        if (total as f64) < at_least {
            return Err(ConfigurationError::new(
                "expressions length should be greater than atLeast",
            ));
        }
        Ok(())
    }

    fn assert(&self, options: &Value, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        let matching = resolve_expressions(&self.charsets, options)
            .iter()
            .filter(|charset| charset.test(password))
            .count();
        matching as f64 >= Self::threshold(options)
    }

    fn explain(&self, options: &Value) -> Explanation {
        let charsets = resolve_expressions(&self.charsets, options);
        let items = charsets.iter().map(|charset| charset.explain()).collect();
        self.header(options, charsets.len()).with_items(items)
    }

    fn missing(&self, options: &Value, password: &str) -> Explanation {
        let charsets = resolve_expressions(&self.charsets, options);
        let items = verified_items(&charsets, password);
        let matching = items.iter().filter(|item| item.is_verified()).count();
        let verified = matching as f64 >= Self::threshold(options);
        self.header(options, charsets.len())
            .with_items(items)
            .with_verified(verified)
    }
}
