//! Password rules
//!
//! Each rule checks one aspect of a password against its own configuration.
//! Rules are stateless; the configuration is passed to every call.

mod contains;
mod contains_at_least;
mod identical_chars;
mod length;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Number, Value};

use crate::charset::{Charset, Charsets};
use crate::error::ConfigurationError;
use crate::explanation::Explanation;

pub use contains::Contains;
pub use contains_at_least::ContainsAtLeast;
pub use identical_chars::{IdenticalChars, MAX_IDENTICAL_CHARS};
pub use length::Length;

pub const LENGTH: &str = "length";
pub const CONTAINS: &str = "contains";
pub const CONTAINS_AT_LEAST: &str = "containsAtLeast";
pub const IDENTICAL_CHARS: &str = "identicalChars";

/// A pluggable validation unit.
///
/// `validate` is called once per policy construction; the other operations
/// may assume the configuration passed validation, but must not panic when
/// it did not.
pub trait Rule: Send + Sync {
    /// Rejects a structurally invalid configuration.
    fn validate(&self, options: &Value) -> Result<(), ConfigurationError>;

    /// Whether `password` satisfies the rule. Always `false` for an empty password.
    fn assert(&self, options: &Value, password: &str) -> bool;

    /// Password-independent description of the rule.
    fn explain(&self, options: &Value) -> Explanation;

    /// [`explain`](Rule::explain) annotated with the outcome for `password`.
    fn missing(&self, options: &Value, password: &str) -> Explanation {
        self.explain(options)
            .with_verified(self.assert(options, password))
    }
}

/// Lookup table from rule name to implementation.
#[derive(Clone)]
pub struct Ruleset {
    rules: BTreeMap<String, Arc<dyn Rule>>,
}

impl Ruleset {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// The four built-in rules over the built-in charsets.
    pub fn builtin() -> Self {
        Self::with_charsets(Charsets::builtin())
    }

    /// The four built-in rules, resolving `expressions` against `charsets`.
    pub fn with_charsets(charsets: Charsets) -> Self {
        Self::new()
            .with(LENGTH, Arc::new(Length))
            .with(CONTAINS, Arc::new(Contains::new(charsets.clone())))
            .with(CONTAINS_AT_LEAST, Arc::new(ContainsAtLeast::new(charsets)))
            .with(IDENTICAL_CHARS, Arc::new(IdenticalChars))
    }

    /// Registers `rule` under `name`, replacing any previous entry.
    pub fn with(mut self, name: impl Into<String>, rule: Arc<dyn Rule>) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}

pub(crate) fn require_object(options: &Value) -> Result<&Map<String, Value>, ConfigurationError> {
    options
        .as_object()
        .ok_or_else(|| ConfigurationError::new("options should be an object"))
}

pub(crate) fn number<'a>(options: &'a Value, key: &str) -> Option<&'a Number> {
    match options.get(key) {
        Some(Value::Number(n)) => Some(n),
        _ => None,
    }
}

/// Field value as-is, `null` when absent. Used for format arguments.
pub(crate) fn field(options: &Value, key: &str) -> Value {
    options.get(key).cloned().unwrap_or(Value::Null)
}

/// Checks that `expressions` is a non-empty array of registered charset codes.
pub(crate) fn validate_expressions(
    charsets: &Charsets,
    options: &Value,
    empty: &str,
    invalid: &str,
) -> Result<usize, ConfigurationError> {
    let expressions = match options.get("expressions") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(ConfigurationError::new(empty)),
    };
    let known = expressions
        .iter()
        .all(|e| e.as_str().is_some_and(|code| charsets.contains(code)));
    if !known {
        return Err(ConfigurationError::new(invalid));
    }
    Ok(expressions.len())
}

/// Charsets named by `expressions`, in configuration order. Unknown codes are skipped.
pub(crate) fn resolve_expressions<'a>(
    charsets: &'a Charsets,
    options: &Value,
) -> Vec<&'a Arc<dyn Charset>> {
    options
        .get("expressions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|code| charsets.get(code))
                .collect()
        })
        .unwrap_or_default()
}

/// One child per charset, each carrying its own `verified` flag.
pub(crate) fn verified_items(charsets: &[&Arc<dyn Charset>], password: &str) -> Vec<Explanation> {
    charsets
        .iter()
        .map(|charset| charset.explain().with_verified(charset.test(password)))
        .collect()
}
