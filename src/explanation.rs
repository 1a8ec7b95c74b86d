//! Structured, localizable descriptions of rules.
//!
//! An [`Explanation`] carries a stable `code` for i18n lookups, a message
//! template with `%`-style placeholders, and the ordered values to
//! substitute into it. Composite rules nest one child per charset.

use serde::Serialize;
use serde_json::{Number, Value};

use crate::format;

/// A single substitution value for a message template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormatArg {
    Text(String),
    Number(Number),
    Json(Value),
}

impl FormatArg {
    /// String conversion used by `%s` and by trailing arguments.
    pub fn to_text(&self) -> String {
        match self {
            FormatArg::Text(s) => s.clone(),
            FormatArg::Number(n) => format::number_to_string(n.as_f64().unwrap_or(f64::NAN)),
            FormatArg::Json(v) => json_to_text(v),
        }
    }

    /// Numeric conversion used by `%d`.
    pub fn to_number(&self) -> f64 {
        match self {
            FormatArg::Text(s) => text_to_number(s),
            FormatArg::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            FormatArg::Json(v) => json_to_number(v),
        }
    }

    /// JSON conversion used by `%j`. `None` when the value cannot be serialized.
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Arrays and objects are appended as JSON when left over after substitution.
    pub(crate) fn is_structured(&self) -> bool {
        matches!(self, FormatArg::Json(Value::Array(_) | Value::Object(_)))
    }
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format::number_to_string(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => json_to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn text_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed.chars().all(|c| c.is_ascii_digit() || "+-.eE".contains(c)) => {
            trimmed.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

fn json_to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => text_to_number(s),
        Value::Array(items) if items.is_empty() => 0.0,
        Value::Array(items) if items.len() == 1 => text_to_number(&json_to_text(&items[0])),
        _ => f64::NAN,
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Text(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Text(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Number(value.into())
    }
}

impl From<u64> for FormatArg {
    fn from(value: u64) -> Self {
        FormatArg::Number(value.into())
    }
}

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        FormatArg::Number((value as u64).into())
    }
}

impl From<Number> for FormatArg {
    fn from(value: Number) -> Self {
        FormatArg::Number(value)
    }
}

impl From<Value> for FormatArg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FormatArg::Text(s),
            Value::Number(n) => FormatArg::Number(n),
            other => FormatArg::Json(other),
        }
    }
}

/// Description of a rule or charset, optionally annotated with whether a
/// given password satisfies it.
///
/// `verified` is `None` on everything produced by `explain` and `Some` on
/// every node produced by `missing`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Vec<FormatArg>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Explanation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl Explanation {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            format: None,
            items: Vec::new(),
            verified: None,
        }
    }

    pub fn with_format(mut self, format: Vec<FormatArg>) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_items(mut self, items: Vec<Explanation>) -> Self {
        self.items = items;
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` only when the node was evaluated and passed.
    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }

    /// The message with its format arguments substituted, or the raw
    /// message when there is no format list.
    pub fn formatted_message(&self) -> String {
        match &self.format {
            Some(args) => format::format(&self.message, args),
            None => self.message.clone(),
        }
    }
}
