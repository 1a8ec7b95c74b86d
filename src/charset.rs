//! Character classes used by the composite rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::explanation::Explanation;

/// OWASP password special characters: space plus 32 punctuation symbols.
pub const SPECIAL_CHARACTERS: &str = " !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// A named character-class predicate.
pub trait Charset: Send + Sync {
    /// Stable identifier, also used to reference the charset from configuration.
    fn code(&self) -> &str;

    /// Static, human-readable label.
    fn explain(&self) -> Explanation;

    /// Whether any character of `password` belongs to the class.
    fn test(&self, password: &str) -> bool;
}

/// A [`Charset`] backed by a per-character predicate.
#[derive(Clone, Copy)]
pub struct CharClass {
    code: &'static str,
    message: &'static str,
    predicate: fn(char) -> bool,
}

impl CharClass {
    pub const fn new(
        code: &'static str,
        message: &'static str,
        predicate: fn(char) -> bool,
    ) -> Self {
        Self {
            code,
            message,
            predicate,
        }
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharClass").field("code", &self.code).finish()
    }
}

impl Charset for CharClass {
    fn code(&self) -> &str {
        self.code
    }

    fn explain(&self) -> Explanation {
        Explanation::new(self.code, self.message)
    }

    fn test(&self, password: &str) -> bool {
        password.chars().any(self.predicate)
    }
}

fn is_upper(c: char) -> bool {
    c.is_ascii_uppercase()
}

fn is_lower(c: char) -> bool {
    c.is_ascii_lowercase()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_special(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(c)
}

pub static UPPER_CASE: CharClass =
    CharClass::new("upperCase", "upper case letters (A-Z)", is_upper);

pub static LOWER_CASE: CharClass =
    CharClass::new("lowerCase", "lower case letters (a-z)", is_lower);

pub static NUMBERS: CharClass = CharClass::new("numbers", "numbers (i.e. 0-9)", is_digit);

pub static SPECIAL: CharClass =
    CharClass::new("specialCharacters", "special characters (e.g. !@#$%^&*)", is_special);

/// Lookup table from charset code to implementation.
#[derive(Clone, Default)]
pub struct Charsets {
    by_code: BTreeMap<String, Arc<dyn Charset>>,
}

impl Charsets {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// `upperCase`, `lowerCase`, `numbers` and `specialCharacters`.
    pub fn builtin() -> Self {
        Self::new()
            .with(Arc::new(UPPER_CASE))
            .with(Arc::new(LOWER_CASE))
            .with(Arc::new(NUMBERS))
            .with(Arc::new(SPECIAL))
    }

    /// Registers `charset` under its own code, replacing any previous entry.
    pub fn with(mut self, charset: Arc<dyn Charset>) -> Self {
        self.by_code.insert(charset.code().to_string(), charset);
        self
    }

    pub fn get(&self, code: &str) -> Option<&Arc<dyn Charset>> {
        self.by_code.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }
}

impl fmt::Debug for Charsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_code.keys()).finish()
    }
}
