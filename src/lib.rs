//! Declarative password policy library
//!
//! This library checks passwords against a configured set of rules,
//! explains the policy in human-readable form and reports which rules a
//! given password does not satisfy.
//!
//! # Built-in rules
//!
//! - `length`: `{"minLength": n}`
//! - `contains`: `{"expressions": [charset, ...]}`
//! - `containsAtLeast`: `{"atLeast": n, "expressions": [charset, ...]}`
//! - `identicalChars`: `{"max": n}`
//!
//! Charsets are referenced by code: `upperCase`, `lowerCase`, `numbers`,
//! `specialCharacters`. Custom rules and charsets can be registered through
//! [`Ruleset`] and [`Charsets`].
//!
//! # Features
//!
//! - `async` (default): Enables channel-based report delivery with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_POLICY_PATH`: JSON policy file loaded by [`config::from_env`]
//! - `PWD_POLICY_PRESET`: preset used when no file is set (default: `none`)
//!
//! # Example
//!
//! ```rust
//! use pwd_policy::Policy;
//! use serde_json::json;
//!
//! let policy = Policy::from_value(json!({
//!     "length": {"minLength": 8},
//!     "contains": {"expressions": ["lowerCase", "upperCase", "numbers"]}
//! }))
//! .expect("valid policy");
//!
//! assert!(!policy.check("hello"));
//! assert!(policy.check("someP123"));
//! assert!(policy.assert("hello").is_err());
//!
//! println!("{}", policy);
//! println!("{}", policy.missing_as_markdown("hello"));
//! ```

// Internal modules
mod charset;
mod error;
mod explanation;
mod policy;
mod render;
mod rules;

pub mod config;
pub mod format;
pub mod presets;

#[cfg(feature = "async")]
pub mod feedback;

// Public API
pub use charset::{
    CharClass, Charset, Charsets, LOWER_CASE, NUMBERS, SPECIAL, SPECIAL_CHARACTERS, UPPER_CASE,
};
pub use error::{ConfigurationError, PolicyError, PolicyViolation};
pub use explanation::{Explanation, FormatArg};
pub use policy::{MissingReport, PasswordInput, Policy, PolicyBuilder};
pub use render::render;
pub use rules::{
    CONTAINS, CONTAINS_AT_LEAST, Contains, ContainsAtLeast, IDENTICAL_CHARS, IdenticalChars,
    LENGTH, Length, MAX_IDENTICAL_CHARS, Rule, Ruleset,
};
