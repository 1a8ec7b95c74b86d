//! Policies: ordered sets of configured rules evaluated together.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PolicyError, PolicyViolation};
use crate::explanation::Explanation;
use crate::render::render;
use crate::rules::Ruleset;

/// Anything a password can be read from.
///
/// `None` means the value is not a string; queries treat it as a failing
/// password instead of erroring.
pub trait PasswordInput {
    fn as_password(&self) -> Option<&str>;
}

impl PasswordInput for str {
    fn as_password(&self) -> Option<&str> {
        Some(self)
    }
}

impl PasswordInput for String {
    fn as_password(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl PasswordInput for SecretString {
    fn as_password(&self) -> Option<&str> {
        Some(self.expose_secret())
    }
}

impl PasswordInput for Value {
    fn as_password(&self) -> Option<&str> {
        self.as_str()
    }
}

impl<T: PasswordInput> PasswordInput for Option<T> {
    fn as_password(&self) -> Option<&str> {
        self.as_ref().and_then(|password| password.as_password())
    }
}

impl<T: PasswordInput + ?Sized> PasswordInput for &T {
    fn as_password(&self) -> Option<&str> {
        (**self).as_password()
    }
}

/// Result of [`Policy::missing`]: one annotated explanation per rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReport {
    pub rules: Vec<Explanation>,
    pub verified: bool,
}

/// An immutable set of rule configurations bound to a ruleset.
///
/// Rules are evaluated and reported in configuration order.
#[derive(Debug, Clone)]
pub struct Policy {
    rules: Map<String, Value>,
    ruleset: Ruleset,
}

impl Policy {
    /// Creates a policy over the built-in rules.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Configuration`] for the first rule whose
    /// configuration fails validation.
    pub fn new(rules: Map<String, Value>) -> Result<Self, PolicyError> {
        Self::with_ruleset(rules, Ruleset::builtin())
    }

    /// Creates a policy whose rule names are resolved against `ruleset`.
    ///
    /// Names without an implementation are accepted here and fail at
    /// [`check`](Policy::check) time.
    pub fn with_ruleset(rules: Map<String, Value>, ruleset: Ruleset) -> Result<Self, PolicyError> {
        for (name, options) in &rules {
            let Some(rule) = ruleset.get(name) else {
                continue;
            };
            if let Err(source) = rule.validate(options) {
                #[cfg(feature = "tracing")]
                tracing::warn!("Rule {} rejected its configuration: {}", name, source);
                return Err(PolicyError::Configuration {
                    rule: name.clone(),
                    source,
                });
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Password policy created with {} rules", rules.len());

        Ok(Self { rules, ruleset })
    }

    /// Creates a policy from a JSON object mapping rule names to options.
    pub fn from_value(value: Value) -> Result<Self, PolicyError> {
        match value {
            Value::Object(rules) => Self::new(rules),
            _ => Err(PolicyError::NotAnObject),
        }
    }

    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Configured rule names, in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Whether `password` satisfies every rule.
    ///
    /// Every rule is evaluated even after one has failed.
    pub fn check<P: PasswordInput + ?Sized>(&self, password: &P) -> bool {
        match password.as_password() {
            Some(password) => self.apply_rules(password),
            None => false,
        }
    }

    fn apply_rules(&self, password: &str) -> bool {
        self.rules
            .iter()
            .fold(true, |verified, (name, options)| {
                let passed = match self.ruleset.get(name) {
                    Some(rule) => rule.assert(options, password),
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("No implementation for configured rule {}", name);
                        false
                    }
                };
                verified && passed
            })
    }

    /// Like [`check`](Policy::check), but fails with [`PolicyViolation`].
    pub fn assert<P: PasswordInput + ?Sized>(&self, password: &P) -> Result<(), PolicyViolation> {
        if self.check(password) {
            Ok(())
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("Password rejected by policy");
            Err(PolicyViolation)
        }
    }

    /// One explanation per rule, in configuration order.
    pub fn explain(&self) -> Vec<Explanation> {
        self.rules
            .iter()
            .map(|(name, options)| match self.ruleset.get(name) {
                Some(rule) => rule.explain(options),
                None => unknown_rule(name),
            })
            .collect()
    }

    /// Per-rule outcome for `password`. `verified` equals [`check`](Policy::check).
    pub fn missing<P: PasswordInput + ?Sized>(&self, password: &P) -> MissingReport {
        let password = password.as_password();
        let rules: Vec<Explanation> = self
            .rules
            .iter()
            .map(|(name, options)| match (self.ruleset.get(name), password) {
                (Some(rule), Some(password)) => rule.missing(options, password),
                (Some(rule), None) => rule.explain(options).with_verified(false),
                (None, _) => unknown_rule(name).with_verified(false),
            })
            .collect();
        let verified = password.is_some() && rules.iter().all(Explanation::is_verified);
        MissingReport { rules, verified }
    }

    /// [`missing`](Policy::missing) rendered one level in, as nested bullets.
    pub fn missing_as_markdown<P: PasswordInput + ?Sized>(&self, password: &P) -> String {
        render(&self.missing(password).rules, 1)
    }

    /// Human-readable bullet list of the policy.
    pub fn describe(&self) -> String {
        render(&self.explain(), 0)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn unknown_rule(name: &str) -> Explanation {
    Explanation::new("unknownRule", "Unknown rule \"%s\"").with_format(vec![name.into()])
}

/// Incremental construction of a [`Policy`].
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    rules: Map<String, Value>,
    ruleset: Option<Ruleset>,
}

impl PolicyBuilder {
    /// Adds (or replaces) the configuration for rule `name`.
    pub fn rule(mut self, name: impl Into<String>, options: Value) -> Self {
        self.rules.insert(name.into(), options);
        self
    }

    pub fn ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = Some(ruleset);
        self
    }

    pub fn build(self) -> Result<Policy, PolicyError> {
        Policy::with_ruleset(self.rules, self.ruleset.unwrap_or_default())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn every_rule() -> Policy {
        Policy::from_value(json!({
            "length": {"minLength": 4},
            "contains": {"expressions": ["lowerCase", "numbers"]},
            "containsAtLeast": {
                "atLeast": 2,
                "expressions": ["lowerCase", "upperCase", "specialCharacters"]
            },
            "identicalChars": {"max": 2}
        }))
        .unwrap()
    }

    fn has_run(password: &str, len: usize) -> bool {
        let chars: Vec<char> = password.chars().collect();
        chars.windows(len).any(|w| w.iter().all(|c| *c == w[0]))
    }

    proptest! {
        #[test]
        fn prop_length_matches_char_count(password in ".{0,20}", n in 1u64..12) {
            let policy = Policy::from_value(json!({"length": {"minLength": n}})).unwrap();
            let expected = !password.is_empty() && password.chars().count() as u64 >= n;
            prop_assert_eq!(policy.check(password.as_str()), expected);
        }

        #[test]
        fn prop_contains_is_conjunction(password in "[a-zA-Z0-9!@ ]{0,12}") {
            let policy = Policy::from_value(json!({
                "contains": {"expressions": ["upperCase", "numbers"]}
            }))
            .unwrap();
            let expected = !password.is_empty()
                && password.chars().any(|c| c.is_ascii_uppercase())
                && password.chars().any(|c| c.is_ascii_digit());
            prop_assert_eq!(policy.check(password.as_str()), expected);
        }

        #[test]
        fn prop_contains_at_least_counts_matches(password in "[a-zA-Z0-9]{1,12}", k in 1u64..=3) {
            let policy = Policy::from_value(json!({
                "containsAtLeast": {
                    "atLeast": k,
                    "expressions": ["lowerCase", "upperCase", "numbers"]
                }
            }))
            .unwrap();
            let count = [
                password.chars().any(|c| c.is_ascii_lowercase()),
                password.chars().any(|c| c.is_ascii_uppercase()),
                password.chars().any(|c| c.is_ascii_digit()),
            ]
            .iter()
            .filter(|b| **b)
            .count() as u64;
            prop_assert_eq!(policy.check(password.as_str()), count >= k);
        }

        #[test]
        fn prop_identical_chars_detects_runs(password in "[ab]{1,12}", max in 1usize..4) {
            let policy = Policy::from_value(json!({"identicalChars": {"max": max}})).unwrap();
            prop_assert_eq!(policy.check(password.as_str()), !has_run(&password, max + 1));
        }

        #[test]
        fn prop_missing_verified_matches_check(password in ".{0,16}") {
            let policy = every_rule();
            prop_assert_eq!(
                policy.missing(password.as_str()).verified,
                policy.check(password.as_str())
            );
        }
    }
}
