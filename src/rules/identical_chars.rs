//! IdenticalChars rule - limits runs of the same character.

use serde_json::Value;

use super::{Rule, field, number, require_object};
use crate::error::ConfigurationError;
use crate::explanation::{Explanation, FormatArg};

/// Rejects passwords containing more than `max` identical characters in a row.
///
/// Configuration: `{"max": <number>}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdenticalChars;

/// Largest accepted `max`; bounds the counter-example built by `explain`.
pub const MAX_IDENTICAL_CHARS: u32 = u16::MAX as u32;

fn max(options: &Value) -> f64 {
    number(options, "max")
        .and_then(|n| n.as_f64())
        .unwrap_or(f64::NAN)
}

impl Rule for IdenticalChars {
    fn validate(&self, options: &Value) -> Result<(), ConfigurationError> {
        require_object(options)?;
        let max = max(options);
        if max.is_nan() || max < 1.0 {
            return Err(ConfigurationError::new("max should be a number greater than 1"));
        }
        if max > f64::from(MAX_IDENTICAL_CHARS) {
            return Err(ConfigurationError::new(format!(
                "max should not be greater than {}",
                MAX_IDENTICAL_CHARS
            )));
        }
        Ok(())
    }

    fn assert(&self, options: &Value, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        let max = max(options);
        let mut previous = None;
        let mut run = 0u64;

        for c in password.chars() {
            if previous == Some(c) {
                run += 1;
            } else {
                previous = Some(c);
                run = 1;
            }
            if run as f64 > max {
                return false;
            }
        }
        true
    }

    fn explain(&self, options: &Value) -> Explanation {
        let run = max(options).clamp(0.0, f64::from(MAX_IDENTICAL_CHARS)) as usize;
        let example = "a".repeat(run + 1);
        Explanation::new(
            "identicalChars",
            "No more than %d identical characters in a row (e.g., \"%s\" not allowed)",
        )
        .with_format(vec![field(options, "max").into(), FormatArg::Text(example)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(max: i64, verified: Option<bool>) -> Explanation {
        let example = "a".repeat(max as usize + 1);
        let e = Explanation::new(
            "identicalChars",
            "No more than %d identical characters in a row (e.g., \"%s\" not allowed)",
        )
        .with_format(vec![max.into(), example.into()]);
        match verified {
            Some(v) => e.with_verified(v),
            None => e,
        }
    }

    #[test]
    fn test_validate_rejects_bad_max() {
        for bad in [json!(false), json!(0), json!("hello"), json!(null)] {
            let err = IdenticalChars.validate(&json!({"max": bad})).unwrap_err();
            assert_eq!(err.message(), "max should be a number greater than 1");
        }
        let err = IdenticalChars.validate(&json!({})).unwrap_err();
        assert_eq!(err.message(), "max should be a number greater than 1");
    }

    #[test]
    fn test_validate_rejects_huge_max() {
        for huge in [json!(65536), json!(1e10), json!(1e19), json!(1e20)] {
            let err = IdenticalChars.validate(&json!({"max": huge})).unwrap_err();
            assert_eq!(err.message(), "max should not be greater than 65535");
        }
        assert!(IdenticalChars.validate(&json!({"max": 65535})).is_ok());
    }

    #[test]
    fn test_explain_huge_max_does_not_panic() {
        let explained = IdenticalChars.explain(&json!({"max": 1e19}));
        match explained.format.as_deref() {
            Some([_, FormatArg::Text(example)]) => assert_eq!(example.len(), 65536),
            other => panic!("unexpected format: {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_positive_max() {
        assert!(IdenticalChars.validate(&json!({"max": 2})).is_ok());
        assert!(IdenticalChars.validate(&json!({"max": 5})).is_ok());
    }

    #[test]
    fn test_explain() {
        let explained = IdenticalChars.explain(&json!({"max": 3}));
        assert_eq!(explained, message(3, None));
        assert_eq!(
            explained.formatted_message(),
            "No more than 3 identical characters in a row (e.g., \"aaaa\" not allowed)"
        );
    }

    #[test]
    fn test_missing() {
        assert_eq!(
            IdenticalChars.missing(&json!({"max": 3}), "aaaa"),
            message(3, Some(false))
        );
        assert_eq!(
            IdenticalChars.missing(&json!({"max": 3}), "baaa"),
            message(3, Some(true))
        );
        assert_eq!(
            IdenticalChars.missing(&json!({"max": 2}), "abc"),
            message(2, Some(true))
        );
    }

    #[test]
    fn test_assert() {
        assert!(!IdenticalChars.assert(&json!({"max": 2}), "aaa"));
        assert!(IdenticalChars.assert(&json!({"max": 2}), "abc"));
        assert!(IdenticalChars.assert(&json!({"max": 3}), "helllo"));
        assert!(!IdenticalChars.assert(&json!({"max": 3}), "hellllo"));
        assert!(!IdenticalChars.assert(&json!({"max": 3}), "123333334"));
        assert!(!IdenticalChars.assert(&json!({"max": 3}), ""));
    }
}
