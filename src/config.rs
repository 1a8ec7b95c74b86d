//! Policy configuration loading
//!
//! Builds policies from JSON documents mapping rule names to options, e.g.
//!
//! ```json
//! {
//!     "length": {"minLength": 8},
//!     "contains": {"expressions": ["lowerCase", "upperCase", "numbers"]}
//! }
//! ```
//!
//! Key order in the document is kept and decides evaluation order.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::PolicyError;
use crate::policy::Policy;
use crate::presets;

/// Environment variable holding the path of a policy file.
pub const POLICY_PATH_ENV: &str = "PWD_POLICY_PATH";

/// Environment variable naming a preset, used when no policy file is set.
pub const POLICY_PRESET_ENV: &str = "PWD_POLICY_PRESET";

/// Returns the policy file path from `PWD_POLICY_PATH`, if set.
pub fn get_policy_path() -> Option<PathBuf> {
    std::env::var(POLICY_PATH_ENV).ok().map(PathBuf::from)
}

/// Parses a JSON policy document and builds it over the built-in rules.
///
/// # Errors
///
/// Returns error if:
/// - the text is not valid JSON
/// - the document is not an object
/// - a rule configuration is invalid
pub fn from_json(text: &str) -> Result<Policy, PolicyError> {
    let value: Value = serde_json::from_str(text)?;
    Policy::from_value(value)
}

/// Loads a policy from a JSON file.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File content is not a valid policy
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Policy, PolicyError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Policy loading FAILED: FileNotFound {:?}", path);
        return Err(PolicyError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let policy = from_json(&content)?;

    #[cfg(feature = "tracing")]
    tracing::info!("Policy loaded from {:?}", path);

    Ok(policy)
}

/// Loads the policy configured through the environment.
///
/// Priority:
/// 1. File named by `PWD_POLICY_PATH`
/// 2. Preset named by `PWD_POLICY_PRESET`
/// 3. The `none` preset
pub fn from_env() -> Result<Policy, PolicyError> {
    if let Some(path) = get_policy_path() {
        return from_path(path);
    }
    let preset = std::env::var(POLICY_PRESET_ENV).unwrap_or_else(|_| presets::NONE.to_string());

    #[cfg(feature = "tracing")]
    tracing::info!("Using password policy preset {}", preset);

    Ok(presets::policy(&preset).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: serialized tests only
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: serialized tests only
        unsafe { std::env::remove_var(key); }
    }

    fn policy_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "{}", content).expect("Failed to write");
        temp_file
    }

    #[test]
    fn test_from_json_keeps_key_order() {
        let policy = from_json(
            r#"{"identicalChars": {"max": 2}, "length": {"minLength": 8}, "contains": {"expressions": ["numbers"]}}"#,
        )
        .unwrap();
        let names: Vec<_> = policy.rule_names().collect();
        assert_eq!(names, ["identicalChars", "length", "contains"]);
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(from_json("{length"), Err(PolicyError::Parse(_))));
        assert!(matches!(from_json("[1, 2]"), Err(PolicyError::NotAnObject)));
    }

    #[test]
    fn test_from_json_invalid_rule() {
        let err = from_json(r#"{"identicalChars": {"max": 0}}"#).unwrap_err();
        assert_eq!(
            err.configuration().map(|e| e.message()),
            Some("max should be a number greater than 1")
        );
    }

    #[test]
    fn test_from_path() {
        let file = policy_file(r#"{"length": {"minLength": 6}}"#);
        let policy = from_path(file.path()).unwrap();
        assert!(!policy.check("hello"));
        assert!(policy.check("hello!"));
    }

    #[test]
    fn test_from_path_not_found() {
        let result = from_path("/nonexistent/path/policy.json");
        assert!(matches!(result, Err(PolicyError::FileNotFound(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_path() {
        let file = policy_file(r#"{"length": {"minLength": 3}}"#);
        set_env(POLICY_PATH_ENV, file.path().to_str().unwrap());

        let policy = from_env().unwrap();
        assert!(policy.check("abc"));
        assert!(!policy.check("ab"));

        remove_env(POLICY_PATH_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_preset() {
        remove_env(POLICY_PATH_ENV);
        set_env(POLICY_PRESET_ENV, presets::LOW);

        let policy = from_env().unwrap();
        assert_eq!(policy.describe(), "* At least 6 characters in length");

        remove_env(POLICY_PRESET_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_none() {
        remove_env(POLICY_PATH_ENV);
        remove_env(POLICY_PRESET_ENV);

        let policy = from_env().unwrap();
        assert!(!policy.check(""));
        assert!(policy.check("a"));
    }
}
