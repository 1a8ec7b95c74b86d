//! Named, ready-made policies.
//!
//! | name        | rules                                                         |
//! |-------------|---------------------------------------------------------------|
//! | `none`      | non-empty                                                     |
//! | `low`       | 6+ characters                                                 |
//! | `fair`      | 8+ characters, lower, upper and numbers                       |
//! | `good`      | 8+ characters, 3 of lower/upper/numbers/special               |
//! | `excellent` | 10+ characters, 3 of 4 classes, at most 2 identical in a row  |

use std::sync::LazyLock;

use serde_json::{Value, json};

use crate::policy::Policy;

pub const NONE: &str = "none";
pub const LOW: &str = "low";
pub const FAIR: &str = "fair";
pub const GOOD: &str = "good";
pub const EXCELLENT: &str = "excellent";

fn build(config: Value) -> Policy {
    Policy::from_value(config).expect("built-in preset configuration is valid")
}

static NONE_POLICY: LazyLock<Policy> = LazyLock::new(|| build(json!({
    "length": {"minLength": 1}
})));

static LOW_POLICY: LazyLock<Policy> = LazyLock::new(|| build(json!({
    "length": {"minLength": 6}
})));

static FAIR_POLICY: LazyLock<Policy> = LazyLock::new(|| build(json!({
    "length": {"minLength": 8},
    "contains": {"expressions": ["lowerCase", "upperCase", "numbers"]}
})));

static GOOD_POLICY: LazyLock<Policy> = LazyLock::new(|| build(json!({
    "length": {"minLength": 8},
    "containsAtLeast": {
        "atLeast": 3,
        "expressions": ["lowerCase", "upperCase", "numbers", "specialCharacters"]
    }
})));

static EXCELLENT_POLICY: LazyLock<Policy> = LazyLock::new(|| build(json!({
    "length": {"minLength": 10},
    "containsAtLeast": {
        "atLeast": 3,
        "expressions": ["lowerCase", "upperCase", "numbers", "specialCharacters"]
    },
    "identicalChars": {"max": 2}
})));

/// Returns the preset called `name`, falling back to `none` for unknown names.
pub fn policy(name: &str) -> &'static Policy {
    match name {
        LOW => &LOW_POLICY,
        FAIR => &FAIR_POLICY,
        GOOD => &GOOD_POLICY,
        EXCELLENT => &EXCELLENT_POLICY,
        _ => &NONE_POLICY,
    }
}
