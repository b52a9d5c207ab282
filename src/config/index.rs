//! `[index]` section configuration.
//!
//! Controls how the source index reacts to a repeated `finalize` call and to
//! packages inserted more than once. Both checks sit on top of the base
//! mechanism, which overwrites silently and finalizes once.

use educe::Educe;
use serde::{Deserialize, Serialize};

/// What a second `finalize` on the same table does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalizePolicy {
    /// Second call fails with `IndexError::AlreadyFinalized`.
    #[default]
    Once,
    /// Second call is a no-op; the sidebar builder is not invoked again.
    Idempotent,
}

/// What inserting a package that is already present does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the previous tree.
    #[default]
    Overwrite,
    /// Replace the previous tree and log a warning.
    Warn,
    /// Keep the previous tree and fail with `IndexError::Duplicate`.
    Reject,
}

/// `[index]` section - source index checks.
///
/// # Example
/// ```toml
/// [index]
/// finalize = "idempotent"
/// duplicates = "reject"
/// expected = ["bitfrob", "gba2k"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    #[serde(default)]
    pub finalize: FinalizePolicy,

    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Packages that must have been inserted before `finalize` succeeds.
    /// Empty disables the check.
    #[serde(default)]
    pub expected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::super::GlueConfig;
    use super::*;

    #[test]
    fn test_index_config_full() {
        let config = r#"
            [index]
            finalize = "idempotent"
            duplicates = "reject"
            expected = ["bitfrob", "gba2k"]
        "#;
        let config: GlueConfig = toml::from_str(config).unwrap();

        assert_eq!(config.index.finalize, FinalizePolicy::Idempotent);
        assert_eq!(config.index.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.index.expected, vec!["bitfrob", "gba2k"]);
    }

    #[test]
    fn test_index_config_defaults() {
        let config: GlueConfig = toml::from_str("[index]\n").unwrap();

        assert_eq!(config.index.finalize, FinalizePolicy::Once);
        assert_eq!(config.index.duplicates, DuplicatePolicy::Overwrite);
        assert!(config.index.expected.is_empty());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<GlueConfig, _> = toml::from_str("[index]\nfinalize = \"twice\"\n");
        assert!(result.is_err());
    }
}
