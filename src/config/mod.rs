//! Session configuration.
//!
//! # Sections
//!
//! | Section     | Purpose                                            |
//! |-------------|----------------------------------------------------|
//! | `[log]`     | Terminal logging switch                            |
//! | `[index]`   | Finalize policy and layered source index checks    |
//! | `[script]`  | Identifiers used by the generated page scripts     |
//!
//! # Example
//!
//! ```toml
//! [log]
//! enable = false
//!
//! [index]
//! finalize = "idempotent"
//! duplicates = "warn"
//! expected = ["bitfrob", "gba2k", "voladdress"]
//!
//! [script]
//! sidebar = "createSrcSidebar"
//! ```

pub mod defaults;
mod error;
mod index;
mod log;
mod script;

pub use error::ConfigError;
pub use index::{DuplicatePolicy, FinalizePolicy, IndexConfig};
pub use log::LogConfig;
pub use script::ScriptConfig;

use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct GlueConfig {
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,

    /// Source index settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Generated script identifiers
    #[serde(default)]
    pub script: ScriptConfig,
}

impl GlueConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: GlueConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = self.script.identifiers();

        for (field, name) in &names {
            if !is_identifier(name) {
                return Err(ConfigError::Validation(format!(
                    "[script.{field}] `{name}` is not a valid identifier"
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for (field, name) in &names {
            if !seen.insert(*name) {
                return Err(ConfigError::Validation(format!(
                    "[script.{field}] `{name}` is used by more than one field"
                )));
            }
        }

        let mut expected = BTreeSet::new();
        for package in &self.index.expected {
            if !expected.insert(package.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "[index.expected] lists `{package}` more than once"
                )));
            }
        }

        Ok(())
    }
}

/// Check that `name` is a plain JavaScript identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
