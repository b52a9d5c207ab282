//! `[script]` section configuration.
//!
//! Names of the variables and functions the generated page scripts use.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[script]` section - generated script identifiers.
///
/// # Example
/// ```toml
/// [script]
/// implementors = "implementors"
/// sources = "srcIndex"
/// sidebar = "createSrcSidebar"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    /// Local table variable in an implementors script.
    #[serde(default = "defaults::script::implementors")]
    #[educe(Default = defaults::script::implementors())]
    pub implementors: String,

    /// Table variable in the source-files script.
    #[serde(default = "defaults::script::sources")]
    #[educe(Default = defaults::script::sources())]
    pub sources: String,

    /// Consumer function looked up on `window`.
    #[serde(default = "defaults::script::register")]
    #[educe(Default = defaults::script::register())]
    pub register: String,

    /// Pending slot assigned on `window` when no consumer exists.
    #[serde(default = "defaults::script::pending")]
    #[educe(Default = defaults::script::pending())]
    pub pending: String,

    /// Function called once all source trees are inserted.
    #[serde(default = "defaults::script::sidebar")]
    #[educe(Default = defaults::script::sidebar())]
    pub sidebar: String,
}

impl ScriptConfig {
    /// All identifiers paired with their field name, for validation.
    pub(crate) fn identifiers(&self) -> [(&'static str, &str); 5] {
        [
            ("implementors", self.implementors.as_str()),
            ("sources", self.sources.as_str()),
            ("register", self.register.as_str()),
            ("pending", self.pending.as_str()),
            ("sidebar", self.sidebar.as_str()),
        ]
    }
}
