//! `[log]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[log]` section - terminal logging.
///
/// # Example
/// ```toml
/// [log]
/// enable = false   # silence delivery and finalize messages
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Print `[registry]` and `[index]` messages to the terminal.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}
