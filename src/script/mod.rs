//! Generated page scripts.
//!
//! The documentation generator writes the tables as small scripts. Two
//! shapes exist, one implementors script per trait:
//!
//! ```text
//! (function() {var implementors = {};
//! implementors["gba2k"] = [{"text":"impl Clone for ...","synthetic":false,"types":["..."]}];
//! if (window.register_implementors) {window.register_implementors(implementors);} else {window.pending_implementors = implementors;}})()
//! ```
//!
//! and one source-files script per site:
//!
//! ```text
//! var sourcesIndex = {};
//! sourcesIndex["bitfrob"] = {"name":"","files":["fns.rs","lib.rs"]};
//! createSourceSidebar();
//! ```
//!
//! [`parse`] turns either into [`Statement`]s and [`emit`] writes them back.
//! Identifiers come from [`ScriptConfig`](crate::config::ScriptConfig).

pub mod emit;
pub mod parse;
pub mod paths;

use thiserror::Error;

use crate::data::{DirectoryNode, ImplementorEntry};

pub use emit::{implementors_script, sources_script};
pub use parse::parse_script;
pub use paths::{SOURCE_FILES_SCRIPT, implementors_path, trait_path};

/// One top-level statement of a generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `var <name> = {};`
    Declare { var: String },
    /// `implementors["<package>"] = [...];`
    Implementors {
        package: String,
        entries: Vec<ImplementorEntry>,
    },
    /// `sourcesIndex["<package>"] = {...};`
    Source { package: String, root: DirectoryNode },
    /// The register-if-present-else-stash tail of an implementors script.
    Register,
    /// `createSourceSidebar();`
    Sidebar,
}

/// Script codec failures.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unrecognized statement `{text}`")]
    Unrecognized { line: usize, text: String },

    #[error("line {line}: invalid JSON assigned to `{var}`")]
    Json {
        line: usize,
        var: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid trait path `{0}`")]
    TraitPath(String),
}
