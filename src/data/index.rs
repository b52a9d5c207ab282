//! Source index table builder.
//!
//! The source-files script inserts one directory tree per package and then
//! finalizes the table, which hands it to the sidebar builder.
//!
//! # State
//!
//! ```text
//! Empty ──insert──► Accumulating ──finalize──► Finalized
//!   ▲                                              │
//!   └──────────────────── reset ◄──────────────────┘
//! ```
//!
//! Inserting after finalization is rejected. A second finalize follows the
//! configured [`FinalizePolicy`].

use std::sync::OnceLock;

use thiserror::Error;

use super::sidebar::SidebarBuilder;
use super::types::{DirectoryNode, SourceIndexTable};
use crate::config::{DuplicatePolicy, FinalizePolicy, IndexConfig};
use crate::log;

/// Source index failures.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("source index is finalized, cannot insert `{package}`")]
    Finalized { package: String },

    #[error("source index was already finalized")]
    AlreadyFinalized,

    #[error("package `{package}` is already in the source index")]
    Duplicate { package: String },

    #[error("source index is missing expected package(s): {}", .packages.join(", "))]
    MissingPackages { packages: Vec<String> },

    /// The sidebar builder failed; the table stays finalized.
    #[error("sidebar builder failed")]
    Builder(#[source] anyhow::Error),
}

/// Package-to-tree table for one page load.
#[derive(Debug)]
pub struct SourceIndex {
    config: IndexConfig,
    table: SourceIndexTable,
    finalized: bool,
    /// Serialized table, filled on first read after finalization.
    json_cache: OnceLock<String>,
    /// Emit `[index]` and `[warn]` log lines.
    verbose: bool,
}

impl Default for SourceIndex {
    fn default() -> Self {
        Self::with_config(IndexConfig::default())
    }
}

impl SourceIndex {
    /// Create an empty index with default checks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            table: SourceIndexTable::new(),
            finalized: false,
            json_cache: OnceLock::new(),
            verbose: true,
        }
    }

    /// Turn this index's log lines on or off.
    pub fn with_logging(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Record the tree for a package.
    ///
    /// Returns the tree it replaced, if any. The tree itself is not checked.
    pub fn insert(
        &mut self,
        package: impl Into<String>,
        root: DirectoryNode,
    ) -> Result<Option<DirectoryNode>, IndexError> {
        let package = package.into();
        if self.finalized {
            return Err(IndexError::Finalized { package });
        }

        if self.table.contains_key(&package) {
            match self.config.duplicates {
                DuplicatePolicy::Warn if self.verbose => {
                    log!("warn"; "package `{package}` inserted twice, keeping the latest tree");
                }
                DuplicatePolicy::Overwrite | DuplicatePolicy::Warn => {}
                DuplicatePolicy::Reject => return Err(IndexError::Duplicate { package }),
            }
        }

        Ok(self.table.insert(package, root))
    }

    /// Freeze the table and hand it to the sidebar builder.
    ///
    /// Must run after every `insert` of the page load; an early call leaves
    /// the later inserts rejected and the sidebar incomplete.
    pub fn finalize(&mut self, builder: &mut impl SidebarBuilder) -> Result<(), IndexError> {
        if self.finalized {
            return match self.config.finalize {
                FinalizePolicy::Once => Err(IndexError::AlreadyFinalized),
                FinalizePolicy::Idempotent => Ok(()),
            };
        }

        let missing: Vec<String> = self
            .config
            .expected
            .iter()
            .filter(|package| !self.table.contains_key(package.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(IndexError::MissingPackages { packages: missing });
        }

        self.finalized = true;
        if self.verbose {
            log!(
                "index";
                "finalized {} package(s), {} file(s)",
                self.table.len(),
                self.table.values().map(DirectoryNode::file_count).sum::<usize>()
            );
        }

        builder.build(&self.table).map_err(IndexError::Builder)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn get(&self, package: &str) -> Option<&DirectoryNode> {
        self.table.get(package)
    }

    pub fn table(&self) -> &SourceIndexTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Serialize the table to JSON.
    ///
    /// Once finalized the table cannot change, so the string is generated
    /// once and reused.
    pub fn to_json(&self) -> String {
        if !self.finalized {
            return Self::serialize(&self.table);
        }
        self.json_cache
            .get_or_init(|| Self::serialize(&self.table))
            .clone()
    }

    /// Start over with an empty table for the next page load.
    pub fn reset(&mut self) {
        self.table.clear();
        self.finalized = false;
        self.json_cache = OnceLock::new();
    }

    fn serialize(table: &SourceIndexTable) -> String {
        serde_json::to_string(table).unwrap_or_else(|_| "{}".to_string())
    }
}
