//! Data types for the page-load tables.
//!
//! These types are deserialized from, and serialized back to, the JSON
//! literals embedded in the generated page scripts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One concrete type implementing a trait.
///
/// Produced wholesale by the documentation generator and never mutated here.
/// No field is validated: an entry with empty `text` or `types` passes
/// through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementorEntry {
    /// Rendered impl header, including link markup.
    #[serde(default)]
    pub text: String,

    /// Whether the impl is auto-generated (auto traits, blanket impls).
    #[serde(default)]
    pub synthetic: bool,

    /// Fully-qualified paths of the type(s) this entry stands for.
    #[serde(default)]
    pub types: Vec<String>,
}

impl ImplementorEntry {
    pub fn new(text: impl Into<String>, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            text: text.into(),
            synthetic: false,
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Implementors of one trait, keyed by package name.
///
/// Entry order within a package is display order.
pub type ImplementorTable = BTreeMap<String, Vec<ImplementorEntry>>;

/// One directory in a package's source tree.
///
/// The package root usually has an empty `name`. A missing `dirs` list reads
/// as empty and an empty one is left out when serializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dirs: Vec<DirectoryNode>,

    #[serde(default)]
    pub files: Vec<String>,
}

impl DirectoryNode {
    /// A nameless, single-level file list (the common package root).
    pub fn flat(files: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: String::new(),
            dirs: Vec::new(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// A named directory.
    pub fn named(
        name: impl Into<String>,
        dirs: Vec<DirectoryNode>,
        files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            dirs,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.name.is_empty() && self.dirs.is_empty()
    }

    /// Number of files in this directory and all subdirectories.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.dirs.iter().map(Self::file_count).sum::<usize>()
    }

    /// Slash-separated paths of every file, relative to this node.
    ///
    /// A directory's own files come before those of its subdirectories.
    /// This node's own name is not part of the paths.
    pub fn file_paths(&self) -> Vec<String> {
        let mut paths = Vec::with_capacity(self.file_count());
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        out.extend(self.files.iter().map(|file| format!("{prefix}{file}")));
        for dir in &self.dirs {
            dir.collect_paths(&format!("{prefix}{}/", dir.name), out);
        }
    }
}

/// Root directory tree per package.
pub type SourceIndexTable = BTreeMap<String, DirectoryNode>;

#[cfg(test)]
mod tests {
    use super::*;

    fn gba2k() -> DirectoryNode {
        DirectoryNode {
            name: String::new(),
            dirs: vec![
                DirectoryNode::named("bios", vec![], ["mod.rs", "x02.rs"]),
                DirectoryNode::named(
                    "video",
                    vec![DirectoryNode::named("mode3", vec![], ["mod.rs"])],
                    ["color.rs"],
                ),
            ],
            files: vec!["lib.rs".into(), "macros.rs".into()],
        }
    }

    #[test]
    fn test_directory_node_missing_dirs_is_empty() {
        let node: DirectoryNode =
            serde_json::from_str(r#"{"name":"","files":["lib.rs","fns.rs"]}"#).unwrap();
        assert!(node.dirs.is_empty());
        assert!(node.is_flat());
        assert_eq!(node.files, vec!["lib.rs", "fns.rs"]);
    }

    #[test]
    fn test_directory_node_serializes_like_generator() {
        let flat = DirectoryNode::flat(["lib.rs"]);
        assert_eq!(
            serde_json::to_string(&flat).unwrap(),
            r#"{"name":"","files":["lib.rs"]}"#
        );

        let nested = DirectoryNode {
            name: String::new(),
            dirs: vec![DirectoryNode::named("rt0", vec![], ["mod.rs"])],
            files: vec!["lib.rs".into()],
        };
        assert_eq!(
            serde_json::to_string(&nested).unwrap(),
            r#"{"name":"","dirs":[{"name":"rt0","files":["mod.rs"]}],"files":["lib.rs"]}"#
        );
    }

    #[test]
    fn test_file_paths_order() {
        assert_eq!(
            gba2k().file_paths(),
            vec![
                "lib.rs",
                "macros.rs",
                "bios/mod.rs",
                "bios/x02.rs",
                "video/color.rs",
                "video/mode3/mod.rs",
            ]
        );
        assert_eq!(gba2k().file_count(), 6);
    }

    #[test]
    fn test_implementor_entry_accepts_missing_fields() {
        let entry: ImplementorEntry = serde_json::from_str(r#"{"synthetic":true}"#).unwrap();
        assert!(entry.text.is_empty());
        assert!(entry.types.is_empty());
        assert!(entry.synthetic);
    }

    #[test]
    fn test_implementor_entry_field_order() {
        let entry = ImplementorEntry::new("impl Clone for Keys", ["gba2k::keys::Keys"]);
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"text":"impl Clone for Keys","synthetic":false,"types":["gba2k::keys::Keys"]}"#
        );
    }
}
