//! Sidebar builder collaborator.
//!
//! `SourceIndex::finalize` hands the complete table to a [`SidebarBuilder`].
//! Rendering is left to the implementor; [`NavListing`] flattens the table
//! into navigable items and is what a [`Session`](crate::Session) uses by
//! default.

use super::types::{DirectoryNode, SourceIndexTable};

/// Builds the consumer-facing view of a finalized source index.
pub trait SidebarBuilder {
    fn build(&mut self, table: &SourceIndexTable) -> anyhow::Result<()>;
}

impl<F> SidebarBuilder for F
where
    F: FnMut(&SourceIndexTable) -> anyhow::Result<()>,
{
    fn build(&mut self, table: &SourceIndexTable) -> anyhow::Result<()> {
        self(table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKind {
    Package,
    Dir,
    File,
}

/// One row of the flattened sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub package: String,
    /// Path relative to the package root; empty for the package row.
    pub path: String,
    /// Nesting level, 0 for the package row.
    pub depth: usize,
    pub kind: NavKind,
}

/// Flattened, depth-first listing of every package tree.
///
/// Per directory, subdirectories are listed before files.
#[derive(Debug, Clone, Default)]
pub struct NavListing {
    items: Vec<NavItem>,
    builds: usize,
}

impl NavListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// How many times the listing was built.
    pub fn builds(&self) -> usize {
        self.builds
    }

    /// Items belonging to one package, package row included.
    pub fn package(&self, package: &str) -> impl Iterator<Item = &NavItem> {
        self.items.iter().filter(move |item| item.package == package)
    }

    fn push_dir(&mut self, package: &str, node: &DirectoryNode, prefix: &str, depth: usize) {
        for dir in &node.dirs {
            let path = format!("{prefix}{}", dir.name);
            self.items.push(NavItem {
                package: package.to_string(),
                path: path.clone(),
                depth,
                kind: NavKind::Dir,
            });
            self.push_dir(package, dir, &format!("{path}/"), depth + 1);
        }
        for file in &node.files {
            self.items.push(NavItem {
                package: package.to_string(),
                path: format!("{prefix}{file}"),
                depth,
                kind: NavKind::File,
            });
        }
    }
}

impl SidebarBuilder for NavListing {
    fn build(&mut self, table: &SourceIndexTable) -> anyhow::Result<()> {
        self.items.clear();
        for (package, root) in table {
            self.items.push(NavItem {
                package: package.clone(),
                path: String::new(),
                depth: 0,
                kind: NavKind::Package,
            });
            self.push_dir(package, root, "", 1);
        }
        self.builds += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(package: &str, path: &str, depth: usize, kind: NavKind) -> NavItem {
        NavItem {
            package: package.into(),
            path: path.into(),
            depth,
            kind,
        }
    }

    #[test]
    fn test_nav_listing_flattens_depth_first() {
        let mut table = SourceIndexTable::new();
        table.insert(
            "gba2k".into(),
            DirectoryNode {
                name: String::new(),
                dirs: vec![DirectoryNode::named("bios", vec![], ["mod.rs"])],
                files: vec!["lib.rs".into()],
            },
        );
        table.insert("bitfrob".into(), DirectoryNode::flat(["lib.rs"]));

        let mut listing = NavListing::new();
        listing.build(&table).unwrap();

        assert_eq!(
            listing.items(),
            &[
                item("bitfrob", "", 0, NavKind::Package),
                item("bitfrob", "lib.rs", 1, NavKind::File),
                item("gba2k", "", 0, NavKind::Package),
                item("gba2k", "bios", 1, NavKind::Dir),
                item("gba2k", "bios/mod.rs", 2, NavKind::File),
                item("gba2k", "lib.rs", 1, NavKind::File),
            ]
        );
        assert_eq!(listing.package("gba2k").count(), 4);
        assert_eq!(listing.builds(), 1);
    }

    #[test]
    fn test_closure_is_a_builder() {
        let mut packages = Vec::new();
        let mut builder = |table: &SourceIndexTable| -> anyhow::Result<()> {
            packages.extend(table.keys().cloned());
            Ok(())
        };

        let mut table = SourceIndexTable::new();
        table.insert("voladdress".into(), DirectoryNode::flat(["lib.rs"]));
        builder.build(&table).unwrap();

        assert_eq!(packages, vec!["voladdress"]);
    }
}
