//! Page-load session.
//!
//! A [`Session`] owns everything one page load needs: the configuration,
//! the implementors [`Registry`], the [`SourceIndex`] and the sidebar
//! builder it finalizes into. Scripts are replayed into it statement by
//! statement in the order the page includes them.

use std::mem;

use crate::config::GlueConfig;
use crate::data::{
    Delivery, DirectoryNode, ImplementorTable, NavListing, Registry, SidebarBuilder, SourceIndex,
};
use crate::error::Error;
use crate::script::{Statement, parse_script};

pub struct Session<S: SidebarBuilder = NavListing> {
    config: GlueConfig,
    registry: Registry,
    index: SourceIndex,
    sidebar: S,
    /// Implementor assignments seen since the last declaration, delivered
    /// as one table by the register statement.
    staged: ImplementorTable,
}

impl Session<NavListing> {
    pub fn new(config: GlueConfig) -> Self {
        Self::with_sidebar(config, NavListing::new())
    }

    /// Build a session from TOML configuration text.
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        Ok(Self::new(GlueConfig::from_str(content)?))
    }
}

impl<S: SidebarBuilder> Session<S> {
    /// Build a session around a custom sidebar builder.
    ///
    /// `[log] enable` applies to this session's registry and index only.
    pub fn with_sidebar(config: GlueConfig, sidebar: S) -> Self {
        Self {
            index: SourceIndex::with_config(config.index.clone()).with_logging(config.log.enable),
            registry: Registry::with_logging(config.log.enable),
            config,
            sidebar,
            staged: ImplementorTable::new(),
        }
    }

    pub fn config(&self) -> &GlueConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn index(&self) -> &SourceIndex {
        &self.index
    }

    pub fn sidebar(&self) -> &S {
        &self.sidebar
    }

    pub fn deliver(&self, table: ImplementorTable) -> Result<Delivery, Error> {
        Ok(self.registry.deliver(table)?)
    }

    pub fn insert(
        &mut self,
        package: impl Into<String>,
        root: DirectoryNode,
    ) -> Result<Option<DirectoryNode>, Error> {
        Ok(self.index.insert(package, root)?)
    }

    /// Finalize the source index into this session's sidebar builder.
    pub fn finalize(&mut self) -> Result<(), Error> {
        Ok(self.index.finalize(&mut self.sidebar)?)
    }

    /// Replay parsed script statements in order.
    ///
    /// Stops at the first failing statement; earlier ones stay applied.
    pub fn apply(&mut self, statements: impl IntoIterator<Item = Statement>) -> Result<(), Error> {
        for statement in statements {
            match statement {
                Statement::Declare { var } => {
                    if var == self.config.script.implementors {
                        self.staged.clear();
                    }
                }
                Statement::Implementors { package, entries } => {
                    self.staged.insert(package, entries);
                }
                Statement::Register => {
                    let table = mem::take(&mut self.staged);
                    self.deliver(table)?;
                }
                Statement::Source { package, root } => {
                    self.insert(package, root)?;
                }
                Statement::Sidebar => self.finalize()?,
            }
        }
        Ok(())
    }

    /// Parse a generated script and replay it.
    pub fn load_script(&mut self, text: &str) -> Result<(), Error> {
        let statements = parse_script(text, &self.config.script)?;
        self.apply(statements)
    }

    /// Tear down for the next page load.
    ///
    /// Drops any pending table, the consumer and the source index. The
    /// sidebar builder is kept.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.index.reset();
        self.staged.clear();
    }
}
