//! Docglue - page-load tables for generated documentation sites.
//!
//! A documentation generator emits two kinds of static tables per page:
//!
//! - the **implementors table** for one trait: package name to the list of
//!   types implementing that trait, with rendered link text;
//! - the **source index**: package name to the directory tree shown in the
//!   source-browsing sidebar.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                              Session                                  │
//! ├───────────────────────────────────────────────────────────────────────┤
//! │                                                                       │
//! │  implementors script          ┌──────────┐      ┌──────────────────┐  │
//! │  ──► parse ──► deliver() ───► │ Registry │ ───► │ consumer / wait()│  │
//! │                               └──────────┘      └──────────────────┘  │
//! │                                  │ no consumer yet                    │
//! │                                  └─► pending slot (last write wins)   │
//! │                                                                       │
//! │  source-files script          ┌─────────────┐   ┌──────────────────┐  │
//! │  ──► parse ──► insert() ────► │ SourceIndex │──►│ SidebarBuilder   │  │
//! │                finalize() ──► └─────────────┘   └──────────────────┘  │
//! │                                                                       │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry and the source index are independent; a [`Session`] owns
//! one of each for the lifetime of a page load.

pub mod config;
pub mod data;
mod error;
pub mod logger;
pub mod script;
mod session;

pub use config::GlueConfig;
pub use data::{
    ConsumerFn, Delivery, DirectoryNode, ImplementorEntry, ImplementorTable, IndexError, NavItem,
    NavKind, NavListing, Registry, RegistryError, SidebarBuilder, SourceIndex, SourceIndexTable,
};
pub use error::Error;
pub use script::{ScriptError, Statement};
pub use session::Session;
