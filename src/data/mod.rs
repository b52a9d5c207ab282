//! Page-load tables and the components that receive them.
//!
//! | Component       | Receives                      | Hands off to           |
//! |-----------------|-------------------------------|------------------------|
//! | [`Registry`]    | one [`ImplementorTable`]      | consumer or `wait()`   |
//! | [`SourceIndex`] | one [`DirectoryNode`] per pkg | [`SidebarBuilder`]     |
//!
//! The two are independent of each other.

mod index;
mod registry;
mod sidebar;
mod types;

pub use index::{IndexError, SourceIndex};
pub use registry::{ConsumerFn, Delivery, Registry, RegistryError};
pub use sidebar::{NavItem, NavKind, NavListing, SidebarBuilder};
pub use types::{DirectoryNode, ImplementorEntry, ImplementorTable, SourceIndexTable};
