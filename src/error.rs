//! Crate-level error type.

use thiserror::Error;

use crate::{
    config::ConfigError,
    data::{IndexError, RegistryError},
    script::ScriptError,
};

/// Any failure surfaced by a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}
