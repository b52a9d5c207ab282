//! Where generated scripts live in the documentation output.
//!
//! Implementors scripts sit under `implementors/`, one per trait, at the
//! trait's module path: `core::clone::Clone` is
//! `implementors/core/clone/trait.Clone.js`.

use super::ScriptError;

/// Directory holding the implementors scripts.
pub const IMPLEMENTORS_DIR: &str = "implementors";

/// The single source index script at the documentation root.
pub const SOURCE_FILES_SCRIPT: &str = "source-files.js";

/// Script path for a trait path like `core::clone::Clone`.
///
/// The path needs at least a crate and a trait name, and no empty segment.
pub fn implementors_path(trait_path: &str) -> Result<String, ScriptError> {
    let segments: Vec<&str> = trait_path.split("::").collect();
    let invalid = || ScriptError::TraitPath(trait_path.to_string());

    let Some((name, modules)) = segments.split_last() else {
        return Err(invalid());
    };
    if modules.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return Err(invalid());
    }

    Ok(format!(
        "{IMPLEMENTORS_DIR}/{}/trait.{name}.js",
        modules.join("/")
    ))
}

/// Trait path for an implementors script path; the inverse of
/// [`implementors_path`].
///
/// Leading directories before `implementors/` are ignored.
pub fn trait_path(script_path: &str) -> Option<String> {
    let marker = format!("{IMPLEMENTORS_DIR}/");
    let suffix = script_path.rsplit_once(&marker).map(|(_, rest)| rest)?;

    let (modules, file) = suffix.rsplit_once('/')?;
    let name = file.strip_prefix("trait.")?.strip_suffix(".js")?;
    if name.is_empty() || modules.split('/').any(str::is_empty) {
        return None;
    }

    Some(format!("{}::{name}", modules.replace('/', "::")))
}
