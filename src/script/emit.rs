//! Script generation.
//!
//! Output matches the generator byte for byte: JSON without whitespace, one
//! assignment per package in key order.

use std::fmt::Write;

use serde::Serialize;

use crate::config::ScriptConfig;
use crate::data::{ImplementorTable, SourceIndexTable};

/// Write the implementors script for one trait.
///
/// The script registers the table with the page if a consumer is present
/// and stashes it otherwise. It has no trailing newline.
pub fn implementors_script(table: &ImplementorTable, config: &ScriptConfig) -> String {
    let var = &config.implementors;
    let mut script = String::with_capacity(256);

    let _ = writeln!(script, "(function() {{var {var} = {{}};");
    for (package, entries) in table {
        push_assignment(&mut script, var, package, entries, "[]");
    }
    let _ = write!(script, "{}}})()", register_call(config));

    script
}

/// The register-or-stash statement closing an implementors script.
pub(crate) fn register_call(config: &ScriptConfig) -> String {
    format!(
        "if (window.{register}) {{window.{register}({var});}} else {{window.{pending} = {var};}}",
        register = config.register,
        pending = config.pending,
        var = config.implementors,
    )
}

/// Write the source-files script for the whole site.
pub fn sources_script(table: &SourceIndexTable, config: &ScriptConfig) -> String {
    let var = &config.sources;
    let mut script = String::with_capacity(256);

    let _ = writeln!(script, "var {var} = {{}};");
    for (package, root) in table {
        push_assignment(&mut script, var, package, root, "{}");
    }
    let _ = writeln!(script, "{}();", config.sidebar);

    script
}

fn push_assignment<T: Serialize>(
    script: &mut String,
    var: &str,
    package: &str,
    value: &T,
    fallback: &str,
) {
    let key = serde_json::to_string(package).unwrap_or_else(|_| "\"\"".to_string());
    let value = serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string());
    let _ = writeln!(script, "{var}[{key}] = {value};");
}
