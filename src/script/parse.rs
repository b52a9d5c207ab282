//! Script parsing.
//!
//! The generator writes one statement per line, so parsing is line based.
//! An implementors script opens with an IIFE header on its first line and
//! closes it on its last; both are stripped before matching.

use std::sync::LazyLock;

use regex::Regex;

use super::emit::register_call;
use super::{ScriptError, Statement};
use crate::config::ScriptConfig;

/// `var <name> = {};`
static RE_DECLARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^var[ \t]+([A-Za-z_$][A-Za-z0-9_$]*)[ \t]*=[ \t]*\{\};$").unwrap()
});

/// `<name>["<key>"] = <json>;`
static RE_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z_$][A-Za-z0-9_$]*)\[("(?:[^"\\]|\\.)*")\][ \t]*=[ \t]*(.+);$"#).unwrap()
});

const IIFE_OPEN: &str = "(function() {";
const IIFE_CLOSE: &str = "})()";

/// Longest statement excerpt kept in an error.
const EXCERPT_LEN: usize = 80;

/// Parse a generated script into statements, in source order.
///
/// Line numbers in errors are 1-based.
pub fn parse_script(text: &str, config: &ScriptConfig) -> Result<Vec<Statement>, ScriptError> {
    let register = register_call(config);
    let sidebar_call = format!("{}();", config.sidebar);

    let mut statements = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let mut code = raw.trim();
        if let Some(rest) = code.strip_prefix(IIFE_OPEN) {
            code = rest.trim_start();
        }
        if code.is_empty() {
            continue;
        }

        if let Some(caps) = RE_DECLARE.captures(code) {
            let var = &caps[1];
            if var == config.implementors || var == config.sources {
                statements.push(Statement::Declare { var: var.to_string() });
                continue;
            }
        } else if let Some(caps) = RE_ASSIGN.captures(code) {
            if let Some(statement) = parse_assignment(line, &caps, config)? {
                statements.push(statement);
                continue;
            }
        } else if code.strip_suffix(IIFE_CLOSE).unwrap_or(code).trim_end() == register {
            statements.push(Statement::Register);
            continue;
        } else if code == sidebar_call {
            statements.push(Statement::Sidebar);
            continue;
        } else if code == IIFE_CLOSE {
            continue;
        }

        return Err(ScriptError::Unrecognized {
            line,
            text: excerpt(code).to_string(),
        });
    }

    Ok(statements)
}

/// Decode an assignment to one of the two table variables.
///
/// Returns `None` for any other variable.
fn parse_assignment(
    line: usize,
    caps: &regex::Captures<'_>,
    config: &ScriptConfig,
) -> Result<Option<Statement>, ScriptError> {
    let var = &caps[1];
    let json_err = |source| ScriptError::Json {
        line,
        var: var.to_string(),
        source,
    };

    if var != config.implementors && var != config.sources {
        return Ok(None);
    }

    let package: String = serde_json::from_str(&caps[2]).map_err(json_err)?;
    let value = &caps[3];

    let statement = if var == config.implementors {
        Statement::Implementors {
            package,
            entries: serde_json::from_str(value).map_err(json_err)?,
        }
    } else {
        Statement::Source {
            package,
            root: serde_json::from_str(value).map_err(json_err)?,
        }
    };
    Ok(Some(statement))
}

fn excerpt(code: &str) -> &str {
    let mut end = code.len().min(EXCERPT_LEN);
    while !code.is_char_boundary(end) {
        end -= 1;
    }
    &code[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DirectoryNode, ImplementorEntry};

    const SOURCE_FILES: &str = r#"var sourcesIndex = {};
sourcesIndex["bitfrob"] = {"name":"","files":["const_region_mask.rs","fns.rs","lib.rs","u8x2_.rs"]};
sourcesIndex["gba2k"] = {"name":"","dirs":[{"name":"bios","files":["mod.rs","x02.rs"]},{"name":"rt0","files":["mod.rs"]}],"files":["lib.rs","macros.rs"]};
createSourceSidebar();
"#;

    const CLONE_IMPLEMENTORS: &str = r#"(function() {var implementors = {};
implementors["gba2k"] = [{"text":"impl Clone for <a class=\"struct\" href=\"gba2k/video/struct.Color.html\" title=\"struct gba2k::video::Color\">Color</a>","synthetic":false,"types":["gba2k::video::color::Color"]}];
implementors["voladdress"] = [{"text":"impl&lt;T, R, W&gt; Clone for VolAddress","synthetic":false,"types":["voladdress::voladdress_::VolAddress"]}];
if (window.register_implementors) {window.register_implementors(implementors);} else {window.pending_implementors = implementors;}})()"#;

    fn parse(text: &str) -> Result<Vec<Statement>, ScriptError> {
        parse_script(text, &ScriptConfig::default())
    }

    #[test]
    fn test_parse_source_files() {
        let statements = parse(SOURCE_FILES).unwrap();
        assert_eq!(statements.len(), 4);
        assert_eq!(
            statements[0],
            Statement::Declare {
                var: "sourcesIndex".into()
            }
        );
        assert_eq!(
            statements[1],
            Statement::Source {
                package: "bitfrob".into(),
                root: DirectoryNode::flat(["const_region_mask.rs", "fns.rs", "lib.rs", "u8x2_.rs"]),
            }
        );
        let Statement::Source { package, root } = &statements[2] else {
            panic!("expected source statement");
        };
        assert_eq!(package, "gba2k");
        assert_eq!(root.dirs.len(), 2);
        assert_eq!(root.dirs[0].name, "bios");
        assert_eq!(root.files, vec!["lib.rs", "macros.rs"]);
        assert_eq!(statements[3], Statement::Sidebar);
    }

    #[test]
    fn test_parse_implementors() {
        let statements = parse(CLONE_IMPLEMENTORS).unwrap();
        assert_eq!(statements.len(), 4);
        assert_eq!(
            statements[0],
            Statement::Declare {
                var: "implementors".into()
            }
        );

        let Statement::Implementors { package, entries } = &statements[1] else {
            panic!("expected implementors statement");
        };
        assert_eq!(package, "gba2k");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].text.contains(r#"href="gba2k/video/struct.Color.html""#));
        assert_eq!(entries[0].types, vec!["gba2k::video::color::Color"]);

        assert!(matches!(
            &statements[2],
            Statement::Implementors { package, .. } if package == "voladdress"
        ));
        assert_eq!(statements[3], Statement::Register);
    }

    #[test]
    fn test_parse_escaped_package_key() {
        let script = r#"implementors["we\"ird"] = [];"#;
        let statements = parse(script).unwrap();
        assert_eq!(
            statements,
            vec![Statement::Implementors {
                package: "we\"ird".into(),
                entries: Vec::<ImplementorEntry>::new(),
            }]
        );
    }

    #[test]
    fn test_parse_custom_identifiers() {
        let config = ScriptConfig {
            sources: "srcIndex".into(),
            sidebar: "createSrcSidebar".into(),
            ..ScriptConfig::default()
        };
        let script = "var srcIndex = {};\nsrcIndex[\"a\"] = {\"name\":\"\",\"files\":[]};\ncreateSrcSidebar();\n";
        let statements = parse_script(script, &config).unwrap();
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[2], Statement::Sidebar);

        // Default names are not recognized under a custom config
        assert!(parse_script(SOURCE_FILES, &config).is_err());
    }

    #[test]
    fn test_register_call_matched_exactly() {
        let tail = "if (window.register_implementors) {window.register_implementors(implementors);} else {window.pending_implementors = implementors;}";
        assert_eq!(parse(tail).unwrap(), vec![Statement::Register]);
        assert_eq!(
            parse(&format!("{tail}\n}})()")).unwrap(),
            vec![Statement::Register]
        );

        let trailing = format!("{tail}}})(); stealCookies();");
        assert!(matches!(
            parse(&trailing),
            Err(ScriptError::Unrecognized { line: 1, .. })
        ));
        assert!(matches!(
            parse("if (window.register_implementors) {}"),
            Err(ScriptError::Unrecognized { line: 1, .. })
        ));
    }

    #[test]
    fn test_register_call_uses_pending_name() {
        let config = ScriptConfig {
            pending: "deferred_implementors".into(),
            ..ScriptConfig::default()
        };
        assert!(matches!(
            parse_script(CLONE_IMPLEMENTORS, &config),
            Err(ScriptError::Unrecognized { line: 4, .. })
        ));

        let script = "if (window.register_implementors) {window.register_implementors(implementors);} else {window.deferred_implementors = implementors;}})()";
        assert_eq!(
            parse_script(script, &config).unwrap(),
            vec![Statement::Register]
        );
    }

    #[test]
    fn test_parse_unrecognized_line() {
        let err = parse("var sourcesIndex = {};\nsearchIndex[\"x\"] = 1;\n").unwrap_err();
        let ScriptError::Unrecognized { line, text } = err else {
            panic!("expected unrecognized statement");
        };
        assert_eq!(line, 2);
        assert_eq!(text, "searchIndex[\"x\"] = 1;");
    }

    #[test]
    fn test_parse_unknown_declaration() {
        assert!(matches!(
            parse("var searchIndex = {};"),
            Err(ScriptError::Unrecognized { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_bad_json() {
        let err = parse("sourcesIndex[\"gba2k\"] = {\"name\":};").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Json { line: 1, ref var, .. } if var == "sourcesIndex"
        ));
    }

    #[test]
    fn test_excerpt_respects_char_boundary() {
        let long = "é".repeat(EXCERPT_LEN);
        let cut = excerpt(&long);
        assert!(cut.len() <= EXCERPT_LEN);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_blank_lines_ignored() {
        assert!(parse("\n  \n").unwrap().is_empty());
    }
}
