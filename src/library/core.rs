//! Core entry composition (build step 4)
//!
//! The framework's bootstrap entries (`sap-ui-core.js` and friends) ship as
//! stubs listing `raw:<path>` inclusion directives. Composition resolves each
//! directive against the already-populated target tree (debug entries pull
//! the `-dbg` counterparts), concatenates the contents in the listed order
//! with the banner substituted, wraps the result with the loader boot
//! header/footer and writes the entry back in place.
//!
//! The primary (first) entry's inclusions are reported back so preload
//! bundling can skip scripts that are already delivered inline.

use crate::context::BuildContext;
use crate::error::{KilnError, Result};
use crate::fsutil;
use crate::template;

/// Marker token introducing an inline inclusion directive
const RAW_MARKER: &str = "raw:";

/// Compose all configured core entry files.
///
/// Returns the target-relative script paths inlined into the primary entry.
pub fn compose_core_entries(ctx: &BuildContext<'_>) -> Result<Vec<String>> {
    let mut primary_inclusions = Vec::new();

    for (index, entry_name) in ctx.conventions.core_entries.iter().enumerate() {
        let entry_path = ctx.target.join(entry_name);
        if !entry_path.is_file() {
            ctx.reporter
                .warn(&format!("core entry not present, skipping: {entry_name}"));
            continue;
        }

        let content = fsutil::read_to_string(&entry_path)?;
        let includes = parse_raw_includes(&content);
        if includes.is_empty() {
            continue;
        }

        if index == 0 {
            primary_inclusions = includes.clone();
        }

        let is_debug = entry_name.ends_with("-dbg.js");
        let mut composed = String::new();
        for include in &includes {
            let resolved = if is_debug {
                debug_variant(include)
            } else {
                include.clone()
            };
            let include_path = ctx.target.join(&resolved);
            if !include_path.is_file() {
                return Err(KilnError::IncludeNotFound {
                    path: include_path.display().to_string(),
                });
            }
            let script = fsutil::read_to_string(&include_path)?;
            composed.push_str(&template::apply_banner(&script, &ctx.banner));
        }

        let core_namespace = ctx.conventions.core_module.replace('.', "/");
        fsutil::write(&entry_path, wrap_boot(&composed, &core_namespace, is_debug))?;
    }

    Ok(primary_inclusions)
}

/// Extract the relative paths of every `raw:` directive, in listed order
pub fn parse_raw_includes(content: &str) -> Vec<String> {
    let mut includes = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find(RAW_MARKER) {
        rest = &rest[start + RAW_MARKER.len()..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '_' | '-')))
            .unwrap_or(rest.len());
        let path = &rest[..end];
        if !path.is_empty() {
            includes.push(path.to_string());
        }
        rest = &rest[end..];
    }
    includes
}

fn debug_variant(path: &str) -> String {
    match path.strip_suffix(".js") {
        Some(stem) => format!("{stem}-dbg.js"),
        None => path.to_string(),
    }
}

/// Wrap composed content with the loader boot header and footer
fn wrap_boot(content: &str, core_namespace: &str, is_debug: bool) -> String {
    let footer = format!(
        "\nif (!window[\"sap-ui-debug\"]) {{ sap.ui.requireSync(\"{core_namespace}/library-preload\"); }}\nsap.ui.requireSync(\"{core_namespace}/Core\");\nsap.ui.getCore().boot && sap.ui.getCore().boot();"
    );
    if is_debug {
        format!("{content}{footer}")
    } else {
        format!("window[\"sap-ui-optimized\"] = true;\n{content}{footer}")
    }
}
