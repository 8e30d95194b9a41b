//! LESS compilation seam
//!
//! Theme compilation is an external collaborator: the [`LessCompiler`] trait
//! isolates it so the build pipeline only sees a typed outcome. The
//! production implementation shells out to a `lessc`-family binary, derives
//! the right-to-left variant by flipping direction-bound words and extracts
//! the theme's top-level variables for `library-parameters.json`.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Result of compiling one theme stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessOutput {
    pub css: String,
    pub css_rtl: String,
    pub parameters: BTreeMap<String, String>,
}

/// Typed compile failure; the healing loop keys off `MissingImport`
#[derive(Debug, Error)]
pub enum LessFailure {
    #[error("missing import '{file}'")]
    MissingImport { file: String },

    #[error("no LESS compiler available: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

pub trait LessCompiler: Send + Sync {
    fn compile(&self, entry: &Path) -> std::result::Result<LessOutput, LessFailure>;
}

/// `lessc` command-line compiler
pub struct LesscCli;

impl LessCompiler for LesscCli {
    fn compile(&self, entry: &Path) -> std::result::Result<LessOutput, LessFailure> {
        let dir = entry.parent().unwrap_or_else(|| Path::new("."));
        let output = Command::new("lessc")
            .arg(format!("--include-path={}", dir.display()))
            .arg(entry)
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LessFailure::Unavailable("lessc not found on PATH".to_string()));
            }
            Err(e) => return Err(LessFailure::Failed(e.to_string())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(match parse_missing_import(&stderr) {
                Some(file) => LessFailure::MissingImport { file },
                None => LessFailure::Failed(stderr.trim().to_string()),
            });
        }

        let source = std::fs::read_to_string(entry).map_err(|e| LessFailure::Failed(e.to_string()))?;
        let css = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok(LessOutput {
            css_rtl: flip_directions(&css),
            parameters: extract_parameters(&source),
            css,
        })
    }
}

/// Extract the missing stylesheet filename from a compiler error message.
///
/// `lessc` reports missing partials as `'foo.less' wasn't found`; the first
/// quoted token ending in `.less` is taken as the missing file.
pub fn parse_missing_import(message: &str) -> Option<String> {
    for quote in ['\'', '"'] {
        let mut rest = message;
        while let Some(start) = rest.find(quote) {
            rest = &rest[start + 1..];
            let Some(end) = rest.find(quote) else { break };
            let candidate = &rest[..end];
            if candidate.ends_with(".less") && !candidate.is_empty() {
                return Some(candidate.to_string());
            }
            rest = &rest[end + 1..];
        }
    }
    None
}

/// Flip direction-bound words for the RTL stylesheet variant.
///
/// Whole identifier parts delimited by non-word characters (hyphens included)
/// are swapped, so `margin-left` becomes `margin-right` and `float: left`
/// becomes `float: right`, while `copyright` stays untouched.
pub fn flip_directions(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut word = String::new();

    let mut flush = |word: &mut String, out: &mut String| {
        match word.as_str() {
            "left" => out.push_str("right"),
            "right" => out.push_str("left"),
            other => out.push_str(other),
        }
        word.clear();
    };

    for ch in css.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            word.push(ch);
        } else {
            flush(&mut word, &mut out);
            out.push(ch);
        }
    }
    flush(&mut word, &mut out);
    out
}

/// Collect top-level `@name: value;` declarations of a stylesheet.
///
/// Imports are not chased; only the entry's own variables feed the
/// parameters file.
pub fn extract_parameters(source: &str) -> BTreeMap<String, String> {
    let mut parameters = BTreeMap::new();
    let mut depth: i32 = 0;

    for line in source.lines() {
        let trimmed = line.trim();
        if depth == 0 {
            if let Some((name, value)) = trimmed
                .strip_prefix('@')
                .and_then(|rest| rest.split_once(':'))
            {
                let name = name.trim();
                let value = value.trim().trim_end_matches(';').trim();
                let is_directive = matches!(name, "import" | "media" | "charset");
                if !name.is_empty() && !value.is_empty() && !is_directive {
                    parameters.insert(name.to_string(), value.to_string());
                }
            }
        }
        depth += trimmed.matches('{').count() as i32;
        depth -= trimmed.matches('}').count() as i32;
    }

    parameters
}
