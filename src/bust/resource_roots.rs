//! Resource-roots attribute extraction and substitution
//!
//! The HTML entry point carries the resource-root mapping as a JSON blob in a
//! single-quoted attribute. The document is never parsed as HTML; the
//! attribute is located by exact marker-substring search, which is only
//! well-defined when the marker occurs exactly once. Anything else is an
//! error rather than a silent guess.

use std::ops::Range;

use serde_json::{Map, Value};

use crate::error::{KilnError, Result};

/// Attribute marker preceding the JSON mapping, case-sensitive
pub const MARKER: &str = "data-sap-ui-resourceroots=";

/// Extract the resource-root mapping and the byte range of its JSON text.
///
/// `origin` only labels error messages. Entry order of the returned map
/// follows the document.
pub fn extract_mapping(html: &str, origin: &str) -> Result<(Map<String, Value>, Range<usize>)> {
    let count = html.matches(MARKER).count();
    if count == 0 {
        return Err(KilnError::ResourceRootsMissing {
            path: origin.to_string(),
        });
    }
    if count > 1 {
        return Err(KilnError::ResourceRootsAmbiguous {
            path: origin.to_string(),
            count,
        });
    }

    let marker_at = html.find(MARKER).unwrap_or_default();
    let value_at = marker_at + MARKER.len();
    if html[value_at..].chars().next() != Some('\'') {
        return Err(KilnError::ResourceRootsMalformed {
            path: origin.to_string(),
            reason: "attribute value is not single-quoted".to_string(),
        });
    }

    let json_start = value_at + 1;
    let json_end = match html[json_start..].find('\'') {
        Some(offset) => json_start + offset,
        None => {
            return Err(KilnError::ResourceRootsMalformed {
                path: origin.to_string(),
                reason: "unterminated attribute value".to_string(),
            });
        }
    };

    let mapping: Map<String, Value> =
        serde_json::from_str(&html[json_start..json_end]).map_err(|e| {
            KilnError::ResourceRootsMalformed {
                path: origin.to_string(),
                reason: e.to_string(),
            }
        })?;

    Ok((mapping, json_start..json_end))
}

/// Splice a re-serialized mapping back into the attribute's byte range
pub fn substitute(html: &str, range: Range<usize>, json: &str) -> String {
    let mut out = String::with_capacity(html.len() + json.len());
    out.push_str(&html[..range.start]);
    out.push_str(json);
    out.push_str(&html[range.end..]);
    out
}
