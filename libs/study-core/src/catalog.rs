//! Word catalogs supplied as `{english, chinese}` records.
//!
//! Catalogs are flattened into the same line format people paste, so they go
//! through [`crate::parser::parse`] and its rules unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub english: String,
    pub chinese: String,
}

/// Render catalog entries as `english | chinese` lines.
///
/// Entries missing either side are dropped: a lone side would otherwise be
/// split by the whitespace fallback into a bogus card.
pub fn to_input_text(entries: &[CatalogEntry]) -> String {
    entries
        .iter()
        .filter_map(|entry| {
            let english = entry.english.trim();
            let chinese = entry.chinese.trim();
            if english.is_empty() || chinese.is_empty() {
                tracing::debug!(english, chinese, "dropping incomplete catalog entry");
                return None;
            }
            Some(format!("{english} | {chinese}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
