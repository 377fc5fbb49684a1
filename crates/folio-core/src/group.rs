//! Partition ranked results into named buckets by document type.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::SearchResult;

/// Bucket name for results without a type.
pub const DEFAULT_GROUP: &str = "other";

/// Results sharing one discriminator value, in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultGroup {
    /// The shared `type` value, or [`DEFAULT_GROUP`].
    pub name: String,
    /// Members in ranked order.
    pub results: Vec<SearchResult>,
}

impl ResultGroup {
    /// Heading for this group.
    pub fn display_name(&self) -> String {
        display_name(Some(&self.name))
    }
}

/// Group results by their `type` field.
///
/// Buckets appear in the order their first member appears; members keep their
/// relative order. Any discriminator value forms a bucket.
pub fn group_results(results: Vec<SearchResult>) -> Vec<ResultGroup> {
    let mut groups: Vec<ResultGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for result in results {
        let name = result
            .document
            .kind
            .as_deref()
            .filter(|kind| !kind.is_empty())
            .unwrap_or(DEFAULT_GROUP)
            .to_string();
        let idx = *positions.entry(name.clone()).or_insert_with(|| {
            groups.push(ResultGroup {
                name,
                results: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].results.push(result);
    }

    groups
}

/// Heading text for a group: dashes become spaces and each word is capitalized
/// (`blog-list` → `Blog List`). A missing or empty type reads as `Other`.
pub fn display_name(kind: Option<&str>) -> String {
    let Some(kind) = kind.filter(|k| !k.is_empty()) else {
        return "Other".to_string();
    };
    kind.replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
