//! Order-preserving deduplication of extracted text.

use std::collections::HashSet;

/// Deduplicate `texts`, keeping the first occurrence of each and the
/// relative order of survivors.
pub fn collate(texts: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    texts
        .into_iter()
        .filter(|text| seen.insert(text.clone()))
        .collect()
}
