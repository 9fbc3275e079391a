//! Dropping extracted lines that match caller-supplied ignore patterns.

use crate::extract::Extraction;
use regex::Regex;

/// Remove the lines of each extraction that match any of `patterns`, and
/// drop extractions left with no lines at all. Matching is a substring
/// search, not a full-string match.
pub fn filter_extractions(extractions: Vec<Extraction>, patterns: &[Regex]) -> Vec<Extraction> {
    if patterns.is_empty() {
        return extractions;
    }
    extractions
        .into_iter()
        .filter_map(|extraction| {
            let kept: Vec<&str> = extraction
                .text
                .lines()
                .filter(|line| !patterns.iter().any(|re| re.is_match(line)))
                .collect();
            if kept.is_empty() {
                None
            } else {
                Some(Extraction::new(kept.join("\n")))
            }
        })
        .collect()
}
