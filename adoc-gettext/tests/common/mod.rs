//! Shared helpers for the integration tests.

use adoc_gettext::ast::{Block, Child};
use adoc_gettext::attributes::all_builtins_attribute_filter;
use adoc_gettext::directives;
use adoc_gettext::parser::{self, ParseOptions};
use adoc_gettext::{extract, ExtractOptions};

/// Extracted texts without the builtin attribute labels, so assertions stay
/// focused on document content.
pub fn extracted(source: &str) -> Vec<String> {
    let options = ExtractOptions {
        attribute_filter: Some(all_builtins_attribute_filter),
        ..Default::default()
    };
    extract(source, &options)
        .expect("document to extract")
        .into_iter()
        .map(|e| e.text)
        .collect()
}

/// Extracted texts with the default filter (builtin labels included).
pub fn extracted_default(source: &str) -> Vec<String> {
    extract(source, &ExtractOptions::default())
        .expect("document to extract")
        .into_iter()
        .map(|e| e.text)
        .collect()
}

/// Structural fingerprint of an extract-mode parse: one line per block with
/// kind, style, title and text, plus one line per table cell with its
/// effective spans. Two sources with equal fingerprints parse to equivalent
/// trees.
pub fn fingerprint(source: &str) -> Vec<String> {
    let options = ParseOptions {
        attributes: Vec::new(),
        hooks: directives::extract_hooks(),
    };
    let document = parser::parse(source, &options).expect("document to parse");
    let mut out = Vec::new();
    walk(&document, 0, &mut out);
    out
}

fn walk(block: &Block, depth: usize, out: &mut Vec<String>) {
    out.push(format!(
        "{}{}|{}|{}|{}",
        "  ".repeat(depth),
        block.kind.as_str(),
        block.style.as_deref().unwrap_or(""),
        block.title.as_deref().unwrap_or(""),
        block.text
    ));
    if let Some(table) = &block.table {
        for row in table.rows() {
            for cell in row {
                out.push(format!(
                    "{}cell|{}.{}|{}",
                    "  ".repeat(depth + 1),
                    cell.colspan.unwrap_or(1),
                    cell.rowspan.unwrap_or(1),
                    cell.text
                ));
            }
        }
    }
    for child in &block.children {
        match child {
            Child::Node(node) => walk(node, depth + 1, out),
            Child::Group(blocks) => {
                for node in blocks {
                    walk(node, depth + 1, out);
                }
            }
        }
    }
}
