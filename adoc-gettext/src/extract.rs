//! Ordered extraction of translatable text from a document tree.
//!
//! The walker visits blocks depth-first in document order and emits one
//! [`Extraction`] per translatable chunk: titles, paragraph and verbatim
//! bodies, list item texts, table cells, image targets and alt texts, and
//! filtered document attributes. Output order is deterministic for a given
//! input, which keeps generated catalogs diffable.

use crate::ast::{Block, Child, NodeKind};
use crate::attributes::{self, AttributeFilter};
use crate::directives;
use crate::error::GettextError;
use crate::parser::{self, ParseOptions};

/// One translatable chunk, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
}

impl Extraction {
    pub fn new(text: impl Into<String>) -> Self {
        Extraction { text: text.into() }
    }
}

/// Options for a single [`extract`] call.
#[derive(Default)]
pub struct ExtractOptions {
    /// Filter for document attributes. Defaults to
    /// [`attributes::default_attribute_filter`].
    pub attribute_filter: Option<AttributeFilter>,
    /// Attribute assignments applied before the document is read.
    pub attributes: Vec<(String, String)>,
}

/// Parse `source` and extract its translatable text in document order.
pub fn extract(source: &str, options: &ExtractOptions) -> Result<Vec<Extraction>, GettextError> {
    let parse_options = ParseOptions {
        attributes: options.attributes.clone(),
        hooks: directives::extract_hooks(),
    };
    let document = parser::parse(source, &parse_options)?;
    let filter = options
        .attribute_filter
        .unwrap_or(attributes::default_attribute_filter);
    Ok(extract_document(&document, filter))
}

/// Walk an already parsed document.
pub fn extract_document(document: &Block, filter: AttributeFilter) -> Vec<Extraction> {
    let mut out = Vec::new();
    walk(document, filter, &mut out);
    out
}

fn push(out: &mut Vec<Extraction>, text: &str) {
    if !text.is_empty() {
        out.push(Extraction::new(text));
    }
}

fn push_title(out: &mut Vec<Extraction>, block: &Block) {
    if let Some(title) = &block.title {
        push(out, title);
    }
}

fn walk(block: &Block, filter: AttributeFilter, out: &mut Vec<Extraction>) {
    match block.kind {
        NodeKind::Document => {
            push_title(out, block);
            for (key, value) in block.attributes.iter() {
                if filter(key) {
                    push(out, value);
                }
            }
        }
        NodeKind::Section | NodeKind::FloatingTitle => push_title(out, block),
        NodeKind::Paragraph
        | NodeKind::Verse
        | NodeKind::Listing
        | NodeKind::Literal => {
            push_title(out, block);
            push(out, &block.text);
        }
        NodeKind::Preamble
        | NodeKind::Admonition
        | NodeKind::Sidebar
        | NodeKind::Quote
        | NodeKind::DescriptionList
        | NodeKind::OrderedList
        | NodeKind::UnorderedList => push_title(out, block),
        NodeKind::ListItem => push(out, &block.text),
        // Pass content is raw passthrough, not prose.
        NodeKind::Pass => push_title(out, block),
        NodeKind::Image => {
            push_title(out, block);
            extract_image(block, out);
        }
        NodeKind::Table => {
            push_title(out, block);
            if let Some(table) = &block.table {
                for row in table.rows() {
                    for cell in row {
                        push(out, &cell.text);
                    }
                }
            }
        }
        NodeKind::Example | NodeKind::Open => {
            tracing::error!(kind = block.kind.as_str(), "unhandled block kind");
        }
        NodeKind::ThematicBreak | NodeKind::PageBreak | NodeKind::Toc => {}
    }

    for child in &block.children {
        match child {
            Child::Node(node) => walk(node, filter, out),
            Child::Group(blocks) => {
                for node in blocks {
                    walk(node, filter, out);
                }
            }
        }
    }
}

fn extract_image(block: &Block, out: &mut Vec<Extraction>) {
    let Some(target) = block.attributes.get("target") else {
        return;
    };
    push(out, target);
    // Alt texts that merely repeat the file stem carry no prose.
    let stem = filename_stem(target);
    for key in ["alt", "default-alt"] {
        if let Some(value) = block.attributes.get(key) {
            if value != stem {
                push(out, value);
            }
        }
    }
}

/// Final path component without its last extension. Comparison against alt
/// text is exact and case-sensitive.
pub(crate) fn filename_stem(target: &str) -> &str {
    let name = target.rsplit('/').next().unwrap_or(target);
    match name.rfind('.') {
        Some(index) if index > 0 => &name[..index],
        _ => name,
    }
}
