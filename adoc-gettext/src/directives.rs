//! Preprocessor directive handling.
//!
//! AsciiDoc preprocessor directives (`ifdef`, `ifndef`, `ifeval`, `endif`,
//! `include`) vanish during normal parsing, but a rewritten document must
//! carry them through verbatim. The rewrite pipeline therefore smuggles
//! each directive line past the parser: the line is replaced by a styled
//! block whose body is a JSON [`DirectiveRecord`], a block handler turns
//! that block into a `pass` pseudo node, and the serializer decodes the
//! record and restores the original directive line.
//!
//! Extraction does not need the directives themselves, only the conditional
//! content of `ifdef`/`ifndef` one-liners, so its preprocessor strips the
//! directive lines and keeps that content as plain text.

use crate::ast::{Block, NodeKind};
use crate::error::GettextError;
use crate::parser::{BlockMeta, ParserHooks};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Style name of the smuggling block. Anything carrying this style (or the
/// matching block attribute) is codec plumbing, never document content.
pub const DIRECTIVE_MARKER: &str = "adoc-gettext-directive";

static IFEVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ifeval::\[(.*)\]\s*$").expect("static regex"));
static IFDEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ifdef|ifndef)::([^\[]+)\[(.*)\]\s*$").expect("static regex"));
static ENDIF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^endif::([^\[]*)\[(.*)\]\s*$").expect("static regex"));
static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^include::([^\[]+)\[(.*)\]\s*$").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectiveType {
    #[serde(rename = "ifeval")]
    IfEval,
    #[serde(rename = "ifdef")]
    IfDef,
    #[serde(rename = "ifndef")]
    IfNdef,
    #[serde(rename = "endif")]
    EndIf,
    #[serde(rename = "include")]
    Include,
}

impl DirectiveType {
    fn keyword(&self) -> &'static str {
        match self {
            DirectiveType::IfEval => "ifeval",
            DirectiveType::IfDef => "ifdef",
            DirectiveType::IfNdef => "ifndef",
            DirectiveType::EndIf => "endif",
            DirectiveType::Include => "include",
        }
    }
}

/// One smuggled directive line.
///
/// `name` is the attribute name (or include target); `content` is the
/// bracketed payload. Only `ifdef`/`ifndef` content is prose, so only that
/// content passes through the transform on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveRecord {
    #[serde(rename = "type")]
    pub directive_type: DirectiveType,
    pub name: String,
    pub content: String,
}

impl DirectiveRecord {
    /// Serialize to the single-line JSON body of a smuggling block.
    /// A record is three plain strings, serialization cannot fail.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(input: &str) -> Result<Self, GettextError> {
        serde_json::from_str(input.trim())
            .map_err(|err| GettextError::MalformedDirective(format!("{input:?}: {err}")))
    }

    /// Restore the original directive line, passing conditional content
    /// through `transform`.
    pub fn restore(&self, transform: &dyn Fn(&str) -> String) -> String {
        let content = match self.directive_type {
            DirectiveType::IfDef | DirectiveType::IfNdef if !self.content.is_empty() => {
                transform(&self.content)
            }
            _ => self.content.clone(),
        };
        format!("{}::{}[{}]", self.directive_type.keyword(), self.name, content)
    }
}

/// Recognize a preprocessor directive line.
pub fn recognize(line: &str) -> Option<DirectiveRecord> {
    if let Some(caps) = IFEVAL_RE.captures(line) {
        return Some(DirectiveRecord {
            directive_type: DirectiveType::IfEval,
            name: String::new(),
            content: caps[1].to_string(),
        });
    }
    if let Some(caps) = IFDEF_RE.captures(line) {
        let directive_type = if &caps[1] == "ifdef" {
            DirectiveType::IfDef
        } else {
            DirectiveType::IfNdef
        };
        return Some(DirectiveRecord {
            directive_type,
            name: caps[2].to_string(),
            content: caps[3].to_string(),
        });
    }
    if let Some(caps) = ENDIF_RE.captures(line) {
        return Some(DirectiveRecord {
            directive_type: DirectiveType::EndIf,
            name: caps[1].to_string(),
            content: caps[2].to_string(),
        });
    }
    if let Some(caps) = INCLUDE_RE.captures(line) {
        return Some(DirectiveRecord {
            directive_type: DirectiveType::Include,
            name: caps[1].to_string(),
            content: caps[2].to_string(),
        });
    }
    None
}

/// Parser hooks for extraction: directives are dropped, keeping only the
/// non-empty content of `ifdef`/`ifndef` one-liners as plain lines.
pub fn extract_hooks() -> ParserHooks {
    ParserHooks::new().with_preprocessor(strip_directives)
}

/// Parser hooks for rewriting: directives survive as smuggling blocks that
/// materialize into `pass` pseudo nodes.
pub fn rewrite_hooks() -> ParserHooks {
    ParserHooks::new()
        .with_preprocessor(smuggle_directives)
        .with_block(DIRECTIVE_MARKER, materialize_pseudo_node)
}

fn strip_directives(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.trim_end();
            if let Some(record) = recognize(trimmed) {
                return match record.directive_type {
                    DirectiveType::IfDef | DirectiveType::IfNdef
                        if !record.content.is_empty() =>
                    {
                        Some(record.content)
                    }
                    _ => None,
                };
            }
            // Bracketless forms still begin a conditional or include.
            if trimmed.starts_with("ifeval::")
                || trimmed.starts_with("endif::")
                || trimmed.starts_with("include::")
            {
                return None;
            }
            Some(line)
        })
        .collect()
}

fn smuggle_directives(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        match recognize(line.trim_end()) {
            Some(record) => {
                out.push(format!("[{DIRECTIVE_MARKER}]"));
                out.push(record.encode());
                out.push(String::new());
            }
            None => out.push(line),
        }
    }
    out
}

fn materialize_pseudo_node(meta: BlockMeta, lines: Vec<String>) -> Block {
    let mut block = Block::new(NodeKind::Pass);
    block.id = meta.id;
    block.title = meta.title;
    block.attribute_entries = meta.entries;
    for (key, value) in meta.attributes.iter() {
        block.attributes.set(key, value);
    }
    block.attributes.set(DIRECTIVE_MARKER, "");
    block.text = lines.join("\n");
    block
}

/// One decoded segment of table-cell text: literal prose, or a directive
/// that was smuggled inside the cell.
#[derive(Debug, PartialEq)]
pub enum CellSegment {
    Literal(String),
    Directive(DirectiveRecord),
}

/// Split cell text into literal runs and embedded directive records.
pub fn split_cell_text(text: &str) -> Result<Vec<CellSegment>, GettextError> {
    let marker = format!("[{DIRECTIVE_MARKER}]");
    let mut segments = Vec::new();
    let mut literal: Vec<&str> = Vec::new();
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        if line.trim_end() == marker {
            if !literal.is_empty() {
                segments.push(CellSegment::Literal(literal.join("\n")));
                literal.clear();
            }
            let record_line = lines.next().ok_or_else(|| {
                GettextError::MalformedDirective(
                    "directive marker without a record line".to_string(),
                )
            })?;
            segments.push(CellSegment::Directive(DirectiveRecord::decode(record_line)?));
        } else {
            literal.push(line);
        }
    }
    if !literal.is_empty() {
        segments.push(CellSegment::Literal(literal.join("\n")));
    }
    Ok(segments)
}
