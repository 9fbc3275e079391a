//! Rewriting a document with transformed text.
//!
//! `rewrite` parses the source with the directive-smuggling hooks, then
//! serializes the tree back to AsciiDoc, passing every translatable chunk
//! through the caller's transform. The output is not a byte-level copy of
//! the input: attribute lists are normalized, tables get explicit `cols`
//! and `options`, and lists are re-indented. What is preserved is block
//! structure, so re-parsing the output yields an equivalent tree.

use crate::ast::{Block, Cell, Child, ListKind, NodeKind};
use crate::attributes;
use crate::directives::{self, CellSegment, DirectiveRecord, DIRECTIVE_MARKER};
use crate::error::GettextError;
use crate::parser::{self, ParseOptions};
use regex::Regex;
use std::sync::LazyLock;

static NEEDS_QUOTING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[ ,"']"#).expect("static regex"));

/// Options for a single [`rewrite`] call.
#[derive(Default)]
pub struct RewriteOptions {
    /// Attribute assignments applied before the document is read.
    pub attributes: Vec<(String, String)>,
}

/// Parse `source` and serialize it back with every translatable chunk
/// passed through `transform`.
pub fn rewrite<F>(
    source: &str,
    transform: F,
    options: &RewriteOptions,
) -> Result<String, GettextError>
where
    F: Fn(&str) -> String,
{
    let parse_options = ParseOptions {
        attributes: options.attributes.clone(),
        hooks: directives::rewrite_hooks(),
    };
    let document = parser::parse(source, &parse_options)?;
    let mut writer = Writer {
        out: String::new(),
        transform: &transform,
        list_stack: Vec::new(),
    };
    writer.write_block(&document)?;
    Ok(writer.out)
}

/// Quote an attribute value if it contains a separator or quote character.
pub fn quote_attribute_value_if_needed(value: &str) -> String {
    if NEEDS_QUOTING_RE.is_match(value) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Escape cell separators inside table cell text.
pub fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}

struct ListFrame {
    kind: ListKind,
    depth: usize,
}

struct Writer<'a> {
    out: String,
    transform: &'a dyn Fn(&str) -> String,
    list_stack: Vec<ListFrame>,
}

impl<'a> Writer<'a> {
    fn t(&self, text: &str) -> String {
        (self.transform)(text)
    }

    fn write_block(&mut self, block: &Block) -> Result<(), GettextError> {
        self.open_block(block)?;
        for child in &block.children {
            match child {
                Child::Node(node) => self.write_block(node)?,
                Child::Group(blocks) => {
                    for node in blocks {
                        self.write_block(node)?;
                    }
                }
            }
        }
        self.close_block(block)
    }

    fn open_block(&mut self, block: &Block) -> Result<(), GettextError> {
        match block.kind {
            NodeKind::Document => self.open_document(block),
            NodeKind::Preamble => {}
            NodeKind::Section => {
                self.write_meta(block);
                if let Some(title) = &block.title {
                    let markers = "=".repeat(block.level + 1);
                    self.out.push_str(&format!("{markers} {}\n\n", self.t(title)));
                }
            }
            NodeKind::FloatingTitle => {
                self.write_meta(block);
                if let Some(title) = &block.title {
                    let markers = "=".repeat(block.level + 1);
                    self.out
                        .push_str(&format!("[float]\n{markers} {}\n\n", self.t(title)));
                }
            }
            NodeKind::Paragraph => {
                self.write_meta(block);
                self.write_title(block);
                let attrs = self.attributes_string(block, &[], &[], &[]);
                match (&block.style, attrs.is_empty()) {
                    (Some(style), true) => self.out.push_str(&format!("[{style}]\n")),
                    (Some(style), false) => self.out.push_str(&format!("[{style},{attrs}]\n")),
                    (None, false) => self.out.push_str(&format!("[{attrs}]\n")),
                    (None, true) => {}
                }
                self.out.push_str(&format!("{}\n\n", self.t(&block.text)));
            }
            NodeKind::Admonition => {
                self.write_meta(block);
                self.write_title(block);
                if let Some(style) = &block.style {
                    self.out.push_str(&format!("[{style}]\n"));
                }
                self.out.push_str("====\n");
            }
            NodeKind::Sidebar => {
                self.write_meta(block);
                self.write_title(block);
                self.out.push_str("****\n");
            }
            NodeKind::Quote => {
                self.write_meta(block);
                self.write_title(block);
                self.write_quote_attr_line(block, "quote");
                self.out.push_str("____\n");
            }
            NodeKind::Verse => {
                self.write_meta(block);
                self.write_title(block);
                self.write_quote_attr_line(block, "verse");
                self.out
                    .push_str(&format!("____\n{}\n____\n\n", self.t(&block.text)));
            }
            NodeKind::Listing => {
                self.write_meta(block);
                self.write_title(block);
                let mut parts: Vec<String> = Vec::new();
                if let Some(style) = &block.style {
                    parts.push(style.clone());
                }
                if let Some(language) = block.attributes.get("language") {
                    parts.push(language.to_string());
                }
                let named = self.attributes_string(block, &[], &["language"], &[]);
                if !named.is_empty() {
                    parts.push(named);
                }
                if !parts.is_empty() {
                    self.out.push_str(&format!("[{}]\n", parts.join(",")));
                }
                self.out
                    .push_str(&format!("----\n{}\n----\n\n", self.t(&block.text)));
            }
            NodeKind::Literal => {
                self.write_meta(block);
                self.write_title(block);
                self.out
                    .push_str(&format!("....\n{}\n....\n\n", self.t(&block.text)));
            }
            NodeKind::Pass => {
                self.write_meta(block);
                self.write_title(block);
                if block.attributes.contains(DIRECTIVE_MARKER) {
                    let record = DirectiveRecord::decode(&block.text)?;
                    self.out
                        .push_str(&format!("{}\n\n", record.restore(self.transform)));
                } else {
                    self.out
                        .push_str(&format!("++++\n{}\n++++\n\n", block.text));
                }
            }
            NodeKind::Image => {
                self.write_meta(block);
                self.write_title(block);
                let target = block.attributes.get("target").unwrap_or("").to_string();
                let attrs = self.attributes_string(
                    block,
                    &["alt", "default-alt", "caption"],
                    &["target", "figure-number"],
                    &[],
                );
                self.out
                    .push_str(&format!("image::{}[{attrs}]\n\n", self.t(&target)));
            }
            NodeKind::Table => self.open_table(block)?,
            NodeKind::DescriptionList | NodeKind::OrderedList | NodeKind::UnorderedList => {
                self.write_meta(block);
                self.write_title(block);
                if let Some(kind) = block.kind.list_kind() {
                    self.push_list(kind);
                }
            }
            NodeKind::ListItem => self.write_list_item(block)?,
            NodeKind::ThematicBreak => {
                self.write_meta(block);
                self.out.push_str("'''\n\n");
            }
            NodeKind::PageBreak => {
                self.write_meta(block);
                self.out.push_str("<<<\n\n");
            }
            NodeKind::Toc => {
                self.write_meta(block);
                self.out.push_str("toc::[]\n\n");
            }
            NodeKind::Example | NodeKind::Open => {
                tracing::error!(kind = block.kind.as_str(), "unhandled block kind");
            }
        }
        Ok(())
    }

    fn close_block(&mut self, block: &Block) -> Result<(), GettextError> {
        match block.kind {
            NodeKind::Admonition => self.out.push_str("====\n\n"),
            NodeKind::Sidebar => self.out.push_str("****\n\n"),
            NodeKind::Quote => self.out.push_str("____\n\n"),
            NodeKind::DescriptionList | NodeKind::OrderedList | NodeKind::UnorderedList => {
                if let Some(kind) = block.kind.list_kind() {
                    self.pop_list(kind)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn open_document(&mut self, block: &Block) {
        let mut wrote_header = false;
        if let Some(title) = &block.title {
            self.out.push_str(&format!("= {}\n", self.t(title)));
            if let Some(authors) = block.attributes.get("authors") {
                self.out.push_str(&format!("{authors}\n"));
            }
            wrote_header = true;
        }
        for (key, value) in &block.attribute_entries {
            self.write_entry(key, value);
            wrote_header = true;
        }
        if wrote_header {
            self.out.push('\n');
        }
    }

    fn open_table(&mut self, block: &Block) -> Result<(), GettextError> {
        self.write_meta(block);
        self.write_title(block);
        let Some(table) = &block.table else {
            tracing::error!("table block without table data");
            return Ok(());
        };

        let mut extra: Vec<(String, String)> = Vec::new();
        if !block.attributes.contains("cols") {
            extra.push(("cols".to_string(), table.cols.to_string()));
        }
        let mut options: Vec<String> = block
            .attributes
            .get("options")
            .map(|value| value.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_default();
        if !table.head.is_empty() && !options.iter().any(|o| o == "header") {
            options.push("header".to_string());
        }
        if !table.foot.is_empty() && !options.iter().any(|o| o == "footer") {
            options.push("footer".to_string());
        }
        if !options.is_empty() {
            extra.push(("options".to_string(), options.join(",")));
        }

        let attrs = self.attributes_string(
            block,
            &["caption"],
            &["rowcount", "colcount", "tablepcwidth", "options"],
            &extra,
        );
        self.out.push_str(&format!("[{attrs}]\n|===\n"));
        for row in table.rows() {
            for cell in row {
                self.write_cell(cell)?;
            }
            self.out.push('\n');
        }
        self.out.push_str("|===\n\n");
        Ok(())
    }

    fn write_cell(&mut self, cell: &Cell) -> Result<(), GettextError> {
        let colspan = cell.colspan.unwrap_or(1);
        let rowspan = cell.rowspan.unwrap_or(1);
        let mut content_lines: Vec<String> = Vec::new();
        for segment in directives::split_cell_text(&cell.text)? {
            match segment {
                CellSegment::Literal(text) => {
                    content_lines.push(escape_pipes(&self.t(&text)));
                }
                CellSegment::Directive(record) => {
                    content_lines.push(record.restore(self.transform));
                }
            }
        }
        let content = content_lines.join("\n");
        self.out
            .push_str(&format!("{colspan}.{rowspan}+|{content}\n"));
        Ok(())
    }

    fn write_list_item(&mut self, block: &Block) -> Result<(), GettextError> {
        let Some(frame) = self.list_stack.last() else {
            return Err(GettextError::ListNesting(
                "list item outside of any list".to_string(),
            ));
        };
        let indent = "  ".repeat(frame.depth);
        let line = match (frame.kind, block.style.as_deref()) {
            (ListKind::Description, Some("description")) => {
                if block.text.is_empty() {
                    None
                } else {
                    Some(format!("{indent}{}\n", self.t(&block.text)))
                }
            }
            (ListKind::Description, _) => {
                let colons = ":".repeat(frame.depth + 1);
                Some(format!("{indent}{}{colons}\n", self.t(&block.text)))
            }
            (ListKind::Ordered, _) => {
                let marker = ".".repeat(frame.depth);
                Some(format!("{indent}{marker} {}\n", self.t(&block.text)))
            }
            (ListKind::Unordered, _) => {
                let marker = "*".repeat(frame.depth);
                Some(format!("{indent}{marker} {}\n", self.t(&block.text)))
            }
        };
        if let Some(line) = line {
            self.out.push_str(&line);
        }
        Ok(())
    }

    fn push_list(&mut self, kind: ListKind) {
        match self.list_stack.last_mut() {
            Some(frame) if frame.kind == kind => frame.depth += 1,
            _ => self.list_stack.push(ListFrame { kind, depth: 1 }),
        }
    }

    fn pop_list(&mut self, kind: ListKind) -> Result<(), GettextError> {
        let Some(frame) = self.list_stack.last_mut() else {
            return Err(GettextError::ListNesting(
                "closing a list that was never opened".to_string(),
            ));
        };
        if frame.kind != kind {
            return Err(GettextError::ListNesting(format!(
                "closing a {:?} list while a {:?} list is open",
                kind, frame.kind
            )));
        }
        frame.depth -= 1;
        if frame.depth == 0 {
            self.list_stack.pop();
        }
        if self.list_stack.is_empty() {
            // Keep adjacent sibling lists apart after re-serialization.
            self.out.push_str("\n\n//-\n\n");
        }
        Ok(())
    }

    fn write_quote_attr_line(&mut self, block: &Block, style: &str) {
        let attrs = self.attributes_string(block, &["citetitle"], &["style"], &[]);
        if attrs.is_empty() {
            self.out.push_str(&format!("[{style}]\n"));
        } else {
            self.out.push_str(&format!("[{style}, {attrs}]\n"));
        }
    }

    fn write_meta(&mut self, block: &Block) {
        for (key, value) in &block.attribute_entries {
            self.write_entry(key, value);
        }
        if let Some(id) = &block.id {
            self.out.push_str(&format!("[[{id}]]\n"));
        }
    }

    fn write_entry(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.out.push_str(&format!(":{key}:\n"));
            return;
        }
        let value = if attributes::is_non_localizable_builtin(key) {
            value.to_string()
        } else {
            self.t(value)
        };
        self.out.push_str(&format!(":{key}: {value}\n"));
    }

    fn write_title(&mut self, block: &Block) {
        if let Some(title) = &block.title {
            if !title.is_empty() {
                self.out.push_str(&format!(".{}\n", self.t(title)));
            }
        }
    }

    /// Serialize block attributes as `key=value` pairs, transforming the
    /// values of `localizable` keys and skipping `excluding` keys. `extra`
    /// pairs are appended verbatim.
    fn attributes_string(
        &self,
        block: &Block,
        localizable: &[&str],
        excluding: &[&str],
        extra: &[(String, String)],
    ) -> String {
        let mut parts: Vec<String> = Vec::new();
        for (key, value) in block.attributes.iter() {
            if excluding.contains(&key) || extra.iter().any(|(k, _)| k == key) {
                continue;
            }
            let value = if localizable.contains(&key) {
                self.t(value)
            } else {
                value.to_string()
            };
            parts.push(format!("{key}={}", quote_attribute_value_if_needed(&value)));
        }
        for (key, value) in extra {
            parts.push(format!("{key}={}", quote_attribute_value_if_needed(value)));
        }
        parts.join(",")
    }
}
