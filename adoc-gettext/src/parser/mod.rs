//! Block-level AsciiDoc parser.
//!
//! The parser covers the block grammar the walkers care about: the document
//! header, sections, paragraphs, the three list families, delimited blocks,
//! tables, block macros and block metadata lines. Inline markup is left
//! untouched inside block text.
//!
//! Callers customize parsing through [`ParseOptions`]: a line preprocessor
//! that runs before any grammar is applied, and per-style block handlers
//! that take over materialization of a block. Both hooks travel with the
//! options value, so two parses with different hooks never interfere.

mod attrlist;
mod list;
mod table;

use crate::ast::{Attributes, Block, Child, NodeKind};
use crate::attributes::LOCALIZABLE_BUILTIN_ATTRIBUTES;
use crate::error::GettextError;
use regex::Regex;
use std::sync::LazyLock;

static DOC_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^= +(\S.*?)\s*$").expect("static regex"));
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(={2,}) +(\S.*?)\s*$").expect("static regex"));
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([A-Za-z0-9_][A-Za-z0-9_-]*):(?: +(.*\S))? *$").expect("static regex")
});
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[([^\[\]]+)\]\]\s*$").expect("static regex"));
static ATTRLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*)\]\s*$").expect("static regex"));
static BLOCK_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.([^\s.].*?)\s*$").expect("static regex"));
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^image::([^\[]+)\[(.*)\]\s*$").expect("static regex"));
static TOC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^toc::\[[^\]]*\]\s*$").expect("static regex"));
static TABLE_DELIM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|={3,}\s*$").expect("static regex"));
static ADMONITION_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(NOTE|TIP|IMPORTANT|WARNING|CAUTION): +(\S.*)$").expect("static regex")
});

const ADMONITION_STYLES: &[&str] = &["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"];

/// Rewrites the raw line list before any block grammar runs.
pub type Preprocessor = fn(Vec<String>) -> Vec<String>;

/// Builds a block from collected metadata and the raw lines of a styled
/// paragraph. Registered per style name.
pub type BlockHandler = fn(BlockMeta, Vec<String>) -> Block;

/// Hooks that customize a single parse.
#[derive(Default)]
pub struct ParserHooks {
    preprocessor: Option<Preprocessor>,
    block_handlers: Vec<(String, BlockHandler)>,
}

impl ParserHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    pub fn with_block(mut self, style: &str, handler: BlockHandler) -> Self {
        self.block_handlers.push((style.to_string(), handler));
        self
    }

    fn preprocess(&self, lines: Vec<String>) -> Vec<String> {
        match self.preprocessor {
            Some(preprocessor) => preprocessor(lines),
            None => lines,
        }
    }

    fn block_handler(&self, style: &str) -> Option<BlockHandler> {
        self.block_handlers
            .iter()
            .find(|(name, _)| name == style)
            .map(|(_, handler)| *handler)
    }
}

/// Options for a single [`parse`] call.
#[derive(Default)]
pub struct ParseOptions {
    /// Attribute assignments applied before the document is read, as if
    /// given on the command line.
    pub attributes: Vec<(String, String)>,
    pub hooks: ParserHooks,
}

/// Metadata lines collected ahead of a block: anchors, block titles,
/// attribute lists and attribute entries.
#[derive(Debug, Default, Clone)]
pub struct BlockMeta {
    pub id: Option<String>,
    pub title: Option<String>,
    pub style: Option<String>,
    pub attributes: Attributes,
    pub positionals: Vec<String>,
    pub entries: Vec<(String, String)>,
}

impl BlockMeta {
    fn take(&mut self) -> BlockMeta {
        std::mem::take(self)
    }
}

struct Cursor {
    lines: Vec<String>,
    pos: usize,
}

impl Cursor {
    fn new(lines: Vec<String>) -> Self {
        Cursor { lines, pos: 0 }
    }

    fn peek(&self) -> Option<&str> {
        self.lines.get(self.pos).map(String::as_str)
    }

    fn peek_at(&self, offset: usize) -> Option<&str> {
        self.lines.get(self.pos + offset).map(String::as_str)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

struct DocState<'a> {
    attributes: Attributes,
    hooks: &'a ParserHooks,
}

/// Parse `source` into a document tree.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Block, GettextError> {
    let lines: Vec<String> = source.lines().map(str::to_string).collect();
    let lines = options.hooks.preprocess(lines);

    let mut attributes: Attributes = LOCALIZABLE_BUILTIN_ATTRIBUTES
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    for (key, value) in &options.attributes {
        attributes.set(key.clone(), value.clone());
    }

    let mut state = DocState {
        attributes,
        hooks: &options.hooks,
    };
    let mut cursor = Cursor::new(lines);

    let mut document = Block::new(NodeKind::Document);
    parse_header(&mut cursor, &mut document, &mut state);
    document.children = parse_blocks(&mut cursor, &mut state, 0)?;
    document.attributes = state.attributes;
    wrap_preamble(&mut document);
    Ok(document)
}

/// The document header: an optional `= Title` line, an optional author
/// line, and a run of attribute entries. The header ends at the first
/// blank line.
fn parse_header(cursor: &mut Cursor, document: &mut Block, state: &mut DocState) {
    skip_blanks_and_comments(cursor);

    if let Some(line) = cursor.peek() {
        if let Some(caps) = DOC_TITLE_RE.captures(line) {
            document.title = Some(caps[1].to_string());
            cursor.advance();
            if let Some(next) = cursor.peek() {
                let next = next.trim().to_string();
                if !next.is_empty()
                    && !interrupts_paragraph(&next)
                    && !ANCHOR_RE.is_match(&next)
                    && !ATTRLIST_RE.is_match(&next)
                    && !BLOCK_TITLE_RE.is_match(&next)
                {
                    state.attributes.set("authors", next);
                    cursor.advance();
                }
            }
        }
    }

    while let Some(line) = cursor.peek() {
        let Some(caps) = ENTRY_RE.captures(line) else {
            break;
        };
        let key = caps[1].to_string();
        let value = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
        document.attribute_entries.push((key.clone(), value.clone()));
        state.attributes.set(key, value);
        cursor.advance();
    }
}

fn skip_blanks_and_comments(cursor: &mut Cursor) {
    while let Some(line) = cursor.peek() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_line_comment(trimmed) {
            cursor.advance();
        } else if is_comment_fence(trimmed) {
            skip_comment_block(cursor);
        } else {
            break;
        }
    }
}

fn is_line_comment(line: &str) -> bool {
    line.starts_with("//") && !line.starts_with("////")
}

fn is_comment_fence(line: &str) -> bool {
    line.len() >= 4 && line.chars().all(|c| c == '/')
}

fn skip_comment_block(cursor: &mut Cursor) {
    cursor.advance();
    while let Some(line) = cursor.peek() {
        let closed = is_comment_fence(line.trim());
        cursor.advance();
        if closed {
            break;
        }
    }
}

/// Delimited block families keyed by their fence character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Listing,
    Literal,
    Pass,
    Sidebar,
    Example,
    Quote,
    AirQuotes,
    Open,
}

fn delimiter_for(line: &str) -> Option<Delimiter> {
    let trimmed = line.trim_end();
    if trimmed == "\"\"" {
        return Some(Delimiter::AirQuotes);
    }
    if trimmed == "--" {
        return Some(Delimiter::Open);
    }
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    if !trimmed.chars().all(|c| c == first) || trimmed.len() < 4 {
        return None;
    }
    match first {
        '-' => Some(Delimiter::Listing),
        '.' => Some(Delimiter::Literal),
        '+' => Some(Delimiter::Pass),
        '*' => Some(Delimiter::Sidebar),
        '=' => Some(Delimiter::Example),
        '_' => Some(Delimiter::Quote),
        _ => None,
    }
}

fn is_delimiter_line(line: &str) -> bool {
    delimiter_for(line).is_some() || TABLE_DELIM_RE.is_match(line)
}

/// Lines that end a paragraph (and a list item run) when they appear
/// without a separating blank line.
fn interrupts_paragraph(line: &str) -> bool {
    let trimmed = line.trim_end();
    trimmed.trim().is_empty()
        || trimmed.starts_with("//")
        || ENTRY_RE.is_match(trimmed)
        || HEADING_RE.is_match(trimmed)
        || is_delimiter_line(trimmed)
        || list::match_marker(trimmed).is_some()
        || IMAGE_RE.is_match(trimmed)
        || TOC_RE.is_match(trimmed)
        || trimmed.trim() == "<<<"
}

fn is_float_style(meta: &BlockMeta) -> bool {
    matches!(meta.style.as_deref(), Some("float") | Some("discrete"))
}

fn parse_blocks(
    cursor: &mut Cursor,
    state: &mut DocState,
    stop_level: usize,
) -> Result<Vec<Child>, GettextError> {
    let mut children: Vec<Child> = Vec::new();
    let mut meta = BlockMeta::default();
    let mut meta_start: Option<usize> = None;

    while let Some(current) = cursor.peek() {
        let line = current.to_string();
        let trimmed = line.trim();

        if trimmed.is_empty() {
            cursor.advance();
            continue;
        }
        if is_comment_fence(trimmed) {
            skip_comment_block(cursor);
            continue;
        }
        if is_line_comment(trimmed) {
            cursor.advance();
            continue;
        }

        if let Some(caps) = ENTRY_RE.captures(&line) {
            let key = caps[1].to_string();
            let value = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
            state.attributes.set(key.clone(), value.clone());
            meta_start.get_or_insert(cursor.pos);
            meta.entries.push((key, value));
            cursor.advance();
            continue;
        }
        if let Some(caps) = ANCHOR_RE.captures(&line) {
            meta_start.get_or_insert(cursor.pos);
            meta.id = Some(caps[1].to_string());
            cursor.advance();
            continue;
        }
        if let Some(caps) = ATTRLIST_RE.captures(&line) {
            meta_start.get_or_insert(cursor.pos);
            attrlist::merge_into_meta(&caps[1], &mut meta);
            cursor.advance();
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(&line) {
            let level = caps[1].len() - 1;
            if is_float_style(&meta) {
                cursor.advance();
                children.push(Child::Node(floating_title(&caps[2], level, meta.take())));
                meta_start = None;
                continue;
            }
            if stop_level > 0 && level <= stop_level {
                // The heading (and any metadata we buffered for it)
                // belongs to an enclosing section.
                if let Some(start) = meta_start {
                    cursor.pos = start;
                }
                break;
            }
            cursor.advance();
            let mut section = Block::new(NodeKind::Section);
            section.level = level;
            section.title = Some(caps[2].to_string());
            apply_meta(&mut section, meta.take());
            meta_start = None;
            section.children = parse_blocks(cursor, state, level)?;
            children.push(Child::Node(section));
            continue;
        }

        if let Some(caps) = BLOCK_TITLE_RE.captures(&line) {
            // `.Title` has no space after the dot; ordered list markers do.
            if !caps[1].starts_with(char::is_whitespace) && list::match_marker(&line).is_none() {
                meta_start.get_or_insert(cursor.pos);
                meta.title = Some(caps[1].to_string());
                cursor.advance();
                continue;
            }
        }

        if TABLE_DELIM_RE.is_match(trimmed) {
            let inner = collect_fenced(cursor, &line)?;
            let mut block = Block::new(NodeKind::Table);
            apply_meta(&mut block, meta.take());
            meta_start = None;
            block.table = Some(table::parse_table(&inner, &block)?);
            children.push(Child::Node(block));
            continue;
        }

        if let Some(delimiter) = delimiter_for(&line) {
            let inner = collect_fenced(cursor, &line)?;
            let block = build_delimited(delimiter, inner, meta.take(), state)?;
            meta_start = None;
            children.push(Child::Node(block));
            continue;
        }

        if TOC_RE.is_match(trimmed) {
            cursor.advance();
            let mut block = Block::new(NodeKind::Toc);
            apply_meta(&mut block, meta.take());
            meta_start = None;
            children.push(Child::Node(block));
            continue;
        }

        if let Some(caps) = IMAGE_RE.captures(trimmed) {
            cursor.advance();
            let block = build_image(&caps[1], &caps[2], meta.take());
            meta_start = None;
            children.push(Child::Node(block));
            continue;
        }

        if trimmed == "<<<" {
            cursor.advance();
            let mut block = Block::new(NodeKind::PageBreak);
            apply_meta(&mut block, meta.take());
            meta_start = None;
            children.push(Child::Node(block));
            continue;
        }

        if trimmed == "---" || trimmed == "'''" {
            cursor.advance();
            let mut block = Block::new(NodeKind::ThematicBreak);
            apply_meta(&mut block, meta.take());
            meta_start = None;
            children.push(Child::Node(block));
            continue;
        }

        if let Some(caps) = ADMONITION_LINE_RE.captures(&line) {
            let style = caps[1].to_string();
            let first = caps[2].to_string();
            cursor.advance();
            let lines = collect_paragraph(cursor, first);
            let mut paragraph = Block::new(NodeKind::Paragraph);
            paragraph.text = lines.join("\n");
            let mut block = Block::new(NodeKind::Admonition);
            block.style = Some(style);
            apply_meta(&mut block, meta.take());
            meta_start = None;
            block.push(paragraph);
            children.push(Child::Node(block));
            continue;
        }

        // Registered handlers own their styled block outright, before any
        // other reading of its first line.
        if let Some(style) = meta.style.clone() {
            if let Some(handler) = state.hooks.block_handler(&style) {
                cursor.advance();
                let lines = collect_paragraph(cursor, trimmed.to_string());
                children.push(Child::Node(handler(meta.take(), lines)));
                meta_start = None;
                continue;
            }
        }

        if list::match_marker(&line).is_some() {
            let blocks = list::parse_lists(cursor);
            let mut pending = Some(meta.take());
            meta_start = None;
            for mut block in blocks {
                if let Some(meta) = pending.take() {
                    apply_meta(&mut block, meta);
                }
                children.push(Child::Node(block));
            }
            continue;
        }

        // Setext-style floating title: `[float]` metadata, the title line,
        // then a dashed underline of roughly the same width.
        if is_float_style(&meta) {
            if let Some(underline) = cursor.peek_at(1) {
                let underline = underline.trim_end();
                if underline.len() >= 2
                    && underline.chars().all(|c| c == '-')
                    && underline.len().abs_diff(trimmed.len()) <= 1
                {
                    cursor.advance();
                    cursor.advance();
                    children.push(Child::Node(floating_title(trimmed, 1, meta.take())));
                    meta_start = None;
                    continue;
                }
            }
        }

        if let Some(style) = meta.style.clone() {
            if style == "listing" || style == "source" || style == "literal" {
                cursor.advance();
                let lines = collect_paragraph(cursor, line.clone());
                let kind = if style == "literal" {
                    NodeKind::Literal
                } else {
                    NodeKind::Listing
                };
                let mut block = Block::new(kind);
                block.text = lines.join("\n");
                let positionals = std::mem::take(&mut meta.positionals);
                apply_meta(&mut block, meta.take());
                meta_start = None;
                set_listing_language(&mut block, &positionals);
                children.push(Child::Node(block));
                continue;
            }
            if ADMONITION_STYLES.contains(&style.as_str()) {
                cursor.advance();
                let lines = collect_paragraph(cursor, line.clone());
                let mut paragraph = Block::new(NodeKind::Paragraph);
                paragraph.text = lines.join("\n");
                let mut block = Block::new(NodeKind::Admonition);
                apply_meta(&mut block, meta.take());
                meta_start = None;
                block.push(paragraph);
                children.push(Child::Node(block));
                continue;
            }
        }

        cursor.advance();
        let lines = collect_paragraph(cursor, line);
        let mut block = Block::new(NodeKind::Paragraph);
        block.text = lines.join("\n");
        apply_meta(&mut block, meta.take());
        meta_start = None;
        children.push(Child::Node(block));
    }

    Ok(children)
}

fn collect_paragraph(cursor: &mut Cursor, first: String) -> Vec<String> {
    let mut lines = vec![first.trim_end().to_string()];
    while let Some(next) = cursor.peek() {
        if interrupts_paragraph(next) {
            break;
        }
        lines.push(next.trim_end().to_string());
        cursor.advance();
    }
    lines
}

fn collect_fenced(cursor: &mut Cursor, open: &str) -> Result<Vec<String>, GettextError> {
    let open = open.trim_end().to_string();
    cursor.advance();
    let mut inner = Vec::new();
    while let Some(line) = cursor.peek() {
        if line.trim_end() == open {
            cursor.advance();
            return Ok(inner);
        }
        inner.push(line.to_string());
        cursor.advance();
    }
    Err(GettextError::Parse(format!(
        "unterminated delimited block `{open}`"
    )))
}

fn apply_meta(block: &mut Block, meta: BlockMeta) {
    block.id = meta.id;
    if block.title.is_none() {
        block.title = meta.title;
    }
    if block.style.is_none() {
        block.style = meta.style;
    }
    block.attribute_entries = meta.entries;
    for (key, value) in meta.attributes.iter() {
        block.attributes.set(key, value);
    }
}

fn floating_title(title: &str, level: usize, meta: BlockMeta) -> Block {
    let mut block = Block::new(NodeKind::FloatingTitle);
    block.level = level;
    block.title = Some(title.to_string());
    let mut meta = meta;
    meta.style = None;
    apply_meta(&mut block, meta);
    block
}

fn set_listing_language(block: &mut Block, positionals: &[String]) {
    if block.attributes.contains("language") {
        return;
    }
    if block.style.as_deref() == Some("source") {
        if let Some(language) = positionals.get(1).filter(|s| !s.is_empty()) {
            block.attributes.set("language", language.clone());
        }
    }
}

fn build_delimited(
    delimiter: Delimiter,
    inner: Vec<String>,
    mut meta: BlockMeta,
    state: &mut DocState,
) -> Result<Block, GettextError> {
    let positionals = std::mem::take(&mut meta.positionals);
    match delimiter {
        Delimiter::Listing => {
            let mut block = verbatim(NodeKind::Listing, inner, meta);
            set_listing_language(&mut block, &positionals);
            Ok(block)
        }
        Delimiter::Literal => Ok(verbatim(NodeKind::Literal, inner, meta)),
        Delimiter::Pass => Ok(verbatim(NodeKind::Pass, inner, meta)),
        Delimiter::Sidebar => container(NodeKind::Sidebar, inner, meta, state),
        Delimiter::Example => {
            let is_admonition = meta
                .style
                .as_deref()
                .map(|style| ADMONITION_STYLES.contains(&style))
                .unwrap_or(false);
            let kind = if is_admonition {
                NodeKind::Admonition
            } else {
                NodeKind::Example
            };
            container(kind, inner, meta, state)
        }
        Delimiter::Quote | Delimiter::AirQuotes => {
            if meta.style.as_deref() == Some("verse") {
                let mut block = verbatim(NodeKind::Verse, inner, meta);
                set_quote_attribution(&mut block, &positionals);
                Ok(block)
            } else {
                let mut block = container(NodeKind::Quote, inner, meta, state)?;
                set_quote_attribution(&mut block, &positionals);
                Ok(block)
            }
        }
        Delimiter::Open => container(NodeKind::Open, inner, meta, state),
    }
}

fn set_quote_attribution(block: &mut Block, positionals: &[String]) {
    for (index, key) in [(1, "attribution"), (2, "citetitle")] {
        if block.attributes.contains(key) {
            continue;
        }
        if let Some(value) = positionals.get(index).filter(|s| !s.is_empty()) {
            block.attributes.set(key, value.clone());
        }
    }
}

fn verbatim(kind: NodeKind, inner: Vec<String>, meta: BlockMeta) -> Block {
    let mut block = Block::new(kind);
    block.text = inner.join("\n");
    apply_meta(&mut block, meta);
    block
}

fn container(
    kind: NodeKind,
    inner: Vec<String>,
    meta: BlockMeta,
    state: &mut DocState,
) -> Result<Block, GettextError> {
    let mut block = Block::new(kind);
    apply_meta(&mut block, meta);
    let mut cursor = Cursor::new(inner);
    block.children = parse_blocks(&mut cursor, state, 0)?;
    Ok(block)
}

fn build_image(target: &str, attrlist_text: &str, meta: BlockMeta) -> Block {
    let mut block = Block::new(NodeKind::Image);
    apply_meta(&mut block, meta);
    let parsed = attrlist::parse_attrlist(attrlist_text);
    for (index, key) in [(0, "alt"), (1, "width"), (2, "height")] {
        if let Some(value) = parsed.positionals.get(index).filter(|s| !s.is_empty()) {
            block.attributes.set(key, value.clone());
        }
    }
    if block.id.is_none() {
        block.id = parsed.id;
    }
    if !parsed.roles.is_empty() {
        block.attributes.set("role", parsed.roles.join(" "));
    }
    if !parsed.options.is_empty() {
        block.attributes.set("options", parsed.options.join(","));
    }
    for (key, value) in parsed.named {
        block.attributes.set(key, value);
    }
    if !block.attributes.contains("alt") {
        block
            .attributes
            .set("alt", crate::extract::filename_stem(target).to_string());
    }
    block.attributes.set("target", target.trim());
    block
}

fn wrap_preamble(document: &mut Block) {
    if document.title.is_none() {
        return;
    }
    let first_section = document
        .children
        .iter()
        .position(|child| matches!(child, Child::Node(block) if block.kind == NodeKind::Section));
    let Some(split) = first_section else {
        return;
    };
    if split == 0 {
        return;
    }
    let rest = document.children.split_off(split);
    let lead = std::mem::replace(&mut document.children, rest);
    let mut preamble = Block::new(NodeKind::Preamble);
    preamble.children = lead;
    document.children.insert(0, Child::Node(preamble));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_plain(source: &str) -> Block {
        parse(source, &ParseOptions::default()).expect("document to parse")
    }

    fn node(child: &Child) -> &Block {
        match child {
            Child::Node(block) => block,
            Child::Group(_) => panic!("expected a plain node"),
        }
    }

    #[test]
    fn parses_document_header() {
        let doc = parse_plain("= The Title\nA. Author\n:my_var: value\n\nBody.\n");
        assert_eq!(doc.title.as_deref(), Some("The Title"));
        assert_eq!(doc.attributes.get("authors"), Some("A. Author"));
        assert_eq!(doc.attributes.get("my_var"), Some("value"));
        assert_eq!(
            doc.attribute_entries,
            vec![("my_var".to_string(), "value".to_string())]
        );
    }

    #[test]
    fn seeds_builtin_labels() {
        let doc = parse_plain("");
        assert_eq!(doc.attributes.get("caution-caption"), Some("Caution"));
        assert_eq!(doc.attributes.get("toc-title"), Some("Table of Contents"));
    }

    #[test]
    fn options_attributes_override_builtins() {
        let options = ParseOptions {
            attributes: vec![("note-caption".to_string(), "Nota".to_string())],
            ..Default::default()
        };
        let doc = parse("", &options).expect("document to parse");
        assert_eq!(doc.attributes.get("note-caption"), Some("Nota"));
    }

    #[test]
    fn nests_sections_by_level() {
        let doc = parse_plain("== One\n\n=== Two\n\n== Three\n");
        assert_eq!(doc.children.len(), 2);
        let one = node(&doc.children[0]);
        assert_eq!(one.kind, NodeKind::Section);
        assert_eq!(one.title.as_deref(), Some("One"));
        assert_eq!(one.children.len(), 1);
        let two = node(&one.children[0]);
        assert_eq!(two.level, 2);
        let three = node(&doc.children[1]);
        assert_eq!(three.title.as_deref(), Some("Three"));
    }

    #[test]
    fn wraps_preamble_before_first_section() {
        let doc = parse_plain("= Title\n\nPreamble body.\n\n== Section\n");
        let preamble = node(&doc.children[0]);
        assert_eq!(preamble.kind, NodeKind::Preamble);
        assert_eq!(node(&preamble.children[0]).text, "Preamble body.");
        assert_eq!(node(&doc.children[1]).kind, NodeKind::Section);
    }

    #[test]
    fn joins_paragraph_continuation_lines() {
        let doc = parse_plain("First line.\nSecond line.\n\nNext paragraph.\n");
        assert_eq!(doc.children.len(), 2);
        assert_eq!(node(&doc.children[0]).text, "First line.\nSecond line.");
        assert_eq!(node(&doc.children[1]).text, "Next paragraph.");
    }

    #[test]
    fn attaches_metadata_to_following_block() {
        let doc = parse_plain("[[the-id]]\n.The Title\n[role=\"xyz\"]\nBody text.\n");
        let paragraph = node(&doc.children[0]);
        assert_eq!(paragraph.id.as_deref(), Some("the-id"));
        assert_eq!(paragraph.title.as_deref(), Some("The Title"));
        assert_eq!(paragraph.attributes.get("role"), Some("xyz"));
        assert_eq!(paragraph.text, "Body text.");
    }

    #[test]
    fn parses_quote_block_with_attribution() {
        let doc = parse_plain(
            "[quote, Abraham Lincoln, The Address]\n____\nFour score.\n____\n",
        );
        let quote = node(&doc.children[0]);
        assert_eq!(quote.kind, NodeKind::Quote);
        assert_eq!(quote.attributes.get("attribution"), Some("Abraham Lincoln"));
        assert_eq!(quote.attributes.get("citetitle"), Some("The Address"));
        assert_eq!(node(&quote.children[0]).text, "Four score.");
    }

    #[test]
    fn parses_air_quotes_as_quote_block() {
        let doc = parse_plain("[, Richard M. Nixon]\n\"\"\nI am not a crook.\n\"\"\n");
        let quote = node(&doc.children[0]);
        assert_eq!(quote.kind, NodeKind::Quote);
        assert_eq!(quote.attributes.get("attribution"), Some("Richard M. Nixon"));
    }

    #[test]
    fn parses_verse_verbatim() {
        let doc = parse_plain("[verse, Carl Sandburg, Fog]\n____\nThe fog comes\n\non little cat feet.\n____\n");
        let verse = node(&doc.children[0]);
        assert_eq!(verse.kind, NodeKind::Verse);
        assert_eq!(verse.text, "The fog comes\n\non little cat feet.");
    }

    #[test]
    fn parses_admonition_fence_and_line_forms() {
        let doc = parse_plain(
            "[IMPORTANT]\n====\nFenced body.\n====\n\nNOTE: Inline note text.\n",
        );
        let fenced = node(&doc.children[0]);
        assert_eq!(fenced.kind, NodeKind::Admonition);
        assert_eq!(fenced.style.as_deref(), Some("IMPORTANT"));
        let inline = node(&doc.children[1]);
        assert_eq!(inline.style.as_deref(), Some("NOTE"));
        assert_eq!(node(&inline.children[0]).text, "Inline note text.");
    }

    #[test]
    fn parses_source_listing_language() {
        let doc = parse_plain("[source,js]\n----\nconsole.log('hi');\n----\n");
        let listing = node(&doc.children[0]);
        assert_eq!(listing.kind, NodeKind::Listing);
        assert_eq!(listing.style.as_deref(), Some("source"));
        assert_eq!(listing.attributes.get("language"), Some("js"));
        assert_eq!(listing.text, "console.log('hi');");
    }

    #[test]
    fn parses_styled_paragraph_as_listing() {
        let doc = parse_plain("[listing]\nsudo make install\n");
        let listing = node(&doc.children[0]);
        assert_eq!(listing.kind, NodeKind::Listing);
        assert_eq!(listing.text, "sudo make install");
    }

    #[test]
    fn parses_block_image_macro() {
        let doc = parse_plain("image::sunset.jpg[Sunset,300,200,role=abc]\n");
        let image = node(&doc.children[0]);
        assert_eq!(image.kind, NodeKind::Image);
        assert_eq!(image.attributes.get("target"), Some("sunset.jpg"));
        assert_eq!(image.attributes.get("alt"), Some("Sunset"));
        assert_eq!(image.attributes.get("width"), Some("300"));
        assert_eq!(image.attributes.get("role"), Some("abc"));
    }

    #[test]
    fn image_attrlist_id_roles_and_options_are_kept() {
        let doc = parse_plain("image::a.png[Alt,id=fig1,role=\"left thumb\",opts=inline]\n");
        let image = node(&doc.children[0]);
        assert_eq!(image.id.as_deref(), Some("fig1"));
        assert_eq!(image.attributes.get("role"), Some("left thumb"));
        assert_eq!(image.attributes.get("options"), Some("inline"));
    }

    #[test]
    fn image_without_alt_falls_back_to_stem() {
        let doc = parse_plain("image::img/logo.svg[]\n");
        let image = node(&doc.children[0]);
        assert_eq!(image.attributes.get("alt"), Some("logo"));
    }

    #[test]
    fn skips_comments_and_page_breaks() {
        let doc = parse_plain("// comment\n////\nblock\ncomment\n////\n<<<\n\ntoc::[]\n");
        assert_eq!(node(&doc.children[0]).kind, NodeKind::PageBreak);
        assert_eq!(node(&doc.children[1]).kind, NodeKind::Toc);
    }

    #[test]
    fn float_style_heading_becomes_floating_title() {
        let doc = parse_plain("[float]\n== Unanchored\n\nBody.\n");
        let float = node(&doc.children[0]);
        assert_eq!(float.kind, NodeKind::FloatingTitle);
        assert_eq!(float.title.as_deref(), Some("Unanchored"));
        // No section nesting: the paragraph stays a sibling.
        assert_eq!(node(&doc.children[1]).kind, NodeKind::Paragraph);
    }

    #[test]
    fn float_style_setext_underline_becomes_floating_title() {
        let doc = parse_plain("[[my-id]]\n[float]\n{doctitle}\n----------\nAfter.\n");
        let float = node(&doc.children[0]);
        assert_eq!(float.kind, NodeKind::FloatingTitle);
        assert_eq!(float.title.as_deref(), Some("{doctitle}"));
        assert_eq!(float.id.as_deref(), Some("my-id"));
        assert_eq!(node(&doc.children[1]).text, "After.");
    }

    #[test]
    fn unterminated_fence_is_an_error() {
        let result = parse("----\nno closing fence\n", &ParseOptions::default());
        assert!(matches!(result, Err(GettextError::Parse(_))));
    }

    #[test]
    fn body_entries_attach_to_next_block() {
        let doc = parse_plain("First.\n\n:my_var: x\n:other: y\n\nSecond {my_var}.\n");
        let second = node(&doc.children[1]);
        assert_eq!(
            second.attribute_entries,
            vec![
                ("my_var".to_string(), "x".to_string()),
                ("other".to_string(), "y".to_string())
            ]
        );
        assert_eq!(doc.attributes.get("my_var"), Some("x"));
    }
}
