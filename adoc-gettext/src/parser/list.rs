//! List parsing for the three AsciiDoc list families.
//!
//! Lists are gathered as a flat run of marker lines first, then folded into
//! nested list blocks. Nesting is decided by marker kind and marker depth:
//! a marker that matches an open ancestor frame closes back to that frame,
//! anything else opens a deeper list. Description lists group their items:
//! one or more sibling terms followed by an optional description item, with
//! nested lists hanging off the description.

use super::Cursor;
use crate::ast::{Block, Child, ListKind, NodeKind};
use regex::Regex;
use std::sync::LazyLock;

static ULIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*+) +(\S.*?)\s*$").expect("static regex"));
static ULIST_HYPHEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- +(\S.*?)\s*$").expect("static regex"));
static OLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\.+) +(\S.*?)\s*$").expect("static regex"));
static DLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S.*?)(:{2,})(?: +(\S.*?))? *$").expect("static regex"));

#[derive(Debug)]
pub(super) enum Marker {
    Item {
        kind: ListKind,
        depth: usize,
        text: String,
    },
    Term {
        depth: usize,
        term: String,
        description: Option<String>,
    },
}

pub(super) fn match_marker(line: &str) -> Option<Marker> {
    let trimmed = line.trim();
    if let Some(caps) = ULIST_RE.captures(trimmed) {
        return Some(Marker::Item {
            kind: ListKind::Unordered,
            depth: caps[1].len(),
            text: caps[2].to_string(),
        });
    }
    if let Some(caps) = ULIST_HYPHEN_RE.captures(trimmed) {
        return Some(Marker::Item {
            kind: ListKind::Unordered,
            depth: 1,
            text: caps[1].to_string(),
        });
    }
    if let Some(caps) = OLIST_RE.captures(trimmed) {
        return Some(Marker::Item {
            kind: ListKind::Ordered,
            depth: caps[1].len(),
            text: caps[2].to_string(),
        });
    }
    if let Some(caps) = DLIST_RE.captures(trimmed) {
        return Some(Marker::Term {
            depth: caps[2].len() - 1,
            term: caps[1].to_string(),
            description: caps.get(3).map(|m| m.as_str().to_string()),
        });
    }
    None
}

#[derive(Debug)]
struct RawItem {
    kind: ListKind,
    depth: usize,
    text: String,
    is_term: bool,
}

/// Parse one run of list lines into top-level list blocks. Usually a run
/// folds into a single list; a shallower same-kind marker after a deeper
/// start yields siblings.
pub(super) fn parse_lists(cursor: &mut Cursor) -> Vec<Block> {
    let items = gather_items(cursor);
    let mut blocks = Vec::new();
    let mut index = 0;
    let mut stack: Vec<(ListKind, usize)> = Vec::new();
    while index < items.len() {
        blocks.push(build_list(&items, &mut index, &mut stack));
    }
    blocks
}

fn gather_items(cursor: &mut Cursor) -> Vec<RawItem> {
    let mut items: Vec<RawItem> = Vec::new();
    loop {
        let Some(line) = cursor.peek().map(str::to_string) else {
            break;
        };
        let trimmed = line.trim();

        if trimmed.is_empty() {
            // Blank lines end the list unless another marker follows.
            let mut lookahead = cursor.pos + 1;
            while cursor
                .lines
                .get(lookahead)
                .is_some_and(|l| l.trim().is_empty())
            {
                lookahead += 1;
            }
            match cursor.lines.get(lookahead) {
                Some(next) if match_marker(next).is_some() => {
                    cursor.pos = lookahead;
                    continue;
                }
                _ => break,
            }
        }
        if trimmed.starts_with("//") {
            break;
        }
        if let Some(marker) = match_marker(&line) {
            match marker {
                Marker::Item { kind, depth, text } => items.push(RawItem {
                    kind,
                    depth,
                    text,
                    is_term: false,
                }),
                Marker::Term {
                    depth,
                    term,
                    description,
                } => {
                    items.push(RawItem {
                        kind: ListKind::Description,
                        depth,
                        text: term,
                        is_term: true,
                    });
                    if let Some(description) = description {
                        items.push(RawItem {
                            kind: ListKind::Description,
                            depth,
                            text: description,
                            is_term: false,
                        });
                    }
                }
            }
            cursor.advance();
            continue;
        }
        if super::interrupts_paragraph(&line) {
            break;
        }
        // Plain line: a description for a bare term, otherwise a wrapped
        // continuation of the previous item.
        match items.last_mut() {
            Some(last) if last.is_term => {
                let depth = last.depth;
                items.push(RawItem {
                    kind: ListKind::Description,
                    depth,
                    text: trimmed.to_string(),
                    is_term: false,
                });
            }
            Some(last) => {
                last.text.push('\n');
                last.text.push_str(trimmed);
            }
            None => break,
        }
        cursor.advance();
    }
    items
}

/// A marker that matches any open ancestor frame closes back to it; a
/// different kind, or the same kind at greater depth, opens a nested list.
fn is_nested(item: &RawItem, stack: &[(ListKind, usize)]) -> bool {
    let Some(&(top_kind, top_depth)) = stack.last() else {
        return false;
    };
    if stack
        .iter()
        .any(|&(kind, depth)| kind == item.kind && depth == item.depth)
    {
        return false;
    }
    if item.kind == top_kind {
        item.depth > top_depth
    } else {
        true
    }
}

fn build_list(
    items: &[RawItem],
    index: &mut usize,
    stack: &mut Vec<(ListKind, usize)>,
) -> Block {
    let kind = items[*index].kind;
    let depth = items[*index].depth;
    stack.push((kind, depth));
    let mut list = Block::new(kind.node_kind());
    list.level = depth;

    while *index < items.len() {
        let item = &items[*index];
        if item.kind != kind || item.depth != depth {
            break;
        }
        match kind {
            ListKind::Description => {
                let group = build_term_group(items, index, stack, depth);
                list.children.push(Child::Group(group));
            }
            ListKind::Ordered | ListKind::Unordered => {
                let mut entry = new_item(depth, &item.text, false);
                *index += 1;
                while *index < items.len() && is_nested(&items[*index], stack) {
                    let nested = build_list(items, index, stack);
                    entry.push(nested);
                }
                list.children.push(Child::Node(entry));
            }
        }
    }

    stack.pop();
    list
}

fn build_term_group(
    items: &[RawItem],
    index: &mut usize,
    stack: &mut Vec<(ListKind, usize)>,
    depth: usize,
) -> Vec<Block> {
    let mut group: Vec<Block> = Vec::new();
    while *index < items.len() {
        let item = &items[*index];
        if item.kind != ListKind::Description || item.depth != depth || !item.is_term {
            break;
        }
        group.push(new_item(depth, &item.text, false));
        *index += 1;
    }

    let mut description: Option<Block> = None;
    if let Some(item) = items.get(*index) {
        if item.kind == ListKind::Description && item.depth == depth && !item.is_term {
            description = Some(new_item(depth, &item.text, true));
            *index += 1;
        }
    }
    while *index < items.len() && is_nested(&items[*index], stack) {
        let nested = build_list(items, index, stack);
        description
            .get_or_insert_with(|| new_item(depth, "", true))
            .push(nested);
    }
    if let Some(description) = description {
        group.push(description);
    }
    group
}

fn new_item(depth: usize, text: &str, is_description: bool) -> Block {
    let mut item = Block::new(NodeKind::ListItem);
    item.level = depth;
    item.text = text.to_string();
    if is_description {
        item.style = Some("description".to_string());
    }
    item
}
