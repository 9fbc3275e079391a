//! PSV table parsing: cell tokenization, span specifiers and row grouping.
//!
//! Cells are tokenized first (a `|` outside an escape starts a cell, the
//! token directly before it is the cell's span specifier), then grouped
//! into rows by walking a per-column rowspan carry against the effective
//! column count. The column count comes from the `cols` attribute when
//! present, otherwise from the summed colspans of the first content line.

use crate::ast::{Block, Cell, Row, TableData};
use crate::error::GettextError;
use regex::Regex;
use std::sync::LazyLock;

static SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(\d+)\.(\d+)\+|(\d+)\+|\.(\d+)\+|(\d+)\*)$").expect("static regex")
});
static COLS_REPEAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\*").expect("static regex"));

#[derive(Debug, Clone, Copy, Default)]
struct CellSpec {
    colspan: Option<u32>,
    rowspan: Option<u32>,
    duplicate: Option<u32>,
}

#[derive(Debug)]
struct RawCell {
    spec: CellSpec,
    fragments: Vec<String>,
    on_first_line: bool,
}

impl RawCell {
    fn into_text(self) -> String {
        self.fragments
            .iter()
            .map(|fragment| fragment.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub(super) fn parse_table(inner: &[String], block: &Block) -> Result<TableData, GettextError> {
    let (cells, blank_after_first_line) = tokenize(inner);

    let first_line_span: usize = cells
        .iter()
        .filter(|cell| cell.on_first_line)
        .map(|cell| effective_colspan(&cell.spec))
        .sum();
    let first_line_cells: usize = cells
        .iter()
        .filter(|cell| cell.on_first_line)
        .map(|cell| cell.spec.duplicate.unwrap_or(1).max(1) as usize)
        .sum();
    let cols = match block.attributes.get("cols") {
        Some(value) => count_cols(value),
        None => first_line_span,
    };
    if cols == 0 {
        if cells.is_empty() {
            return Ok(TableData::default());
        }
        return Err(GettextError::Parse(
            "table has cells but no resolvable column count".to_string(),
        ));
    }

    let expanded = expand_duplicates(cells);
    let mut rows = group_rows(expanded, cols);

    let options: Vec<String> = block
        .attributes
        .get("options")
        .map(|value| value.split(',').map(|o| o.trim().to_string()).collect())
        .unwrap_or_default();
    // An implicit header needs at least two cells filling the whole first
    // line, followed by a blank line. The two-cell floor keeps a
    // one-cell-per-line layout (and a lone spanning cell) from being
    // mistaken for a header.
    let implicit_header = blank_after_first_line
        && block.attributes.get("options").is_none()
        && first_line_cells > 1
        && first_line_span == cols;

    let mut data = TableData {
        cols,
        head: Vec::new(),
        body: Vec::new(),
        foot: Vec::new(),
    };
    if (options.iter().any(|o| o == "header") || implicit_header) && !rows.is_empty() {
        data.head.push(rows.remove(0));
    }
    if options.iter().any(|o| o == "footer") {
        if let Some(row) = rows.pop() {
            data.foot.push(row);
        }
    }
    data.body = rows;
    Ok(data)
}

fn tokenize(inner: &[String]) -> (Vec<RawCell>, bool) {
    let mut cells: Vec<RawCell> = Vec::new();
    let mut current: Option<RawCell> = None;
    let mut content_lines = 0usize;
    let mut blank_after_first_line = false;

    for line in inner {
        if line.trim().is_empty() {
            if content_lines == 1 {
                blank_after_first_line = true;
            }
            continue;
        }
        content_lines += 1;
        let on_first_line = content_lines == 1;

        let mut buf = String::new();
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' && chars.peek() == Some(&'|') {
                buf.push('|');
                chars.next();
                continue;
            }
            if c == '|' {
                let (text, spec) = split_spec_suffix(&buf);
                if !text.trim().is_empty() {
                    if let Some(cell) = current.as_mut() {
                        cell.fragments.push(text.to_string());
                    }
                }
                if let Some(cell) = current.take() {
                    cells.push(cell);
                }
                current = Some(RawCell {
                    spec,
                    fragments: Vec::new(),
                    on_first_line,
                });
                buf.clear();
                continue;
            }
            buf.push(c);
        }
        if !buf.trim().is_empty() {
            if let Some(cell) = current.as_mut() {
                cell.fragments.push(buf);
            }
        }
    }
    if let Some(cell) = current.take() {
        cells.push(cell);
    }
    (cells, blank_after_first_line)
}

/// Split a trailing span specifier (`2+`, `.3+`, `2.3+`, `2*`) off a cell
/// fragment. The specifier must stand alone at the end of the fragment.
fn split_spec_suffix(fragment: &str) -> (&str, CellSpec) {
    let Some(found) = SPEC_RE.find(fragment) else {
        return (fragment, CellSpec::default());
    };
    let before = &fragment[..found.start()];
    if !before.is_empty() && !before.ends_with(char::is_whitespace) {
        return (fragment, CellSpec::default());
    }
    let Some(caps) = SPEC_RE.captures(fragment) else {
        return (fragment, CellSpec::default());
    };
    let parse = |index: usize| caps.get(index).and_then(|m| m.as_str().parse::<u32>().ok());
    let spec = if caps.get(1).is_some() {
        CellSpec {
            colspan: parse(1),
            rowspan: parse(2),
            duplicate: None,
        }
    } else if caps.get(3).is_some() {
        CellSpec {
            colspan: parse(3),
            rowspan: None,
            duplicate: None,
        }
    } else if caps.get(4).is_some() {
        CellSpec {
            colspan: None,
            rowspan: parse(4),
            duplicate: None,
        }
    } else {
        CellSpec {
            colspan: None,
            rowspan: None,
            duplicate: parse(5),
        }
    };
    (before, spec)
}

fn effective_colspan(spec: &CellSpec) -> usize {
    let duplicate = spec.duplicate.unwrap_or(1).max(1) as usize;
    let colspan = spec.colspan.unwrap_or(1).max(1) as usize;
    duplicate * colspan
}

fn expand_duplicates(cells: Vec<RawCell>) -> Vec<(CellSpec, String)> {
    let mut expanded = Vec::with_capacity(cells.len());
    for cell in cells {
        let spec = cell.spec;
        let text = cell.into_text();
        let count = spec.duplicate.unwrap_or(1).max(1);
        for _ in 0..count {
            let spec = CellSpec {
                duplicate: None,
                ..spec
            };
            expanded.push((spec, text.clone()));
        }
    }
    expanded
}

fn group_rows(cells: Vec<(CellSpec, String)>, cols: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut carry = vec![0u32; cols];
    let mut pending = cells.into_iter().peekable();

    while pending.peek().is_some() {
        let mut row: Row = Vec::new();
        let mut col = 0usize;
        while col < cols {
            if carry[col] > 0 {
                carry[col] -= 1;
                col += 1;
                continue;
            }
            let Some((spec, text)) = pending.next() else {
                break;
            };
            let colspan = spec.colspan.unwrap_or(1).max(1) as usize;
            let rowspan = spec.rowspan.unwrap_or(1).max(1);
            for offset in 0..colspan.min(cols - col) {
                carry[col + offset] = rowspan - 1;
            }
            row.push(Cell {
                text,
                colspan: spec.colspan,
                rowspan: spec.rowspan,
            });
            col += colspan;
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    rows
}

/// Column count from a `cols` attribute value. A lone integer is a column
/// count; otherwise each comma token counts once, with `n*` repeats.
fn count_cols(value: &str) -> usize {
    let value = value.trim();
    if let Ok(count) = value.parse::<usize>() {
        return count;
    }
    value
        .split(',')
        .map(|token| {
            let token = token.trim();
            COLS_REPEAT_RE
                .captures(token)
                .and_then(|caps| caps[1].parse::<usize>().ok())
                .unwrap_or(1)
        })
        .sum()
}
