//! Block-level document tree shared by the extraction and rewrite walkers.
//!
//! The tree intentionally stops at the block level: inline markup (bold,
//! links, inline macros) stays verbatim inside the `text` of its block so
//! that translators see the markup they have to preserve.

/// Block kinds produced by the parser.
///
/// The set is closed: every block the parser emits carries one of these
/// kinds, and both walkers dispatch exhaustively over them. `Example` and
/// `Open` are parsed but have no serialization, which both walkers report
/// through `tracing` while still visiting their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Preamble,
    Section,
    Paragraph,
    Admonition,
    Example,
    Open,
    Sidebar,
    Quote,
    Verse,
    Listing,
    Literal,
    Pass,
    Image,
    Table,
    DescriptionList,
    OrderedList,
    UnorderedList,
    ListItem,
    FloatingTitle,
    ThematicBreak,
    PageBreak,
    Toc,
}

impl NodeKind {
    /// Stable name used in log messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Preamble => "preamble",
            NodeKind::Section => "section",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Admonition => "admonition",
            NodeKind::Example => "example",
            NodeKind::Open => "open",
            NodeKind::Sidebar => "sidebar",
            NodeKind::Quote => "quote",
            NodeKind::Verse => "verse",
            NodeKind::Listing => "listing",
            NodeKind::Literal => "literal",
            NodeKind::Pass => "pass",
            NodeKind::Image => "image",
            NodeKind::Table => "table",
            NodeKind::DescriptionList => "dlist",
            NodeKind::OrderedList => "olist",
            NodeKind::UnorderedList => "ulist",
            NodeKind::ListItem => "list_item",
            NodeKind::FloatingTitle => "floating_title",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::PageBreak => "page_break",
            NodeKind::Toc => "toc",
        }
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            NodeKind::DescriptionList => Some(ListKind::Description),
            NodeKind::OrderedList => Some(ListKind::Ordered),
            NodeKind::UnorderedList => Some(ListKind::Unordered),
            _ => None,
        }
    }
}

/// The three list families tracked by the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Description,
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn node_kind(&self) -> NodeKind {
        match self {
            ListKind::Description => NodeKind::DescriptionList,
            ListKind::Ordered => NodeKind::OrderedList,
            ListKind::Unordered => NodeKind::UnorderedList,
        }
    }
}

/// Ordered attribute map.
///
/// AsciiDoc attribute order is observable both in extraction output and in
/// rewritten markup, so this is a positional list rather than a hash map.
/// `set` replaces in place to keep first-assignment order stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.set(key, value);
        }
        attributes
    }
}

/// A child position in the tree.
///
/// `Group` only appears under description lists: one term-group is the run
/// of sibling terms followed by their (optional) description item. Keeping
/// the grouping explicit lets the serializer emit the terms of a group
/// adjacently without re-deriving them from flat children.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(Block),
    Group(Vec<Block>),
}

/// A single table cell. Span values are `None` when the source cell had no
/// span specifier; serialization treats absent spans as 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub colspan: Option<u32>,
    pub rowspan: Option<u32>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            colspan: None,
            rowspan: None,
        }
    }
}

pub type Row = Vec<Cell>;

/// Row groups of a parsed table plus the effective column count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub cols: usize,
    pub head: Vec<Row>,
    pub body: Vec<Row>,
    pub foot: Vec<Row>,
}

impl TableData {
    /// Head, body and foot rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.head.iter().chain(self.body.iter()).chain(self.foot.iter())
    }
}

/// A block-level node.
///
/// `attribute_entries` records `:name: value` lines in assignment order at
/// the position they appeared (document header entries live on the document
/// node, body entries on the block that follows them). `attributes` is the
/// resolved attribute map of the block itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: NodeKind,
    pub id: Option<String>,
    pub title: Option<String>,
    pub style: Option<String>,
    pub attributes: Attributes,
    pub attribute_entries: Vec<(String, String)>,
    pub text: String,
    pub level: usize,
    pub children: Vec<Child>,
    pub table: Option<TableData>,
}

impl Block {
    pub fn new(kind: NodeKind) -> Self {
        Block {
            kind,
            id: None,
            title: None,
            style: None,
            attributes: Attributes::new(),
            attribute_entries: Vec::new(),
            text: String::new(),
            level: 0,
            children: Vec::new(),
            table: None,
        }
    }

    pub fn push(&mut self, child: Block) {
        self.children.push(Child::Node(child));
    }
}
