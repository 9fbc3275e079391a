//! Translation tooling for AsciiDoc documents
//!
//!     This crate reads AsciiDoc at the block level and supports two
//!     operations over the parsed tree: extracting translatable text in
//!     document order (for gettext catalogs), and rewriting the document
//!     with every translatable chunk passed through a transform (for
//!     producing translated copies).
//!
//!     TLDR for contributors:
//!         - The parser is block-level only. Inline markup (bold, links,
//!           cross references) is carried through untouched inside text.
//!         - Both operations share the parser; they differ only in the
//!           preprocessor and block hooks they install (see directives.rs).
//!         - Conditional and include directives are not evaluated. Extraction
//!           strips them (keeping ifdef/ifndef content), rewriting smuggles
//!           them through the tree as JSON records and restores them on
//!           output.
//!
//!     This is a pure lib, it powers the adoc-gettext CLI but is shell
//!     agnostic, no code here should suppose a shell environment, be it
//!     std print, env vars etc.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── ast.rs                  # Block tree, attributes, table data
//!     ├── attributes.rs           # Builtin attribute tables and filters
//!     ├── parser
//!     │   ├── mod.rs              # Header and block dispatch
//!     │   ├── attrlist.rs         # [style#id.role,key=value] lists
//!     │   ├── list.rs             # Marker matching and nesting fold
//!     │   └── table.rs            # PSV cells, spans, row grouping
//!     ├── directives.rs           # ifeval/ifdef/ifndef/endif/include codec
//!     ├── extract.rs              # Ordered extraction walker
//!     ├── rewrite.rs              # Serializing walker with transform
//!     ├── blacklist.rs            # Ignore-pattern filtering
//!     ├── collate.rs              # Order-preserving dedupe
//!     └── catalog.rs              # POT assembly and serialization
//!
//! Core algorithms
//!
//!     List nesting is the hairy part: AsciiDoc lists arrive as a flat run
//!     of marker lines and the tree has to be folded back from marker kind
//!     and depth alone (parser/list.rs). The reverse lives in rewrite.rs as
//!     a stack of open list frames that re-derives indentation and marker
//!     repetition on the way out.
//!
//!     Rewriting is not byte-preserving. It normalizes attribute lists,
//!     synthesizes `cols` and `options` on tables and re-indents lists. The
//!     contract is that re-parsing the output yields an equivalent tree,
//!     which is what the round-trip tests in tests/roundtrip check.

pub mod ast;
pub mod attributes;
pub mod blacklist;
pub mod catalog;
pub mod collate;
pub mod directives;
pub mod error;
pub mod extract;
pub mod parser;
pub mod rewrite;

pub use error::GettextError;
pub use extract::{extract, extract_document, ExtractOptions, Extraction};
pub use rewrite::{rewrite, RewriteOptions};
