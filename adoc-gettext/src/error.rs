//! Error types for extraction and rewrite operations

use std::fmt;

/// Errors that can occur while extracting from or rewriting a document
#[derive(Debug, Clone, PartialEq)]
pub enum GettextError {
    /// Error during document parsing
    Parse(String),
    /// A smuggled directive record could not be decoded
    MalformedDirective(String),
    /// List nesting bookkeeping underflowed during serialization
    ListNesting(String),
}

impl fmt::Display for GettextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GettextError::Parse(msg) => write!(f, "Parse error: {msg}"),
            GettextError::MalformedDirective(msg) => {
                write!(f, "Malformed directive record: {msg}")
            }
            GettextError::ListNesting(msg) => write!(f, "List nesting error: {msg}"),
        }
    }
}

impl std::error::Error for GettextError {}
