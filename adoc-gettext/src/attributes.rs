//! Built-in document attribute tables and the filters derived from them.
//!
//! AsciiDoc processors seed every document with a set of built-in
//! attributes. Some of those are reader-facing labels ("Caution", "Table of
//! Contents") that a translated document should localize, others are pure
//! machinery (doctype, safe-mode-name) that must never reach a translator.
//! The tables below split the built-ins along that line.

/// Reader-facing built-in attributes and their English defaults, in the
/// order they are seeded into a new document.
pub const LOCALIZABLE_BUILTIN_ATTRIBUTES: &[(&str, &str)] = &[
    ("caution-caption", "Caution"),
    ("important-caption", "Important"),
    ("note-caption", "Note"),
    ("tip-caption", "Tip"),
    ("warning-caption", "Warning"),
    ("example-caption", "Example"),
    ("figure-caption", "Figure"),
    ("table-caption", "Table"),
    ("toc-title", "Table of Contents"),
    ("section-refsig", "Section"),
    ("part-refsig", "Part"),
    ("chapter-refsig", "Chapter"),
    ("appendix-caption", "Appendix"),
    ("appendix-refsig", "Appendix"),
    ("untitled-label", "Untitled"),
    ("version-label", "Version"),
    ("last-update-label", "Last updated"),
];

/// Built-in attribute keys whose values are processor machinery rather than
/// prose. These are excluded by every filter.
pub const NON_LOCALIZABLE_BUILTIN_ATTRIBUTE_KEYS: &[&str] = &[
    "attribute-missing",
    "attribute-undefined",
    "author",
    "authorcount",
    "authorinitials",
    "authors",
    "backend",
    "basebackend",
    "docdate",
    "docdatetime",
    "docdir",
    "docfile",
    "docfilesuffix",
    "docname",
    "doctime",
    "doctitle",
    "doctype",
    "docyear",
    "email",
    "embedded",
    "experimental",
    "filetype",
    "firstname",
    "hardbreaks",
    "hide-uri-scheme",
    "htmlsyntax",
    "icons",
    "iconsdir",
    "idprefix",
    "idseparator",
    "imagesdir",
    "lastname",
    "leveloffset",
    "localdate",
    "localdatetime",
    "localtime",
    "localyear",
    "max-attribute-value-size",
    "max-include-depth",
    "middlename",
    "nofooter",
    "noheader",
    "notitle",
    "outfilesuffix",
    "prewrap",
    "reproducible",
    "revdate",
    "revnumber",
    "revremark",
    "safe-mode-level",
    "safe-mode-name",
    "sectanchors",
    "sectids",
    "sectlinks",
    "sectnumlevels",
    "sectnums",
    "showtitle",
    "source-highlighter",
    "stem",
    "stylesdir",
    "tabsize",
    "toc",
    "toclevels",
    "user-home",
    "webfonts",
];

pub fn is_localizable_builtin(key: &str) -> bool {
    LOCALIZABLE_BUILTIN_ATTRIBUTES
        .iter()
        .any(|(name, _)| *name == key)
}

pub fn is_non_localizable_builtin(key: &str) -> bool {
    NON_LOCALIZABLE_BUILTIN_ATTRIBUTE_KEYS.contains(&key)
}

pub fn is_builtin(key: &str) -> bool {
    is_localizable_builtin(key) || is_non_localizable_builtin(key)
}

/// Decides whether a document attribute value is offered for translation.
pub type AttributeFilter = fn(&str) -> bool;

/// Default filter: extract everything except non-localizable built-ins.
/// Built-in labels pass, so an untranslated document still yields the
/// English captions as seed entries.
pub fn default_attribute_filter(key: &str) -> bool {
    !is_non_localizable_builtin(key)
}

/// Filter that additionally drops the built-in labels, leaving only
/// attributes the document itself defined.
pub fn all_builtins_attribute_filter(key: &str) -> bool {
    !is_builtin(key)
}
