//! Extraction order and coverage over the block kinds.

use crate::common::{extracted, extracted_default};

#[test]
fn extracts_header_and_sections_in_document_order() {
    let source = "\
= The Book
:my_var: Custom value

Intro paragraph.

== First Chapter

Chapter text.
";
    assert_eq!(
        extracted(source),
        vec![
            "The Book",
            "Custom value",
            "Intro paragraph.",
            "First Chapter",
            "Chapter text."
        ]
    );
}

#[test]
fn extracts_table_title_then_head_body_foot() {
    let source = "\
.Table Title
[cols=\"2*\", options=\"header,footer\"]
|===
|Column A |Column B
|Body 1 |Body 2
|Footer A |Footer B
|===
";
    assert_eq!(
        extracted(source),
        vec![
            "Table Title",
            "Column A",
            "Column B",
            "Body 1",
            "Body 2",
            "Footer A",
            "Footer B"
        ]
    );
}

#[test]
fn extracts_list_title_and_items_depth_first() {
    let source = "\
.Groceries
* Milk
** Oat milk
* Eggs
";
    assert_eq!(
        extracted(source),
        vec!["Groceries", "Milk", "Oat milk", "Eggs"]
    );
}

#[test]
fn extracts_description_list_terms_and_descriptions() {
    let source = "CPU:: The brain of the computer.\nRAM:: Fast scratch space.\n";
    assert_eq!(
        extracted(source),
        vec![
            "CPU",
            "The brain of the computer.",
            "RAM",
            "Fast scratch space."
        ]
    );
}

#[test]
fn extracts_quote_verse_sidebar_and_admonitions() {
    let source = "\
[quote, Someone]
____
Quoted paragraph.
____

[verse, Someone Else]
____
Verse line one
Verse line two
____

.Aside
****
Sidebar paragraph.
****

NOTE: Inline note.

[WARNING]
====
Fenced warning.
====
";
    assert_eq!(
        extracted(source),
        vec![
            "Quoted paragraph.",
            "Verse line one\nVerse line two",
            "Aside",
            "Sidebar paragraph.",
            "Inline note.",
            "Fenced warning."
        ]
    );
}

#[test]
fn verbatim_blocks_extract_their_text_but_pass_does_not() {
    let source = "\
[source,sh]
----
make install
----

....
literal art
....

++++
<raw/>
++++
";
    assert_eq!(extracted(source), vec!["make install", "literal art"]);
}

#[test]
fn conditional_content_is_kept_and_directives_dropped() {
    let source = "\
ifdef::flag[Conditional text.]

ifeval::[1 > 0]

include::chapter-two.adoc[]

endif::flag[]

After the conditionals.
";
    assert_eq!(
        extracted(source),
        vec!["Conditional text.", "After the conditionals."]
    );
}

#[test]
fn ignores_comments_breaks_and_toc() {
    let source = "\
// a line comment
////
a block comment
////
<<<

'''

toc::[]
";
    assert!(extracted(source).is_empty());
}

#[test]
fn attribute_references_stay_literal() {
    let source = ":my_var: something\n\nUses {my_var} here.\n";
    assert_eq!(extracted(source), vec!["something", "Uses {my_var} here."]);
}

#[test]
fn footer_cells_keep_attribute_references_literal() {
    let source = "\
:my_var: substituted

[cols=\"2*\", options=\"footer\"]
|===
|a |b
|{my_var} |end
|===
";
    assert_eq!(
        extracted(source),
        vec!["substituted", "a", "b", "{my_var}", "end"]
    );
}

#[test]
fn image_target_and_distinct_alt_are_extracted() {
    let source = "image::shore.jpg[Shore scene]\n\nimage::img/logo.svg[]\n";
    assert_eq!(
        extracted(source),
        vec!["shore.jpg", "Shore scene", "img/logo.svg"]
    );
}

#[test]
fn overridden_builtin_label_is_extracted_instead_of_default() {
    let source = "= Title\n:note-caption: Nota\n";
    let texts = extracted_default(source);
    assert!(texts.contains(&"Nota".to_string()));
    assert!(!texts.contains(&"Note".to_string()));
    // The other labels keep their defaults.
    assert!(texts.contains(&"Caution".to_string()));
}

#[test]
fn floating_titles_are_extracted() {
    let source = "[float]\n== Unanchored Title\n\nBody.\n";
    assert_eq!(extracted(source), vec!["Unanchored Title", "Body."]);
}
