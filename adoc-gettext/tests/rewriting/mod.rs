//! Serialized output of the rewrite walker.

use adoc_gettext::{rewrite, GettextError, RewriteOptions};

fn identity(text: &str) -> String {
    text.to_string()
}

fn upper(text: &str) -> String {
    text.to_uppercase()
}

fn rewritten<F: Fn(&str) -> String>(source: &str, transform: F) -> String {
    rewrite(source, transform, &RewriteOptions::default()).expect("document to rewrite")
}

#[test]
fn conditional_content_passes_through_the_transform() {
    let output = rewritten("ifdef::flag[Some text]\n", upper);
    assert_eq!(output.trim(), "ifdef::flag[SOME TEXT]");
}

#[test]
fn non_conditional_directives_are_restored_verbatim() {
    assert_eq!(rewritten("ifeval::[1 <= 0]\n", upper).trim(), "ifeval::[1 <= 0]");
    assert_eq!(rewritten("endif::[]\n", upper).trim(), "endif::[]");
    assert_eq!(
        rewritten("include::chapter-two.adoc[]\n", upper).trim(),
        "include::chapter-two.adoc[]"
    );
    assert_eq!(
        rewritten("ifndef::env-github[]\n", upper).trim(),
        "ifndef::env-github[]"
    );
}

#[test]
fn directives_keep_their_position_between_blocks() {
    let source = "Before.\n\nifdef::flag[Inside.]\n\nAfter.\n";
    let output = rewritten(source, identity);
    let before = output.find("Before.").expect("before");
    let directive = output.find("ifdef::flag[Inside.]").expect("directive");
    let after = output.find("After.").expect("after");
    assert!(before < directive && directive < after);
}

#[test]
fn section_titles_and_custom_entries_are_transformed() {
    let source = "= Book\n:toc: left\n:my_var: hello\n\n== Chapter\n\nBody.\n";
    let output = rewritten(source, upper);
    assert!(output.starts_with("= BOOK\n"));
    // Non-localizable builtin entries stay untouched.
    assert!(output.contains(":toc: left\n"));
    assert!(output.contains(":my_var: HELLO\n"));
    assert!(output.contains("== CHAPTER\n"));
    assert!(output.contains("BODY.\n"));
}

#[test]
fn sibling_lists_stay_separated() {
    let source = "* one\n* two\n\n//-\n\n* three\n";
    let output = rewritten(source, identity);
    let first = output.find("* two").expect("first list");
    let separator = output[first..].find("//-").expect("separator") + first;
    let second = output.find("* three").expect("second list");
    assert!(separator < second);
}

#[test]
fn nested_lists_are_reindented_by_depth() {
    let output = rewritten("* top\n** deep\n* next\n", identity);
    assert!(output.contains("  * top\n"));
    assert!(output.contains("    ** deep\n"));
    assert!(output.contains("  * next\n"));
}

#[test]
fn description_lists_split_terms_and_descriptions() {
    let output = rewritten("CPU:: The brain of the computer.\n", upper);
    assert!(output.contains("  CPU::\n"));
    assert!(output.contains("  THE BRAIN OF THE COMPUTER.\n"));
}

#[test]
fn ordered_markers_repeat_with_depth() {
    let output = rewritten(". first\n.. nested\n", identity);
    assert!(output.contains("  . first\n"));
    assert!(output.contains("    .. nested\n"));
}

#[test]
fn tables_get_explicit_cols_and_options() {
    let source = "|===\n|A |B\n\n|1 |2\n|===\n";
    let output = rewritten(source, identity);
    assert!(output.contains("[cols=2,options=header]\n|===\n"));
    assert!(output.contains("1.1+|A\n"));
    assert!(output.contains("1.1+|2\n"));
}

#[test]
fn table_cells_escape_pipes_and_keep_spans() {
    let source = "[cols=\"2\"]\n|===\n2+|Wide cell\n|a\\|b |c\n|===\n";
    let output = rewritten(source, identity);
    assert!(output.contains("2.1+|Wide cell\n"));
    assert!(output.contains("1.1+|a\\|b\n"));
}

#[test]
fn attribute_values_are_quoted_when_needed() {
    let source = "image::shore.jpg[Shore scene,200]\n";
    let output = rewritten(source, identity);
    assert!(output.contains("image::shore.jpg[alt=\"Shore scene\",width=200]"));
}

#[test]
fn image_alt_passes_through_the_transform() {
    let output = rewritten("image::shore.jpg[Shore scene]\n", upper);
    assert!(output.contains("image::SHORE.JPG[alt=\"SHORE SCENE\"]"));
}

#[test]
fn directives_inside_table_cells_are_restored() {
    let source = "[cols=\"1\"]\n|===\n|before\nifdef::flag[Cell text]\nafter\n|===\n";
    let output = rewritten(source, upper);
    assert!(output.contains("|BEFORE\nifdef::flag[CELL TEXT]\nAFTER\n"));
}

#[test]
fn pass_blocks_are_not_transformed() {
    let output = rewritten("++++\n<div>raw</div>\n++++\n", upper);
    assert!(output.contains("++++\n<div>raw</div>\n++++\n"));
}

#[test]
fn quote_attribution_is_reattached_as_named_attributes() {
    let source = "[quote, Abraham Lincoln, The Address]\n____\nFour score.\n____\n";
    let output = rewritten(source, identity);
    assert!(output.contains("[quote, attribution=\"Abraham Lincoln\",citetitle=\"The Address\"]\n"));
    assert!(output.contains("____\nFour score.\n\n____\n"));
}

#[test]
fn admonitions_always_serialize_as_fenced_blocks() {
    let output = rewritten("NOTE: Remember this.\n", identity);
    assert!(output.contains("[NOTE]\n====\nRemember this.\n\n====\n"));
}

#[test]
fn attribute_reference_lines_stay_literal() {
    let output = rewritten(":my_var: something\n\nUses {my_var} here.\n", identity);
    assert!(output.contains("Uses {my_var} here.\n"));
}

#[test]
fn malformed_smuggled_record_is_reported() {
    // A handcrafted marker block whose body is not a directive record.
    let source = "[adoc-gettext-directive]\nnot json\n";
    let result = rewrite(source, identity, &RewriteOptions::default());
    assert!(matches!(result, Err(GettextError::MalformedDirective(_))));
}
