//! Rewriting with the identity transform must preserve document structure.
//!
//! Output is not byte-identical to the input (attribute lists are
//! normalized, lists re-indented, tables given explicit `cols`), so the
//! oracle compares extract-mode parses of input and output: the extraction
//! sequence and a structural fingerprint.

use crate::common::{extracted, fingerprint};
use adoc_gettext::{rewrite, RewriteOptions};

fn identity(text: &str) -> String {
    text.to_string()
}

fn assert_round_trips(source: &str) {
    let output = rewrite(source, identity, &RewriteOptions::default()).expect("rewrite");
    assert_eq!(
        extracted(source),
        extracted(&output),
        "extraction changed\n--- input ---\n{source}\n--- output ---\n{output}"
    );
    assert_eq!(
        fingerprint(source),
        fingerprint(&output),
        "structure changed\n--- input ---\n{source}\n--- output ---\n{output}"
    );
}

#[test]
fn header_and_sections_round_trip() {
    assert_round_trips(
        "= The Book\nThe Author\n:my_var: value\n\nPreamble text.\n\n== One\n\nBody one.\n\n=== Deeper\n\nBody deeper.\n\n== Two\n\nBody two.\n",
    );
}

#[test]
fn lists_round_trip() {
    assert_round_trips(".Groceries\n* Milk\n** Oat milk\n* Eggs\n");
    assert_round_trips(". first\n.. nested one\n.. nested two\n. second\n");
    assert_round_trips("CPU:: The brain.\nRAM:: Scratch space.\n");
    assert_round_trips(
        "Operating Systems::\n  Linux:::\n  . Fedora\n  * Desktop\n  . Ubuntu\n  BSD:::\n  . FreeBSD\nCloud Providers::\n  . AWS\n",
    );
}

#[test]
fn tables_round_trip() {
    assert_round_trips(
        "[cols=\"2*\", options=\"header,footer\"]\n|===\n|Column A |Column B\n|Yes |No\n|Footer A |Footer B\n|===\n",
    );
    // Implicit header, colspans and rowspans.
    assert_round_trips("|===\n|A |B\n\n|1 |2\n|===\n");
    assert_round_trips("[cols=\"2\"]\n|===\n2+|Wide\n.2+|Tall |r1\n|r2\n|===\n");
    // Escaped separators.
    assert_round_trips("[cols=\"2\"]\n|===\n|a\\|b |c\n|===\n");
    // Conditional line inside a cell.
    assert_round_trips("[cols=\"1\"]\n|===\n|before\nifdef::flag[Cell text]\n|===\n");
}

#[test]
fn quotes_verses_and_admonitions_round_trip() {
    assert_round_trips("[quote, Abraham Lincoln, The Address]\n____\nFour score.\n____\n");
    assert_round_trips("[verse, Carl Sandburg, Fog]\n____\nThe fog comes\non little cat feet.\n____\n");
    assert_round_trips("NOTE: Inline note.\n");
    assert_round_trips("[WARNING]\n====\nFenced warning.\n====\n");
    assert_round_trips(".Aside\n****\nSidebar paragraph.\n****\n");
}

#[test]
fn verbatim_blocks_round_trip() {
    assert_round_trips("[source,js]\n----\nconsole.log('hi');\n----\n");
    assert_round_trips("----\nplain listing\n----\n");
    assert_round_trips("....\nliteral art\n....\n");
    assert_round_trips("++++\n<raw/>\n++++\n");
    assert_round_trips("[listing]\nsudo make install\n");
}

#[test]
fn directives_round_trip() {
    assert_round_trips(
        "Before.\n\nifdef::flag[Conditional text.]\n\nifeval::[1 <= 0]\n\ninclude::two.adoc[]\n\nendif::flag[]\n\nAfter.\n",
    );
}

#[test]
fn macros_breaks_and_metadata_round_trip() {
    assert_round_trips("image::shore.jpg[Shore scene,200,100]\n\nimage::img/logo.svg[]\n");
    assert_round_trips("toc::[]\n\n<<<\n\n'''\n\nDone.\n");
    assert_round_trips("[[the-id]]\n.The Title\nBody text.\n");
    assert_round_trips("[float]\n== Unanchored\n\nBody.\n");
}

#[test]
fn kitchen_sink_round_trips() {
    assert_round_trips(
        "\
= Field Guide
A. Naturalist
:my_var: meadow
:toc: left

An introduction to the {my_var}.

== Habitats

.Common sightings
* Hawks
** Red-tailed
* Owls

ifdef::extended[Extended edition content.]

[cols=\"2*\", options=\"header\"]
|===
|Species |Count
|Hawk |3
|Owl |1
|===

[quote, A Ranger]
____
Leave only footprints.
____

NOTE: Binoculars recommended.

image::maps/trail.png[Trail map]

== Appendix

[source,sh]
----
make field-notes
----
",
    );
}
