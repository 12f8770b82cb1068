// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end computed style through a document.

use trellis_dom::css::{parse_declarations, parse_stylesheet};
use trellis_dom::document::Document;
use trellis_dom::error::DomError;
use trellis_style::declaration::StyleDeclaration;
use trellis_style::error::StyleError;
use trellis_style::media::{MediaList, ViewingContext};
use trellis_style::resolver::StyleResolver;
use trellis_style::sheet::{ForeignStyleSheet, StyleDocument, StyleSheetList};
use trellis_tree::NodeId;

/// `html > body > div#main.card > p.note`
fn page(css: &str) -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();
    let html = doc.create_element(doc.root(), "html").unwrap();
    let body = doc.create_element(html, "body").unwrap();
    let main = doc.create_element(body, "div").unwrap();
    doc.set_attribute(main, "id", "main").unwrap();
    doc.set_attribute(main, "class", "card").unwrap();
    let note = doc.create_element(main, "p").unwrap();
    doc.set_attribute(note, "class", "note").unwrap();
    doc.add_style_sheet(parse_stylesheet(css));
    (doc, main, note)
}

fn value(doc: &Document, id: NodeId, property: &str) -> String {
    doc.computed_style(&StyleResolver::default(), id, None)
        .unwrap()
        .get_property_value(property)
        .to_owned()
}

#[test]
fn later_rule_wins_at_equal_specificity() {
    let (doc, _, note) = page("p { color: red } p { color: blue }");
    assert_eq!(value(&doc, note, "color"), "blue");
}

#[test]
fn later_sheet_wins_at_equal_specificity() {
    let (mut doc, _, note) = page("p { color: red }");
    doc.add_style_sheet(parse_stylesheet("p { color: green }"));
    assert_eq!(value(&doc, note, "color"), "green");
}

#[test]
fn more_specific_rule_wins_regardless_of_order() {
    let (doc, _, note) = page("#main .note { color: red } div p { color: blue } p { color: gray }");
    assert_eq!(value(&doc, note, "color"), "red");
}

#[test]
fn inline_style_beats_every_rule() {
    let (mut doc, _, note) = page("#main p.note { color: red }");
    doc.set_attribute(note, "style", "color: purple; margin-top: 2px")
        .unwrap();
    assert_eq!(value(&doc, note, "color"), "purple");
    assert_eq!(value(&doc, note, "margin-top"), "2px");
}

#[test]
fn inheritance_never_overwrites_own_values() {
    let (mut doc, main, note) = page(".card { color: navy; font-size: 18px; padding-top: 9px }");
    doc.set_attribute(note, "style", "font-size: 10px").unwrap();
    assert_eq!(value(&doc, note, "color"), "navy", "inherited from the card");
    assert_eq!(value(&doc, note, "font-size"), "10px");
    assert_eq!(value(&doc, note, "padding-top"), "", "padding does not inherit");
    assert_eq!(value(&doc, main, "padding-top"), "9px");
}

#[test]
fn inherited_custom_properties() {
    let (doc, _, note) = page("html { --accent: #0af } .card { --gap: 4px }");
    assert_eq!(value(&doc, note, "--accent"), "#0af");
    assert_eq!(value(&doc, note, "--gap"), "4px");
}

#[test]
fn comments_in_inline_style_do_not_hide_declarations() {
    let (mut doc, _, note) = page("p { width: 1px }");
    doc.set_attribute(note, "style", "color: red; /* theme */ width: 10px")
        .unwrap();
    assert_eq!(value(&doc, note, "color"), "red");
    assert_eq!(value(&doc, note, "width"), "10px");
}

#[test]
fn media_keyword_directly_followed_by_a_query() {
    let (doc, _, note) =
        page("p { display: block } @media(max-width: 600px) { p { display: none } }");
    let narrow = StyleResolver::new(ViewingContext::screen(360.0, 740.0));
    let style = doc.computed_style(&narrow, note, None).unwrap();
    assert_eq!(style.get_property_value("display"), "none");
}

#[test]
fn media_gated_rules_follow_the_viewing_context() {
    let (doc, _, note) =
        page("p { display: block } @media (max-width: 600px) { p { display: none } }");
    let mut resolver = StyleResolver::new(ViewingContext::screen(1280.0, 800.0));
    let wide = doc.computed_style(&resolver, note, None).unwrap();
    assert_eq!(wide.get_property_value("display"), "block");

    resolver.set_viewing_context(ViewingContext::screen(360.0, 740.0));
    let narrow = doc.computed_style(&resolver, note, None).unwrap();
    assert_eq!(narrow.get_property_value("display"), "none");
}

#[test]
fn disabled_and_print_sheets_are_skipped_on_screen() {
    let (mut doc, _, note) = page("p { color: black }");
    let mut disabled = parse_stylesheet("p { color: red }");
    disabled.set_disabled(true);
    doc.add_style_sheet(disabled);
    let mut print = parse_stylesheet("p { color: gray }");
    print.set_media(MediaList::parse("print"));
    doc.add_style_sheet(print);
    doc.add_style_sheet(ForeignStyleSheet {
        type_: "text/xsl".to_owned(),
        href: Some("style.xsl".to_owned()),
    });
    assert_eq!(value(&doc, note, "color"), "black");

    let printer = StyleResolver::new(ViewingContext::print(794.0, 1123.0));
    let printed = doc.computed_style(&printer, note, None).unwrap();
    assert_eq!(printed.get_property_value("color"), "gray");
}

#[test]
fn snapshots_do_not_track_later_changes() {
    let (mut doc, _, note) = page("p { color: red }");
    let before = doc
        .computed_style(&StyleResolver::default(), note, None)
        .unwrap();
    doc.set_attribute(note, "style", "color: blue").unwrap();
    assert_eq!(before.get_property_value("color"), "red");
    assert_eq!(value(&doc, note, "color"), "blue");
}

#[test]
fn stylesheet_less_documents_are_invalid_arguments() {
    /// A document backed by something other than CSS.
    struct XmlDocument {
        inline: StyleDeclaration,
    }

    impl StyleDocument for XmlDocument {
        type Element = u32;

        fn style_sheets(&self) -> Option<&StyleSheetList<Self>> {
            None
        }

        fn parent_element(&self, _: &u32) -> Option<u32> {
            None
        }

        fn inline_style(&self, _: &u32) -> Option<&StyleDeclaration> {
            Some(&self.inline)
        }
    }

    let doc = XmlDocument {
        inline: parse_declarations("color: red"),
    };
    let err = StyleResolver::default()
        .get_computed_style(&doc, &0, None)
        .unwrap_err();
    assert!(matches!(err, StyleError::InvalidArgument(_)));
}

#[test]
fn computed_style_of_the_document_node_is_rejected() {
    let (doc, _, _) = page("");
    let err = doc
        .computed_style(&StyleResolver::default(), doc.root(), None)
        .unwrap_err();
    assert!(matches!(err, DomError::NotAnElement(_)));
}
