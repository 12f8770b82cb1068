// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed style.
//!
//! Resolves the style of a paragraph under a small stylesheet for a desktop
//! and a phone viewport, showing specificity, inline style, inheritance, and
//! a media-gated rule.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example computed_style`

use trellis_dom::css::parse_stylesheet;
use trellis_dom::document::Document;
use trellis_style::media::ViewingContext;
use trellis_style::resolver::StyleResolver;

const CSS: &str = r#"
    body { color: #222; font-family: sans-serif; --accent: teal }
    p { margin-top: 16px; color: #444 }
    .lead { font-size: 20px }
    #intro p.lead { color: black }
    @media (max-width: 600px) {
        .lead { font-size: 16px }
    }
"#;

fn main() {
    env_logger::init();

    let mut doc = Document::new();
    let html = doc.create_element(doc.root(), "html").unwrap();
    let body = doc.create_element(html, "body").unwrap();
    let section = doc.create_element(body, "section").unwrap();
    doc.set_attribute(section, "id", "intro").unwrap();
    let p = doc.create_element(section, "p").unwrap();
    doc.set_attribute(p, "class", "lead").unwrap();
    doc.set_attribute(p, "style", "margin-top: 0").unwrap();
    doc.add_style_sheet(parse_stylesheet(CSS));

    let mut resolver = StyleResolver::new(ViewingContext::screen(1280.0, 800.0));
    for (label, window) in [
        ("desktop", ViewingContext::screen(1280.0, 800.0)),
        ("phone", ViewingContext::screen(390.0, 844.0)),
    ] {
        resolver.set_viewing_context(window);
        let style = doc.computed_style(&resolver, p, None).unwrap();
        println!("== {label} ==");
        for (property, value) in style.iter() {
            println!("  {property}: {value}");
        }
    }
}
