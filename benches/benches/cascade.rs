// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write as _;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_dom::css::parse_stylesheet;
use trellis_dom::document::Document;
use trellis_style::resolver::StyleResolver;
use trellis_tree::NodeId;

/// `rules` class rules, a handful of which match the innermost of `depth` nested elements.
fn page(depth: usize, rules: usize) -> (Document, NodeId) {
    let mut doc = Document::new();
    let mut parent = doc.root();
    for i in 0..depth {
        parent = doc.create_element(parent, "div").unwrap();
        doc.set_attribute(parent, "class", &format!("c{}", i % 16))
            .unwrap();
    }
    doc.set_attribute(parent, "style", "margin-top: 1px").unwrap();

    let mut css = String::new();
    for i in 0..rules {
        let _ = writeln!(
            css,
            ".c{} {{ color: #{:06x}; padding-top: {}px }}",
            i % 64,
            i,
            i % 10
        );
    }
    css.push_str("div div { font-size: 14px } @media (min-width: 800px) { div { width: 50% } }");
    doc.add_style_sheet(parse_stylesheet(&css));
    (doc, parent)
}

fn bench_computed_style(c: &mut Criterion) {
    let resolver = StyleResolver::default();
    let mut group = c.benchmark_group("computed_style");
    for &(depth, rules) in &[(4usize, 32usize), (16, 128), (32, 512)] {
        let (doc, leaf) = page(depth, rules);
        group.throughput(Throughput::Elements(rules as u64));
        group.bench_function(format!("depth{}_rules{}", depth, rules), |b| {
            b.iter(|| black_box(doc.computed_style(&resolver, leaf, None).unwrap()))
        });
    }
    group.finish();
}

fn bench_parse_stylesheet(c: &mut Criterion) {
    let mut css = String::new();
    for i in 0..1000 {
        let _ = writeln!(css, "#id{i} .note span {{ color: red; margin: {i}px !important }}");
    }
    let mut group = c.benchmark_group("parse_stylesheet");
    group.throughput(Throughput::Bytes(css.len() as u64));
    group.bench_function("rules_1000", |b| b.iter(|| black_box(parse_stylesheet(&css))));
    group.finish();
}

criterion_group!(benches, bench_computed_style, bench_parse_stylesheet);
criterion_main!(benches);
