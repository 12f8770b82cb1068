// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_dom::document::Document;
use trellis_events::event::Event;
use trellis_events::listener::EventListener;
use trellis_events::types::EventInit;
use trellis_tree::NodeId;

/// A chain of `depth` nested divs; returns the document and the innermost node.
fn chain(depth: usize) -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let mut nodes = Vec::with_capacity(depth);
    let mut parent = doc.root();
    for _ in 0..depth {
        parent = doc.create_element(parent, "div").unwrap();
        nodes.push(parent);
    }
    (doc, nodes)
}

fn click() -> Event<NodeId> {
    Event::new(
        "click",
        EventInit {
            bubbles: true,
            cancelable: true,
        },
    )
}

fn bench_dispatch_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_depth");
    for &depth in &[4usize, 16, 64] {
        let (doc, nodes) = chain(depth);
        for &n in &nodes {
            doc.add_event_listener(n, "click", Some(EventListener::infallible(|_, _| {})), true)
                .unwrap();
            doc.add_event_listener(n, "click", Some(EventListener::infallible(|_, _| {})), false)
                .unwrap();
        }
        let leaf = *nodes.last().unwrap();
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("capture_bubble_d{}", depth), |b| {
            b.iter_batched(
                click,
                |mut ev| black_box(doc.dispatch_event(leaf, &mut ev).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_listener_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("listener_filtering");
    for &count in &[8usize, 64, 256] {
        let (doc, nodes) = chain(1);
        let target = nodes[0];
        // Mostly other event types, so the per-listener filter dominates.
        for i in 0..count {
            let type_ = if i % 8 == 0 { "click" } else { "keydown" };
            doc.add_event_listener(
                target,
                type_,
                Some(EventListener::infallible(|_, _| {})),
                i % 2 == 0,
            )
            .unwrap();
        }
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("at_target_n{}", count), |b| {
            b.iter_batched(
                click,
                |mut ev| black_box(doc.dispatch_event(target, &mut ev).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dispatch_depth, bench_listener_filtering);
criterion_main!(benches);
