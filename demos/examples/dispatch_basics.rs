// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch basics.
//!
//! Builds `document > body > div#middle > button`, registers a capturing and a
//! bubbling listener on the middle node, and dispatches a click at the button
//! and then at the middle node itself.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p trellis_demos --example dispatch_basics`

use std::cell::RefCell;
use std::rc::Rc;

use trellis_dom::document::Document;
use trellis_events::event::Event;
use trellis_events::listener::EventListener;
use trellis_events::types::EventInit;

fn main() {
    env_logger::init();

    let mut doc = Document::new();
    let body = doc.create_element(doc.root(), "body").unwrap();
    let middle = doc.create_element(body, "div").unwrap();
    doc.set_attribute(middle, "id", "middle").unwrap();
    let button = doc.create_element(middle, "button").unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    for (name, capture) in [("A", true), ("B", false)] {
        let log = Rc::clone(&log);
        doc.add_event_listener(
            middle,
            "click",
            Some(EventListener::infallible(move |node, ev| {
                log.borrow_mut()
                    .push(format!("{name} on {node:?} during {:?}", ev.phase()));
            })),
            capture,
        )
        .unwrap();
    }

    let init = EventInit {
        bubbles: true,
        cancelable: true,
    };

    println!("== click at the button ==");
    let mut click = Event::new("click", init);
    let not_prevented = doc.dispatch_event(button, &mut click).unwrap();
    for line in log.borrow_mut().drain(..) {
        println!("  {line}");
    }
    println!("  default not prevented: {not_prevented}");

    println!("== click at #middle ==");
    // The same event instance can be dispatched again once the first dispatch returns.
    let not_prevented = doc.dispatch_event(middle, &mut click).unwrap();
    for line in log.borrow_mut().drain(..) {
        println!("  {line}");
    }
    println!("  default not prevented: {not_prevented}");
}
