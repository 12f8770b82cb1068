// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Events: deterministic, `no_std` DOM event dispatch.
//!
//! ## Overview
//!
//! Every node in a document owns an [`EventTarget`](crate::target::EventTarget) holding an ordered
//! listener registry. Dispatching an [`Event`](crate::event::Event) at a target walks the
//! propagation path, capture → target → bubble, and invokes the matching listeners of each node.
//!
//! ## Inputs
//!
//! The document supplies two lookups:
//! - [`ParentLookup`](crate::types::ParentLookup): the parent of a node, used to build the root→target path.
//! - [`TargetLookup`](crate::types::TargetLookup): the event target owned by a node.
//!
//! With the `tree_adapter` feature both are implemented for `trellis_tree::Tree` payloads
//! that expose an event target.
//!
//! ## Ordering
//!
//! - Capture visits ancestors from the root down to the parent; only capturing listeners fire.
//! - At target, every listener fires in registration order regardless of its capture flag.
//! - Bubble visits ancestors from the parent up to the root, and only for bubbling events;
//!   only non-capturing listeners fire.
//!
//! `stop_propagation` finishes the current node and stops. `stop_immediate_propagation`
//! stops before the next listener. A listener returning `Err` aborts the dispatch and the
//! error is returned to the caller. In every case the event's dispatch state is reset,
//! so the instance can be dispatched again.
//!
//! ## Minimal usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::collections::BTreeMap;
//! use std::rc::Rc;
//!
//! use trellis_events::event::Event;
//! use trellis_events::listener::EventListener;
//! use trellis_events::target::EventTarget;
//! use trellis_events::types::{EventInit, ParentLookup, TargetLookup};
//!
//! // A two-node document: 1 is the parent of 2.
//! struct Doc(BTreeMap<u32, EventTarget<u32>>);
//! impl ParentLookup<u32> for Doc {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node == 2).then_some(1)
//!     }
//! }
//! impl TargetLookup<u32> for Doc {
//!     fn target_of(&self, node: &u32) -> Option<&EventTarget<u32>> {
//!         self.0.get(node)
//!     }
//! }
//!
//! let doc = Doc([1, 2].into_iter().map(|n| (n, EventTarget::new(n))).collect());
//! let log = Rc::new(RefCell::new(Vec::new()));
//! for (node, capture) in [(1, true), (2, false), (1, false)] {
//!     let log = Rc::clone(&log);
//!     doc.0[&node].add_event_listener(
//!         "click",
//!         Some(EventListener::infallible(move |n, ev| {
//!             log.borrow_mut().push((n, ev.phase()));
//!         })),
//!         capture,
//!     );
//! }
//!
//! let mut click = Event::new("click", EventInit { bubbles: true, cancelable: true });
//! let not_prevented = doc.0[&2].dispatch_event(&mut click, &doc).unwrap();
//! assert!(not_prevented);
//!
//! use trellis_events::types::Phase;
//! assert_eq!(
//!     *log.borrow(),
//!     [(1, Phase::Capturing), (2, Phase::AtTarget), (1, Phase::Bubbling)]
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Targets use interior mutability and are not `Sync`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod adapters;
pub mod error;
pub mod event;
pub mod listener;
pub mod path;
pub mod target;
pub mod types;
