// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis DOM: a small document that wires event dispatch and style resolution together.
//!
//! - [`Document`](crate::document::Document) owns a `trellis_tree` of [`Node`](crate::node::Node)s.
//!   Each node owns an event target; elements also carry attributes and the
//!   declarations of their `style` attribute.
//! - Events dispatch along the tree's parent links, with the document node at the
//!   top of every path.
//! - Style rules use [`SimpleSelector`](crate::selector::SimpleSelector): compound
//!   type, `#id` and `.class` selectors joined by descendant combinators.
//! - [`parse_stylesheet`](crate::css::parse_stylesheet) and
//!   [`parse_declarations`](crate::css::parse_declarations) read CSS text with
//!   `cssparser`; the `style` attribute goes through the latter.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use trellis_dom::css::parse_stylesheet;
//! use trellis_dom::document::Document;
//! use trellis_events::event::Event;
//! use trellis_events::listener::EventListener;
//! use trellis_events::types::EventInit;
//! use trellis_style::resolver::StyleResolver;
//!
//! let mut doc = Document::new();
//! let body = doc.create_element(doc.root(), "body").unwrap();
//! let button = doc.create_element(body, "button").unwrap();
//! doc.set_attribute(button, "class", "primary").unwrap();
//! doc.add_style_sheet(parse_stylesheet("body { color: navy } .primary { width: 80px }"));
//!
//! let style = doc.computed_style(&StyleResolver::default(), button, None).unwrap();
//! assert_eq!(style.get_property_value("color"), "navy");
//! assert_eq!(style.get_property_value("width"), "80px");
//!
//! let clicks = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&clicks);
//! doc.add_event_listener(
//!     body,
//!     "click",
//!     Some(EventListener::infallible(move |_, _| *counter.borrow_mut() += 1)),
//!     false,
//! )
//! .unwrap();
//!
//! let mut click = Event::new("click", EventInit { bubbles: true, cancelable: true });
//! assert!(doc.dispatch_event(button, &mut click).unwrap());
//! assert_eq!(*clicks.borrow(), 1);
//! ```
//!
//! Unlike the crates below it, this crate needs `std` (for `cssparser`).

extern crate alloc;

pub mod css;
pub mod document;
pub mod error;
pub mod node;
pub mod selector;
