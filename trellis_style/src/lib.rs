// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Style: a `no_std` CSS cascade and computed-style resolver.
//!
//! ## Overview
//!
//! [`StyleResolver::get_computed_style`](crate::resolver::StyleResolver::get_computed_style)
//! merges, for one element:
//! - the rules of the document's applicable stylesheets, ranked by selector
//!   specificity and then by source order;
//! - the element's inline declarations, which outrank every rule;
//! - inherited values from the ancestors for properties that inherit;
//!
//! and returns an immutable [`ComputedStyle`](crate::computed::ComputedStyle).
//!
//! ## Inputs
//!
//! Documents implement [`StyleDocument`](crate::sheet::StyleDocument): parent
//! links, inline style, and a [`StyleSheetList`](crate::sheet::StyleSheetList).
//! Selector matching is supplied through [`Selector`](crate::sheet::Selector);
//! media queries are evaluated against a [`ViewingContext`](crate::media::ViewingContext).
//!
//! ## Minimal usage
//!
//! ```
//! use trellis_style::declaration::StyleDeclaration;
//! use trellis_style::priority::Specificity;
//! use trellis_style::resolver::StyleResolver;
//! use trellis_style::sheet::{CssStyleSheet, Selector, StyleDocument, StyleRule, StyleSheetList};
//!
//! // Two elements: 0 is the parent of 1.
//! struct Doc {
//!     sheets: StyleSheetList<Doc>,
//!     inline: StyleDeclaration,
//! }
//!
//! impl StyleDocument for Doc {
//!     type Element = u8;
//!     fn style_sheets(&self) -> Option<&StyleSheetList<Self>> {
//!         Some(&self.sheets)
//!     }
//!     fn parent_element(&self, e: &u8) -> Option<u8> {
//!         (*e == 1).then_some(0)
//!     }
//!     fn inline_style(&self, e: &u8) -> Option<&StyleDeclaration> {
//!         (*e == 1).then_some(&self.inline)
//!     }
//! }
//!
//! struct Root;
//! impl Selector<Doc> for Root {
//!     fn matches(&self, _: &Doc, e: &u8) -> bool {
//!         *e == 0
//!     }
//!     fn specificity(&self) -> Specificity {
//!         Specificity::new(0, 0, 1)
//!     }
//! }
//!
//! let mut sheet = CssStyleSheet::<Doc>::new();
//! sheet.push_rule(StyleRule::new(Root, [("color", "navy"), ("width", "10px")].into_iter().collect()));
//! let mut sheets = StyleSheetList::<Doc>::new();
//! sheets.push(sheet);
//! let doc = Doc { sheets, inline: [("margin-top", "4px")].into_iter().collect() };
//!
//! let style = StyleResolver::default().get_computed_style(&doc, &1, None).unwrap();
//! assert_eq!(style.get_property_value("color"), "navy"); // inherited
//! assert_eq!(style.get_property_value("width"), ""); // does not inherit
//! assert_eq!(style.get_property_value("margin-top"), "4px"); // inline
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod bag;
pub mod computed;
pub mod declaration;
pub mod error;
pub mod media;
pub mod priority;
pub mod properties;
pub mod resolver;
pub mod sheet;
