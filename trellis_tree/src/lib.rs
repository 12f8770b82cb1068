// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tree: a generational node tree for documents.
//!
//! - Stores one payload per node in reusable slots addressed by [`NodeId`].
//! - Keeps parent and ordered child links, and walks ancestors nearest-first.
//! - Stale identifiers never alias a newer node: the generation must match.
//!
//! This is the structural backbone that event propagation (parent chain for
//! capture and bubble) and style inheritance (ancestor walk) run over.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes.
//! - [`NodeId`]: generational handle of a node.
//!
//! Key operations:
//! - [`Tree::insert`](Tree::insert) → [`NodeId`]
//! - [`Tree::remove`](Tree::remove) drops a whole subtree.
//! - [`Tree::reparent`](Tree::reparent) refuses moves that would create a cycle.
//! - [`Tree::ancestors`](Tree::ancestors) walks nearest first; [`Tree::descendants`](Tree::descendants) in pre-order.
//!
//! ### Minimal usage
//!
//! ```
//! use trellis_tree::Tree;
//!
//! let mut tree = Tree::new();
//! let html = tree.insert(None, "html");
//! let body = tree.insert(Some(html), "body");
//! let p = tree.insert(Some(body), "p");
//!
//! assert_eq!(tree.ancestors(p).collect::<Vec<_>>(), vec![body, html]);
//! assert_eq!(tree.descendants(html), vec![html, body, p]);
//!
//! tree.remove(body);
//! assert!(!tree.is_alive(p));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Ancestors, Tree};
pub use types::NodeId;
