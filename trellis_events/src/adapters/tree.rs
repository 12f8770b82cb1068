// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Trellis Tree.
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.
//!
//! ## Notes
//!
//! A [`Tree`] supplies parent links directly. Payloads that own an
//! [`EventTarget`] (via `AsRef`) make the tree a complete dispatch context, so
//! `target.dispatch_event(&mut event, &tree)` works without a wrapper type.

use trellis_tree::{NodeId, Tree};

use crate::target::EventTarget;
use crate::types::{ParentLookup, TargetLookup};

impl<T> ParentLookup<NodeId> for Tree<T> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }
}

impl<T: AsRef<EventTarget<NodeId>>> TargetLookup<NodeId> for Tree<T> {
    fn target_of(&self, node: &NodeId) -> Option<&EventTarget<NodeId>> {
        self.get(*node).map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::listener::EventListener;
    use crate::types::EventInit;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    struct Payload(EventTarget<NodeId>);

    impl AsRef<EventTarget<NodeId>> for Payload {
        fn as_ref(&self) -> &EventTarget<NodeId> {
            &self.0
        }
    }

    #[test]
    fn tree_parents_drive_propagation() {
        let mut tree: Tree<Payload> = Tree::new();
        let root = tree.insert_with(None, |id| Payload(EventTarget::new(id)));
        let mid = tree.insert_with(Some(root), |id| Payload(EventTarget::new(id)));
        let leaf = tree.insert_with(Some(mid), |id| Payload(EventTarget::new(id)));

        let seen: Rc<RefCell<Vec<NodeId>>> = Rc::default();
        for id in [root, mid, leaf] {
            let seen = Rc::clone(&seen);
            tree.target_of(&id).unwrap().add_event_listener(
                "ping",
                Some(EventListener::infallible(move |node, _| {
                    seen.borrow_mut().push(node);
                })),
                false,
            );
        }

        let mut ev = Event::new(
            "ping",
            EventInit {
                bubbles: true,
                cancelable: false,
            },
        );
        tree.target_of(&leaf)
            .unwrap()
            .dispatch_event(&mut ev, &tree)
            .unwrap();
        assert_eq!(*seen.borrow(), [leaf, mid, root]);
    }

    #[test]
    fn removed_nodes_have_no_target() {
        let mut tree: Tree<Payload> = Tree::new();
        let root = tree.insert_with(None, |id| Payload(EventTarget::new(id)));
        let child = tree.insert_with(Some(root), |id| Payload(EventTarget::new(id)));
        assert_eq!(tree.parent_of(&child), Some(root));
        tree.remove(child);
        assert!(tree.target_of(&child).is_none());
        assert_eq!(tree.parent_of(&child), None);
    }
}
