// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation path construction.
//!
//! ## Overview
//!
//! Reconstructs the root→target path through a [`ParentLookup`] and emits the
//! capture → at-target → bubble sequence for it.
//!
//! - Capturing: ancestors from the root down to the parent, target excluded.
//! - At target: the target, once.
//! - Bubbling: ancestors from the parent up to the root, only for bubbling events.
//!
//! The sequence is pure data. [`Event`](crate::event::Event) walks it and
//! honors stop flags between steps.

use alloc::vec::Vec;

use crate::types::{ParentLookup, Phase};

/// A single step of a propagation sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PathStep<K> {
    /// Phase the event is in while this node's listeners run.
    pub phase: Phase,
    /// Node whose listeners run at this step.
    pub node: K,
}

/// Build the propagation sequence for an event dispatched at `target`.
///
/// ```
/// use trellis_events::path::{propagation_path, PathStep};
/// use trellis_events::types::{ParentLookup, Phase};
///
/// struct Parents;
/// impl ParentLookup<u32> for Parents {
///     fn parent_of(&self, node: &u32) -> Option<u32> {
///         (*node > 1).then(|| node - 1)
///     }
/// }
///
/// let steps: Vec<_> = propagation_path(3, &Parents, true)
///     .into_iter()
///     .map(|s| (s.phase, s.node))
///     .collect();
/// assert_eq!(
///     steps,
///     vec![
///         (Phase::Capturing, 1),
///         (Phase::Capturing, 2),
///         (Phase::AtTarget, 3),
///         (Phase::Bubbling, 2),
///         (Phase::Bubbling, 1),
///     ]
/// );
/// ```
pub fn propagation_path<K: Copy>(
    target: K,
    parents: &impl ParentLookup<K>,
    bubbles: bool,
) -> Vec<PathStep<K>> {
    let path = reconstruct_path(target, parents);
    let (ancestors, _) = path.split_at(path.len() - 1);
    let mut out = Vec::with_capacity(ancestors.len() * 2 + 1);
    // Capture: root→parent
    for &node in ancestors {
        out.push(PathStep {
            phase: Phase::Capturing,
            node,
        });
    }
    out.push(PathStep {
        phase: Phase::AtTarget,
        node: target,
    });
    // Bubble: parent→root
    if bubbles {
        for &node in ancestors.iter().rev() {
            out.push(PathStep {
                phase: Phase::Bubbling,
                node,
            });
        }
    }
    out
}

/// Root→target path, inclusive. Never empty.
pub(crate) fn reconstruct_path<K: Copy>(target: K, parents: &impl ParentLookup<K>) -> Vec<K> {
    let mut out = Vec::new();
    let mut cur = target;
    // Collect to root; caller ensures acyclic ancestry.
    loop {
        out.push(cur);
        match parents.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}
