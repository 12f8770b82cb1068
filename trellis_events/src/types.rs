// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for propagation: phases, event flags, init options, and tree lookups.
//!
//! ## Overview
//!
//! These types describe the propagation protocol and its inputs.
//! They are consumed by [`Event`](crate::event::Event) and
//! [`EventTarget`](crate::target::EventTarget), and implemented by documents.

use crate::target::EventTarget;

/// Phases of event propagation.
///
/// Reported by [`Event::phase`](crate::event::Event::phase) while listeners run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Phase {
    /// The event is not being dispatched.
    #[default]
    None,
    /// Root-to-parent traversal, before the target is reached.
    Capturing,
    /// Listeners of the target itself.
    AtTarget,
    /// Parent-to-root traversal, after the target.
    Bubbling,
}

impl Phase {
    /// The numeric `eventPhase` constant used by DOM bindings (0 through 3).
    pub const fn code(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Capturing => 1,
            Self::AtTarget => 2,
            Self::Bubbling => 3,
        }
    }
}

bitflags::bitflags! {
    /// Dispatch-state flags carried by an [`Event`](crate::event::Event).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// The event has been fully constructed and may be dispatched.
        const INITIALIZED                = 0b0000_0001;
        /// The event is currently being dispatched.
        const DISPATCH                   = 0b0000_0010;
        /// No further targets are visited once the current one finishes.
        const STOP_PROPAGATION           = 0b0000_0100;
        /// No further listeners are invoked, on this target or any other.
        const STOP_IMMEDIATE_PROPAGATION = 0b0000_1000;
        /// A listener requested that the default action be prevented.
        const CANCELED                   = 0b0001_0000;
    }
}

/// Options used when constructing an [`Event`](crate::event::Event).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EventInit {
    /// Whether the event runs the bubbling leg after the target.
    pub bubbles: bool,
    /// Whether [`Event::prevent_default`](crate::event::Event::prevent_default) has an effect.
    pub cancelable: bool,
}

/// Look up the parent of a node to build the root→target propagation path.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider: every node is a root.
///
/// All calls to [`ParentLookup::parent_of`] return `None`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// Map nodes to the [`EventTarget`] that owns their listeners.
///
/// Nodes without a target still take part in the propagation path; they
/// simply have no listeners to invoke.
pub trait TargetLookup<K> {
    /// Returns the event target of `node`, if it has one.
    fn target_of(&self, node: &K) -> Option<&EventTarget<K>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_codes_match_dom_constants() {
        assert_eq!(Phase::None.code(), 0);
        assert_eq!(Phase::Capturing.code(), 1);
        assert_eq!(Phase::AtTarget.code(), 2);
        assert_eq!(Phase::Bubbling.code(), 3);
        assert_eq!(Phase::default(), Phase::None);
    }

    #[test]
    fn flags_are_disjoint() {
        let all = [
            EventFlags::INITIALIZED,
            EventFlags::DISPATCH,
            EventFlags::STOP_PROPAGATION,
            EventFlags::STOP_IMMEDIATE_PROPAGATION,
            EventFlags::CANCELED,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(a.intersection(*b).is_empty(), "{a:?} overlaps {b:?}");
            }
        }
        assert!(EventFlags::default().is_empty());
    }
}
