// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event targets: listener registration, filtered invocation, and the dispatch entry point.
//!
//! ## Invocation
//!
//! [`EventTarget::invoke_listeners`] runs once per target per phase and walks a
//! snapshot of the registry in insertion order. For each entry:
//!
//! - stop when `STOP_IMMEDIATE_PROPAGATION` is set (checked before every listener);
//! - skip entries for other event types;
//! - skip capturing entries while `Bubbling` and non-capturing entries while `Capturing`;
//! - otherwise call the listener with the current target.
//!
//! At `AtTarget` both kinds fire, in registration order.
//!
//! ## Reentrancy
//!
//! Callbacks may add or remove listeners on the target being invoked, or
//! dispatch other events. The pass in progress iterates its snapshot and
//! observes neither additions nor removals.

use core::cell::RefCell;

use alloc::string::String;

use tracing::trace;

use crate::error::{DispatchError, StateViolation};
use crate::event::{DomEvent, Event};
use crate::listener::{EventListener, ListenerRegistry, RegisteredListener};
use crate::types::{EventFlags, ParentLookup, Phase, TargetLookup};

/// Listener owner for one node.
///
/// Registration methods take `&self` so listeners can be added or removed from
/// inside callbacks; the target is single-threaded (`!Sync`).
#[derive(Debug)]
pub struct EventTarget<K> {
    node: K,
    registry: RefCell<ListenerRegistry<K>>,
}

impl<K: Copy> EventTarget<K> {
    /// Create a target for `node` with no listeners.
    pub fn new(node: K) -> Self {
        Self {
            node,
            registry: RefCell::new(ListenerRegistry::new()),
        }
    }

    /// Node this target belongs to.
    pub fn node(&self) -> K {
        self.node
    }

    /// Register `callback` for `type_`. `None` is ignored.
    ///
    /// Registering the same `(type_, callback, capture)` twice keeps both entries.
    pub fn add_event_listener(
        &self,
        type_: impl Into<String>,
        callback: Option<EventListener<K>>,
        capture: bool,
    ) {
        let Some(callback) = callback else {
            return;
        };
        self.registry
            .borrow_mut()
            .push(RegisteredListener::new(type_, callback, capture));
    }

    /// Unregister the first matching `(type_, callback, capture)` entry. `None` is ignored.
    pub fn remove_event_listener(
        &self,
        type_: impl Into<String>,
        callback: Option<EventListener<K>>,
        capture: bool,
    ) {
        let Some(callback) = callback else {
            return;
        };
        let probe = RegisteredListener::new(type_, callback, capture);
        self.registry.borrow_mut().remove_first(&probe);
    }

    /// Whether any listener handles `type_`.
    pub fn has_listeners_for(&self, type_: &str) -> bool {
        self.registry.borrow().has_type(type_)
    }

    /// Number of registrations, duplicates included.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Drop every registration.
    pub fn remove_all_listeners(&self) {
        self.registry.borrow_mut().clear();
    }
}

impl<K: Copy + core::fmt::Debug> EventTarget<K> {
    /// Invoke matching listeners for the event's current phase.
    ///
    /// A failing listener aborts the pass and its error is returned.
    pub fn invoke_listeners(&self, event: &mut Event<K>) -> Result<(), DispatchError> {
        let listeners = self.registry.borrow().snapshot();
        trace!(
            node = ?self.node,
            phase = ?event.phase(),
            count = listeners.len(),
            "invoke listeners"
        );
        for listener in &listeners {
            if event
                .flags()
                .contains(EventFlags::STOP_IMMEDIATE_PROPAGATION)
            {
                break;
            }
            if listener.event_type() != event.event_type() {
                continue;
            }
            match (listener.capture(), event.phase()) {
                (true, Phase::Bubbling) | (false, Phase::Capturing) => continue,
                _ => {}
            }
            listener
                .callback()
                .call(self.node, event)
                .map_err(DispatchError::Listener)?;
        }
        Ok(())
    }

    /// Dispatch `event` with this target as the event target.
    ///
    /// Fails with [`DispatchError::InvalidState`] when `event` is not an engine
    /// [`Event`], is already being dispatched, or was never initialized.
    /// Synthetic dispatch is never trusted. Returns `true` when no listener
    /// prevented the default action.
    pub fn dispatch_event<T>(
        &self,
        event: &mut dyn DomEvent<K>,
        tree: &T,
    ) -> Result<bool, DispatchError>
    where
        T: ParentLookup<K> + TargetLookup<K>,
    {
        let event = Self::validate(event)?;
        event.set_untrusted();
        event.propagate(self.node, tree)
    }

    /// Dispatch an engine-originated event, keeping its trusted flag.
    ///
    /// Subject to the same state checks as [`EventTarget::dispatch_event`].
    pub fn fire_event<T>(&self, event: &mut Event<K>, tree: &T) -> Result<bool, DispatchError>
    where
        T: ParentLookup<K> + TargetLookup<K>,
    {
        let event = Self::validate(event)?;
        event.propagate(self.node, tree)
    }

    fn validate(event: &mut dyn DomEvent<K>) -> Result<&mut Event<K>, DispatchError> {
        let Some(event) = event.as_event_mut() else {
            return Err(DispatchError::InvalidState(StateViolation::ForeignEvent));
        };
        if event.flags().contains(EventFlags::DISPATCH) {
            return Err(DispatchError::InvalidState(
                StateViolation::AlreadyDispatching,
            ));
        }
        if !event.flags().contains(EventFlags::INITIALIZED) {
            return Err(DispatchError::InvalidState(StateViolation::Uninitialized));
        }
        Ok(event)
    }
}
