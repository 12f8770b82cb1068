// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event state machine.
//!
//! ## Overview
//!
//! An [`Event`] carries its type, the current [`Phase`], an [`EventFlags`] set,
//! and the trusted bit. During dispatch it walks the propagation path and calls
//! back into each node's [`EventTarget`](crate::target::EventTarget).
//!
//! ## Lifecycle
//!
//! 1) Construct with [`Event::new`] (initialized), or [`Event::uninitialized`]
//!    followed by [`Event::init_event`].
//! 2) Dispatch through [`EventTarget::dispatch_event`](crate::target::EventTarget::dispatch_event).
//! 3) After dispatch the phase, current target, and stop flags are reset, so
//!    the same instance can be dispatched again. `CANCELED` and the target stay
//!    observable until the next initialization or dispatch.

use alloc::string::String;

use tracing::{debug, trace};

use crate::error::DispatchError;
use crate::path::propagation_path;
use crate::types::{EventFlags, EventInit, ParentLookup, Phase, TargetLookup};

/// Capability marker for anything that can be handed to
/// [`EventTarget::dispatch_event`](crate::target::EventTarget::dispatch_event).
///
/// Only [`Event`] grants mutable access to the engine's state machine; any
/// other implementor is rejected with
/// [`StateViolation::ForeignEvent`](crate::error::StateViolation::ForeignEvent).
pub trait DomEvent<K> {
    /// Event type name, e.g. `"click"`.
    fn event_type(&self) -> &str;

    /// Access the engine event behind this value, if there is one.
    fn as_event_mut(&mut self) -> Option<&mut Event<K>> {
        None
    }
}

/// A DOM event that can be dispatched through a tree of targets.
#[derive(Clone, Debug)]
pub struct Event<K> {
    type_: String,
    phase: Phase,
    flags: EventFlags,
    bubbles: bool,
    cancelable: bool,
    trusted: bool,
    target: Option<K>,
    current_target: Option<K>,
}

impl<K> Default for Event<K> {
    fn default() -> Self {
        Self::uninitialized()
    }
}

impl<K> Event<K> {
    /// Create an initialized, untrusted event.
    pub fn new(type_: impl Into<String>, init: EventInit) -> Self {
        let mut event = Self::uninitialized();
        event.init_event(type_, init.bubbles, init.cancelable);
        event
    }

    /// Create an initialized event flagged as originating from the engine.
    ///
    /// The flag survives [`EventTarget::fire_event`](crate::target::EventTarget::fire_event)
    /// but is cleared by [`EventTarget::dispatch_event`](crate::target::EventTarget::dispatch_event).
    pub fn trusted(type_: impl Into<String>, init: EventInit) -> Self {
        let mut event = Self::new(type_, init);
        event.trusted = true;
        event
    }

    /// Create an event that must be initialized before it can be dispatched.
    pub fn uninitialized() -> Self {
        Self {
            type_: String::new(),
            phase: Phase::None,
            flags: EventFlags::empty(),
            bubbles: false,
            cancelable: false,
            trusted: false,
            target: None,
            current_target: None,
        }
    }

    /// (Re)initialize the event. Ignored while the event is being dispatched.
    pub fn init_event(&mut self, type_: impl Into<String>, bubbles: bool, cancelable: bool) {
        if self.flags.contains(EventFlags::DISPATCH) {
            return;
        }
        self.flags = EventFlags::INITIALIZED;
        self.type_ = type_.into();
        self.bubbles = bubbles;
        self.cancelable = cancelable;
        self.trusted = false;
        self.target = None;
    }

    /// Event type name.
    pub fn event_type(&self) -> &str {
        &self.type_
    }

    /// Current propagation phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current flag set.
    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Whether the event runs the bubbling leg.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether the default action can be prevented.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Whether the event originated from the engine rather than a script-style dispatch.
    pub fn is_trusted(&self) -> bool {
        self.trusted
    }

    /// Node the event was dispatched at.
    pub fn target(&self) -> Option<&K> {
        self.target.as_ref()
    }

    /// Node whose listeners are running; `None` outside dispatch.
    pub fn current_target(&self) -> Option<&K> {
        self.current_target.as_ref()
    }

    /// Whether a listener prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::CANCELED)
    }

    /// Whether the event is mid-dispatch.
    pub fn is_dispatching(&self) -> bool {
        self.flags.contains(EventFlags::DISPATCH)
    }

    /// Finish the current target, then stop.
    pub fn stop_propagation(&mut self) {
        self.flags.insert(EventFlags::STOP_PROPAGATION);
    }

    /// Stop before the next listener, on this target or any other.
    pub fn stop_immediate_propagation(&mut self) {
        self.flags
            .insert(EventFlags::STOP_PROPAGATION | EventFlags::STOP_IMMEDIATE_PROPAGATION);
    }

    /// Request that the default action be skipped. No effect unless cancelable.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.flags.insert(EventFlags::CANCELED);
        }
    }

    pub(crate) fn set_untrusted(&mut self) {
        self.trusted = false;
    }
}

impl<K: Copy + core::fmt::Debug> Event<K> {
    /// Walk the propagation path for `target`, invoking listeners along the way.
    ///
    /// Callers must have validated the event state. Returns `true` when the
    /// default action was not prevented.
    pub(crate) fn propagate<T>(&mut self, target: K, tree: &T) -> Result<bool, DispatchError>
    where
        T: ParentLookup<K> + TargetLookup<K>,
    {
        self.flags.insert(EventFlags::DISPATCH);
        self.target = Some(target);
        debug!(
            event = %self.type_,
            target = ?target,
            trusted = self.trusted,
            "dispatch"
        );

        let walked = self.walk(target, tree);

        // Reset regardless of how the walk ended so the event can be reused.
        self.flags.remove(
            EventFlags::DISPATCH
                | EventFlags::STOP_PROPAGATION
                | EventFlags::STOP_IMMEDIATE_PROPAGATION,
        );
        self.phase = Phase::None;
        self.current_target = None;

        walked?;
        let not_prevented = !self.default_prevented();
        debug!(event = %self.type_, not_prevented, "dispatch finished");
        Ok(not_prevented)
    }

    fn walk<T>(&mut self, target: K, tree: &T) -> Result<(), DispatchError>
    where
        T: ParentLookup<K> + TargetLookup<K>,
    {
        for step in propagation_path(target, tree, self.bubbles) {
            if self.flags.contains(EventFlags::STOP_PROPAGATION) {
                trace!(event = %self.type_, node = ?step.node, "propagation stopped");
                break;
            }
            self.phase = step.phase;
            self.current_target = Some(step.node);
            if let Some(t) = tree.target_of(&step.node) {
                t.invoke_listeners(self)?;
            }
        }
        Ok(())
    }
}

impl<K> DomEvent<K> for Event<K> {
    fn event_type(&self) -> &str {
        &self.type_
    }

    fn as_event_mut(&mut self) -> Option<&mut Self> {
        Some(self)
    }
}
