// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener callbacks and the per-target ordered registry.
//!
//! ## Identity
//!
//! A [`RegisteredListener`] is a plain value compared field by field. The
//! callback part compares by identity: two [`EventListener`] handles are equal
//! only when they are clones of the same allocation, never because two
//! closures happen to behave alike.
//!
//! ## Duplicates
//!
//! The registry does not deduplicate. Registering the same
//! `(type, callback, capture)` triple twice stores two entries and both fire.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ListenerError;
use crate::event::Event;

type Callback<K> = dyn Fn(K, &mut Event<K>) -> Result<(), ListenerError>;

/// A shareable listener callback.
///
/// The callback receives the current target and the event being dispatched.
/// Returning `Err` aborts the dispatch; see
/// [`DispatchError::Listener`](crate::error::DispatchError::Listener).
pub struct EventListener<K> {
    callback: Rc<Callback<K>>,
}

impl<K> EventListener<K> {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(K, &mut Event<K>) -> Result<(), ListenerError> + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Wrap a callback that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(K, &mut Event<K>) + 'static,
    {
        Self::new(move |node, event| {
            callback(node, event);
            Ok(())
        })
    }

    /// Invoke the callback.
    pub fn call(&self, current_target: K, event: &mut Event<K>) -> Result<(), ListenerError> {
        (self.callback)(current_target, event)
    }

    /// Returns true when both handles refer to the same callback allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        core::ptr::addr_eq(Rc::as_ptr(&self.callback), Rc::as_ptr(&other.callback))
    }
}

impl<K> Clone for EventListener<K> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<K> PartialEq for EventListener<K> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<K> Eq for EventListener<K> {}

impl<K> core::fmt::Debug for EventListener<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("EventListener")
            .field(&Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// One registration: event type, callback, and whether it listens on the capture leg.
#[derive(Debug)]
pub struct RegisteredListener<K> {
    type_: String,
    callback: EventListener<K>,
    capture: bool,
}

impl<K> RegisteredListener<K> {
    /// Create a registration record.
    pub fn new(type_: impl Into<String>, callback: EventListener<K>, capture: bool) -> Self {
        Self {
            type_: type_.into(),
            callback,
            capture,
        }
    }

    /// Event type this listener handles.
    pub fn event_type(&self) -> &str {
        &self.type_
    }

    /// The callback.
    pub fn callback(&self) -> &EventListener<K> {
        &self.callback
    }

    /// Whether the listener fires on the capture leg (and at target) rather than
    /// the bubble leg (and at target).
    pub fn capture(&self) -> bool {
        self.capture
    }
}

// Manual impls: the node key type needs neither `Clone` nor `PartialEq`.
impl<K> Clone for RegisteredListener<K> {
    fn clone(&self) -> Self {
        Self {
            type_: self.type_.clone(),
            callback: self.callback.clone(),
            capture: self.capture,
        }
    }
}

impl<K> PartialEq for RegisteredListener<K> {
    fn eq(&self, other: &Self) -> bool {
        self.type_ == other.type_
            && self.callback == other.callback
            && self.capture == other.capture
    }
}

impl<K> Eq for RegisteredListener<K> {}

/// Ordered collection of listeners owned by one target.
///
/// Insertion order is invocation order within a phase.
#[derive(Debug)]
pub struct ListenerRegistry<K> {
    entries: Vec<RegisteredListener<K>>,
}

impl<K> Clone for ListenerRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K> Default for ListenerRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ListenerRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a registration. Duplicates are kept.
    pub fn push(&mut self, listener: RegisteredListener<K>) {
        self.entries.push(listener);
    }

    /// Remove the first entry equal to `listener`.
    ///
    /// Returns whether an entry was removed; later duplicates stay registered.
    pub fn remove_first(&mut self, listener: &RegisteredListener<K>) -> bool {
        match self.entries.iter().position(|l| l == listener) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any registration handles `type_`.
    pub fn has_type(&self, type_: &str) -> bool {
        self.entries.iter().any(|l| l.type_ == type_)
    }

    /// Iterate registrations in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, RegisteredListener<K>> {
        self.entries.iter()
    }

    /// Copy of the current registrations, used to iterate while callbacks
    /// mutate the live registry.
    pub fn snapshot(&self) -> Vec<RegisteredListener<K>> {
        self.entries.clone()
    }
}

impl<'a, K> IntoIterator for &'a ListenerRegistry<K> {
    type Item = &'a RegisteredListener<K>;
    type IntoIter = core::slice::Iter<'a, RegisteredListener<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
