// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch errors.

use alloc::boxed::Box;

use thiserror::Error;

/// Error type returned by listener callbacks.
pub type ListenerError = Box<dyn core::error::Error>;

/// Why an event was rejected before propagation started.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StateViolation {
    /// The event is not this engine's [`Event`](crate::event::Event) type.
    ForeignEvent,
    /// The event is already being dispatched.
    AlreadyDispatching,
    /// The event was never initialized.
    Uninitialized,
}

/// Errors raised by [`EventTarget::dispatch_event`](crate::target::EventTarget::dispatch_event).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The event cannot be dispatched in its current state.
    ///
    /// Not retryable: construct and initialize a fresh event instead.
    #[error("invalid state: {0:?}")]
    InvalidState(StateViolation),
    /// A listener callback failed; remaining listeners and phases were skipped.
    #[error("event listener failed")]
    Listener(#[source] ListenerError),
}
