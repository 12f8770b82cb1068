// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document errors.

use alloc::string::String;

use thiserror::Error;
use trellis_events::error::DispatchError;
use trellis_style::error::StyleError;
use trellis_tree::NodeId;

/// Errors raised by [`Document`](crate::document::Document) operations.
#[derive(Debug, Error)]
pub enum DomError {
    /// The node id is stale or was never part of this document.
    #[error("no live node {0:?} in this document")]
    UnknownNode(NodeId),
    /// The operation needs an element, but the node is text or the document itself.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// The operation would break the document hierarchy, such as removing the
    /// document node or appending children to text.
    #[error("hierarchy request rejected for node {0:?}")]
    HierarchyRequest(NodeId),
    /// The selector uses syntax the simple selector engine does not support.
    #[error("invalid selector {0:?}")]
    InvalidSelector(String),
    /// Event dispatch failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// Style resolution failed.
    #[error(transparent)]
    Style(#[from] StyleError),
}
