// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style resolution errors.

use thiserror::Error;

/// Errors raised by [`StyleResolver`](crate::resolver::StyleResolver).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum StyleError {
    /// An argument is not something the resolver can work with, such as a
    /// document that does not expose a CSS stylesheet list.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
