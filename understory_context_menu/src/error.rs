// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy.

use alloc::string::String;

use crate::registry::TargetId;

/// Errors raised synchronously by the context menu operations.
///
/// None of these are retried or deferred; they surface at the call that broke the contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A target reference does not resolve to a live element with a usable `id`.
    #[error("invalid target: {reason}")]
    InvalidTarget {
        /// What was wrong with the reference.
        reason: String,
    },

    /// No menu data was supplied (absent or an empty item list).
    #[error("a menu element or a non-empty item list must be provided")]
    MissingMenu,

    /// A menu was given as an element handle that is not live.
    #[error("menu element is not part of the document")]
    InvalidMenu,

    /// The target already has a menu bound to it.
    #[error("target `{0}` already has a context menu")]
    DuplicateTarget(TargetId),

    /// The target has no menu bound to it.
    #[error("target `{0}` has no context menu")]
    UnknownTarget(TargetId),

    /// Construction input was malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }
}
