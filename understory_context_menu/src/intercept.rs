// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interception layer: capture-phase context-menu listeners per target.
//!
//! Each attached target retains the exact [`ListenerId`] it registered, so detaching removes
//! that registration and nothing else. Attach and detach are both idempotent.
//!
//! Once a target is attached every context-menu event that reaches it suppresses the native
//! menu; whether the custom menu opens is decided by the enablement flag in the
//! [`Registry`](crate::registry::Registry).

use alloc::collections::BTreeMap;

use crate::dom::{Document, EventKind, ListenerId};
use crate::registry::TargetId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Attachment<E> {
    element: E,
    listener: ListenerId,
}

/// Retained context-menu listeners, keyed both ways.
#[derive(Clone, Debug)]
pub struct Interception<E> {
    by_target: BTreeMap<TargetId, Attachment<E>>,
    by_listener: BTreeMap<ListenerId, TargetId>,
}

impl<E> Default for Interception<E> {
    fn default() -> Self {
        Self {
            by_target: BTreeMap::new(),
            by_listener: BTreeMap::new(),
        }
    }
}

impl<E: Copy + Eq + core::fmt::Debug> Interception<E> {
    /// No attachments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capture-phase context-menu listener on `element` for `id`.
    ///
    /// An already attached target keeps its listener, which is returned.
    pub fn attach<D: Document<Element = E>>(
        &mut self,
        doc: &mut D,
        id: &str,
        element: E,
    ) -> ListenerId {
        if let Some(a) = self.by_target.get(id) {
            return a.listener;
        }
        let listener = doc.add_listener(element, EventKind::ContextMenu, true);
        self.by_target
            .insert(id.into(), Attachment { element, listener });
        self.by_listener.insert(listener, id.into());
        tracing::trace!(target_id = id, ?element, ?listener, "attach interception");
        listener
    }

    /// Remove the listener retained for `id`. Returns `false` if none was attached.
    pub fn detach<D: Document<Element = E>>(&mut self, doc: &mut D, id: &str) -> bool {
        let Some(a) = self.by_target.remove(id) else {
            return false;
        };
        self.by_listener.remove(&a.listener);
        doc.remove_listener(a.listener);
        tracing::trace!(target_id = id, listener = ?a.listener, "detach interception");
        true
    }

    /// Detach every target.
    pub fn detach_all<D: Document<Element = E>>(&mut self, doc: &mut D) {
        for (_, a) in core::mem::take(&mut self.by_target) {
            doc.remove_listener(a.listener);
        }
        self.by_listener.clear();
    }

    /// The target a fired listener belongs to.
    pub fn target_of(&self, listener: ListenerId) -> Option<&TargetId> {
        self.by_listener.get(&listener)
    }

    /// Whether `id` has a listener attached.
    pub fn is_attached(&self, id: &str) -> bool {
        self.by_target.contains_key(id)
    }

    /// The element `id` was attached to.
    pub fn element_of(&self, id: &str) -> Option<E> {
        self.by_target.get(id).map(|a| a.element)
    }
}
