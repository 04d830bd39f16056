// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of target → menu bindings and per-target enablement flags.
//!
//! ## Semantics
//!
//! - Keys are exactly the currently bound target identifiers.
//! - Enablement flags are stored separately, so a target can be enabled before (or without)
//!   having a menu. Removing a binding also forgets its flag.
//! - Iteration order is the identifier order, which keeps teardown deterministic.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::dom::ListenerId;
use crate::error::Error;

/// Identifier of a target element (its `id` attribute).
pub type TargetId = String;

/// The association between a target and its popup menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding<E> {
    /// The popup menu element.
    pub menu: E,
    /// The element that opens the menu on right-click.
    pub target: E,
    /// The class the menu element carries, if any.
    pub style: Option<String>,
}

/// A stored binding plus the item listeners the menu builder registered for it.
#[derive(Clone, Debug)]
pub struct Entry<E> {
    /// The binding handed back to callers.
    pub binding: Binding<E>,
    /// Click listeners on built list items, removed together with the binding.
    pub item_listeners: Vec<ListenerId>,
}

/// Target → binding map with enablement flags.
#[derive(Clone, Debug)]
pub struct Registry<E> {
    entries: BTreeMap<TargetId, Entry<E>>,
    enabled: BTreeMap<TargetId, bool>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Registry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            enabled: BTreeMap::new(),
        }
    }

    /// Bind `entry` to `id`.
    ///
    /// Fails with [`Error::DuplicateTarget`] if `id` is already bound; the existing entry is
    /// left untouched. The enablement flag is not changed.
    pub fn add(&mut self, id: TargetId, entry: Entry<E>) -> Result<(), Error> {
        if self.entries.contains_key(&id) {
            return Err(Error::DuplicateTarget(id));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// The binding for `id`, if bound.
    pub fn get(&self, id: &str) -> Option<&Binding<E>> {
        self.entries.get(id).map(|e| &e.binding)
    }

    /// Whether `id` is bound.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Remove the binding for `id` together with its flag.
    ///
    /// Callers detach interception and hide the menu before removing, so no visible-menu
    /// reference outlives the entry.
    pub fn remove(&mut self, id: &str) -> Result<Entry<E>, Error> {
        let entry = self
            .entries
            .remove(id)
            .ok_or_else(|| Error::UnknownTarget(id.into()))?;
        self.enabled.remove(id);
        Ok(entry)
    }

    /// Set the enablement flag for `id`, bound or not.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(flag) = self.enabled.get_mut(id) {
            *flag = enabled;
        } else {
            self.enabled.insert(id.into(), enabled);
        }
    }

    /// Forget the enablement flag for `id`.
    pub fn forget_flag(&mut self, id: &str) {
        self.enabled.remove(id);
    }

    /// Whether right-clicks on `id` should open its menu.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.get(id).copied().unwrap_or(false)
    }

    /// Bound identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &TargetId> + '_ {
        self.entries.keys()
    }

    /// Number of bound targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every binding and flag.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.enabled.clear();
    }
}
