// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The DOM surface consumed by the context menu core.
//!
//! ## Overview
//!
//! The core never talks to a browser directly. It drives a [`Document`]: element lookup by
//! identifier, tree edits for building menus, listener registration with capture support,
//! and the two visual mutations the display needs (position and visibility).
//!
//! Listeners are registered as data, not closures. A document hands out a [`ListenerId`]
//! per registration and the host delivers each fired listener back to
//! [`ContextMenus::handle_event`](crate::menus::ContextMenus::handle_event).
//! Detaching removes exactly the id retained at attach time.
//!
//! Documents that can compute propagation themselves (such as
//! [`MemoryDocument`](crate::memory::MemoryDocument)) also implement [`EventRouting`],
//! which emits the capture → target → bubble sequence of listeners for an event.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Point;

/// Kinds of events the core listens for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// Secondary-button press that would open the native context menu.
    ContextMenu,
    /// Primary-button click.
    Click,
}

/// Phases of event propagation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal; only capture listeners fire.
    Capture,
    /// Target node; capture listeners fire first, then the others.
    Target,
    /// Target-to-root traversal; only non-capture listeners fire.
    Bubble,
}

/// Handler outcome controlling propagation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Keep propagating.
    Continue,
    /// Stop propagation after the listeners of the current node.
    Stop,
    /// Stop propagation and prevent the default action.
    StopAndConsume,
}

/// Handle for a single listener registration.
///
/// Documents mint these; the core only stores and compares them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a document-specific raw listener handle.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle the document minted.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

bitflags::bitflags! {
    /// Per-event state toggled by handlers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// The default action (for example the native context menu) is suppressed.
        const DEFAULT_PREVENTED    = 0b0000_0001;
        /// No further nodes receive the event.
        const PROPAGATION_STOPPED  = 0b0000_0010;
    }
}

/// A pointer event as delivered to listeners.
#[derive(Clone, Debug)]
pub struct Event<E> {
    /// What happened.
    pub kind: EventKind,
    /// The innermost element under the pointer.
    pub target: E,
    /// Pointer position in absolute page coordinates.
    pub point: Point,
    /// Default/propagation state.
    pub flags: EventFlags,
}

impl<E> Event<E> {
    /// A fresh event with no flags set.
    pub fn new(kind: EventKind, target: E, point: Point) -> Self {
        Self {
            kind,
            target,
            point,
            flags: EventFlags::empty(),
        }
    }

    /// Suppress the default action.
    pub fn prevent_default(&mut self) {
        self.flags.insert(EventFlags::DEFAULT_PREVENTED);
    }

    /// Whether the default action was suppressed.
    pub fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }

    /// Stop propagation past the current node.
    pub fn stop_propagation(&mut self) {
        self.flags.insert(EventFlags::PROPAGATION_STOPPED);
    }

    /// Whether propagation was stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.flags.contains(EventFlags::PROPAGATION_STOPPED)
    }

    /// Fold a handler outcome into the event flags.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Continue => {}
            Outcome::Stop => self.stop_propagation(),
            Outcome::StopAndConsume => {
                self.stop_propagation();
                self.prevent_default();
            }
        }
    }
}

/// A DOM-like environment.
///
/// Element handles are small copyable keys. Operations on handles that are no longer live
/// are ignored by implementations; lookups return `None`.
pub trait Document {
    /// Element handle type.
    type Element: Copy + Eq + Hash + Debug;

    /// Look up a live element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// The `id` attribute of `el`, if any.
    fn id_of(&self, el: Self::Element) -> Option<&str>;

    /// The `class` attribute of `el`, if any.
    fn class_of(&self, el: Self::Element) -> Option<&str>;

    /// Whether `el` still refers to a live element.
    fn contains(&self, el: Self::Element) -> bool;

    /// The document body; menus are appended here.
    fn body(&self) -> Self::Element;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> Self::Element;

    /// Replace the text content of `el`.
    fn set_text(&mut self, el: Self::Element, text: &str);

    /// Set an attribute (`id`, `class`, `style`, ...).
    fn set_attribute(&mut self, el: Self::Element, name: &str, value: &str);

    /// Append `child` as the last child of `parent`, moving it if already attached.
    fn append_child(&mut self, parent: Self::Element, child: Self::Element);

    /// Remove `el` from its parent. The element stays alive and may be re-appended.
    fn detach(&mut self, el: Self::Element);

    /// Remove `el` and its subtree for good, dropping their listeners.
    ///
    /// Handles to removed elements stop being live.
    fn remove(&mut self, el: Self::Element);

    /// Parent of `el`, or `None` for detached elements and the document root.
    fn parent_of(&self, el: Self::Element) -> Option<Self::Element>;

    /// Register a listener for `kind` on `el`.
    fn add_listener(&mut self, el: Self::Element, kind: EventKind, capture: bool) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn remove_listener(&mut self, listener: ListenerId) -> bool;

    /// Move the top-left corner of `el` to `at` (absolute, unclamped).
    fn set_position(&mut self, el: Self::Element, at: Point);

    /// Show or hide `el`.
    fn set_visible(&mut self, el: Self::Element, visible: bool);

    /// Inject a style sheet at the front of the document head.
    fn inject_style(&mut self, css: &str) -> Self::Element;

    /// Remove a style sheet previously returned by [`Document::inject_style`].
    fn remove_style(&mut self, sheet: Self::Element);
}

/// A single listener invocation in propagation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<E> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node the listener is registered on.
    pub node: E,
    /// The listener to invoke.
    pub listener: ListenerId,
}

/// Documents that compute event propagation themselves.
pub trait EventRouting: Document {
    /// Listeners that `event` reaches, in capture → target → bubble order.
    fn route(&self, event: &Event<Self::Element>) -> Vec<Dispatch<Self::Element>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_folds_into_flags() {
        let mut ev = Event::new(EventKind::Click, 1_u32, Point::ZERO);
        ev.apply(Outcome::Continue);
        assert_eq!(ev.flags, EventFlags::empty());
        ev.apply(Outcome::Stop);
        assert!(ev.propagation_stopped());
        assert!(!ev.default_prevented());

        let mut ev = Event::new(EventKind::ContextMenu, 1_u32, Point::ZERO);
        ev.apply(Outcome::StopAndConsume);
        assert!(ev.propagation_stopped());
        assert!(ev.default_prevented());
    }

    #[test]
    fn listener_id_round_trips_raw() {
        let id = ListenerId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert!(ListenerId::from_raw(1) < ListenerId::from_raw(2));
    }
}
