// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Document`] with capture → target → bubble event routing.
//!
//! ## Overview
//!
//! `MemoryDocument` is a small element tree (`html` → `head`, `body`) with attributes, text,
//! position, visibility and listener registrations. It backs the tests and demos and can
//! drive a headless host.
//!
//! ## Handles
//!
//! [`ElementId`] is generational: removing an element frees its slot, and reusing the slot
//! bumps the generation, so stale handles never alias a new element.
//!
//! ## Routing
//!
//! [`EventRouting::route`] walks the target's ancestry:
//! - Capture: root→parent, capture listeners only.
//! - Target: capture listeners, then the rest, in registration order.
//! - Bubble: parent→root, non-capture listeners only.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;

use crate::dom::{Dispatch, Document, Event, EventKind, EventRouting, ListenerId, Phase};

/// Identifier for an element in a [`MemoryDocument`] (slot index and generation).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(u32, u32);

impl ElementId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug)]
struct Registration {
    listener: ListenerId,
    kind: EventKind,
    capture: bool,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    position: Point,
    visible: bool,
    listeners: Vec<Registration>,
}

impl Node {
    fn new(generation: u32, tag: &str) -> Self {
        Self {
            generation,
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            position: Point::ZERO,
            visible: true,
            listeners: Vec::new(),
        }
    }
}

/// In-memory element tree.
pub struct MemoryDocument {
    /// Element slots; `None` once removed.
    nodes: Vec<Option<Node>>,
    /// Generation last handed out for each slot, kept after the slot is freed.
    generations: Vec<u32>,
    /// Freed slots awaiting reuse.
    free_list: Vec<usize>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
    next_listener: u64,
    listener_owner: BTreeMap<ListenerId, ElementId>,
}

impl core::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.element_count())
            .field("free_list", &self.free_list.len())
            .field("listeners", &self.listener_owner.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A document containing `html`, `head` and `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: ElementId(0, 0),
            head: ElementId(0, 0),
            body: ElementId(0, 0),
            next_listener: 1,
            listener_owner: BTreeMap::new(),
        };
        doc.root = doc.insert("html");
        doc.head = doc.insert("head");
        doc.body = doc.insert("body");
        doc.link(doc.root, doc.head, false);
        doc.link(doc.root, doc.body, false);
        doc
    }

    fn insert(&mut self, tag: &str) -> ElementId {
        let idx = match self.free_list.pop() {
            Some(idx) => idx,
            None => {
                self.nodes.push(None);
                self.generations.push(0);
                self.nodes.len() - 1
            }
        };
        // Reused slots continue from their last generation so old handles go stale.
        let generation = self.generations[idx].saturating_add(1);
        self.generations[idx] = generation;
        self.nodes[idx] = Some(Node::new(generation, tag));
        Self::handle(idx, generation)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "element slots are addressed with 32-bit indices"
    )]
    const fn handle(idx: usize, generation: u32) -> ElementId {
        ElementId(idx as u32, generation)
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(Option::as_ref)
            .filter(|n| n.generation == id.1)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())
            .and_then(Option::as_mut)
            .filter(|n| n.generation == id.1)
    }

    fn unlink(&mut self, id: ElementId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != id);
        }
    }

    fn link(&mut self, parent: ElementId, child: ElementId, front: bool) {
        if parent == child || self.is_ancestor(child, parent) {
            return;
        }
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.unlink(child);
        if let Some(p) = self.node_mut(parent) {
            if front {
                p.children.insert(0, child);
            } else {
                p.children.push(child);
            }
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Whether `a` is a strict ancestor of `b`.
    fn is_ancestor(&self, a: ElementId, b: ElementId) -> bool {
        let mut cur = self.parent_of(b);
        while let Some(p) = cur {
            if p == a {
                return true;
            }
            cur = self.parent_of(p);
        }
        false
    }

    /// Root→`target` path (inclusive); caller ensures acyclic ancestry.
    fn path_to(&self, target: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut cur = target;
        loop {
            out.push(cur);
            match self.parent_of(cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// Create an element with an `id` attribute and append it to the body.
    pub fn create_with_id(&mut self, tag: &str, id: &str) -> ElementId {
        let el = self.insert(tag);
        self.set_attribute(el, "id", id);
        self.link(self.body, el, false);
        el
    }

    /// The `html` element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The `head` element.
    pub fn head(&self) -> ElementId {
        self.head
    }

    /// Tag name of `el`.
    pub fn tag_of(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.tag.as_str())
    }

    /// Text content of `el`.
    pub fn text_of(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.text.as_str())
    }

    /// Attribute `name` of `el`.
    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.node(el)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Children of `el` in document order.
    pub fn children_of(&self, el: ElementId) -> &[ElementId] {
        self.node(el).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `el` is attached under the root.
    pub fn is_connected(&self, el: ElementId) -> bool {
        self.node(el).is_some() && (el == self.root || self.is_ancestor(self.root, el))
    }

    /// Whether `el` is in the shown state.
    pub fn is_visible(&self, el: ElementId) -> bool {
        self.node(el).is_some_and(|n| n.visible)
    }

    /// Top-left position of `el`.
    pub fn position(&self, el: ElementId) -> Option<Point> {
        self.node(el).map(|n| n.position)
    }

    /// Number of listeners registered on `el`.
    pub fn listener_count(&self, el: ElementId) -> usize {
        self.node(el).map_or(0, |n| n.listeners.len())
    }

    /// Number of live elements, skeleton included.
    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Total number of live listener registrations.
    pub fn total_listeners(&self) -> usize {
        self.listener_owner.len()
    }
}

impl Document for MemoryDocument {
    type Element = ElementId;

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, n)| {
                let n = n.as_ref()?;
                let el = Self::handle(idx, n.generation);
                (n.attributes.get("id").map(String::as_str) == Some(id)).then_some(el)
            })
            .find(|&el| self.is_connected(el))
    }

    fn id_of(&self, el: ElementId) -> Option<&str> {
        self.attribute(el, "id")
    }

    fn class_of(&self, el: ElementId) -> Option<&str> {
        self.attribute(el, "class")
    }

    fn contains(&self, el: ElementId) -> bool {
        self.node(el).is_some()
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.insert(tag)
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(n) = self.node_mut(el) {
            n.text = text.to_string();
        }
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(el) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.link(parent, child, false);
    }

    fn detach(&mut self, el: ElementId) {
        self.unlink(el);
    }

    fn remove(&mut self, el: ElementId) {
        // The skeleton is permanent.
        if self.node(el).is_none() || [self.root, self.head, self.body].contains(&el) {
            return;
        }
        self.unlink(el);
        let children = self.node(el).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        if let Some(node) = self.nodes[el.idx()].take() {
            for r in node.listeners {
                self.listener_owner.remove(&r.listener);
            }
        }
        self.free_list.push(el.idx());
    }

    fn parent_of(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(|n| n.parent)
    }

    fn add_listener(&mut self, el: ElementId, kind: EventKind, capture: bool) -> ListenerId {
        let listener = ListenerId::from_raw(self.next_listener);
        self.next_listener += 1;
        if let Some(n) = self.node_mut(el) {
            n.listeners.push(Registration {
                listener,
                kind,
                capture,
            });
            self.listener_owner.insert(listener, el);
        }
        listener
    }

    fn remove_listener(&mut self, listener: ListenerId) -> bool {
        let Some(el) = self.listener_owner.remove(&listener) else {
            return false;
        };
        if let Some(n) = self.node_mut(el) {
            n.listeners.retain(|r| r.listener != listener);
        }
        true
    }

    fn set_position(&mut self, el: ElementId, at: Point) {
        if let Some(n) = self.node_mut(el) {
            n.position = at;
        }
    }

    fn set_visible(&mut self, el: ElementId, visible: bool) {
        if let Some(n) = self.node_mut(el) {
            n.visible = visible;
        }
    }

    fn inject_style(&mut self, css: &str) -> ElementId {
        let sheet = self.insert("style");
        self.set_attribute(sheet, "type", "text/css");
        self.set_text(sheet, css);
        self.link(self.head, sheet, true);
        sheet
    }

    fn remove_style(&mut self, sheet: ElementId) {
        if self.tag_of(sheet) == Some("style") {
            self.remove(sheet);
        }
    }
}

impl EventRouting for MemoryDocument {
    fn route(&self, event: &Event<ElementId>) -> Vec<Dispatch<ElementId>> {
        if self.node(event.target).is_none() {
            return Vec::new();
        }
        let path = self.path_to(event.target);
        let Some((&target, ancestors)) = path.split_last() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut emit = |phase: Phase, node: ElementId, capture: bool| {
            let Some(n) = self.node(node) else {
                return;
            };
            for r in &n.listeners {
                if r.kind == event.kind && r.capture == capture {
                    out.push(Dispatch {
                        phase,
                        node,
                        listener: r.listener,
                    });
                }
            }
        };
        // Capture: root→parent
        for &n in ancestors {
            emit(Phase::Capture, n, true);
        }
        // Target: capture listeners first, then the rest
        emit(Phase::Target, target, true);
        emit(Phase::Target, target, false);
        // Bubble: parent→root
        for &n in ancestors.iter().rev() {
            emit(Phase::Bubble, n, false);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn skeleton_has_head_and_body() {
        let doc = MemoryDocument::new();
        assert_eq!(doc.children_of(doc.root()), &[doc.head(), doc.body()]);
        assert_eq!(doc.tag_of(doc.body()), Some("body"));
        assert!(doc.is_connected(doc.body()));
    }

    #[test]
    fn lookup_only_finds_connected_elements() {
        let mut doc = MemoryDocument::new();
        let pad = doc.create_with_id("div", "pad");
        assert_eq!(doc.element_by_id("pad"), Some(pad));
        doc.detach(pad);
        assert_eq!(doc.element_by_id("pad"), None);
        assert!(doc.contains(pad));
        let body = doc.body();
        doc.append_child(body, pad);
        assert_eq!(doc.element_by_id("pad"), Some(pad));
    }

    #[test]
    fn stale_handles_do_not_alias_reused_slots() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_with_id("div", "a");
        doc.remove(a);
        let b = doc.create_with_id("div", "b");
        assert_ne!(a, b);
        assert!(!doc.contains(a));
        assert!(doc.contains(b));
        assert_eq!(doc.id_of(a), None);
    }

    #[test]
    fn remove_drops_subtree_listeners() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_with_id("div", "a");
        let child = doc.create_element("span");
        doc.append_child(a, child);
        let l = doc.add_listener(child, EventKind::Click, false);
        doc.remove(a);
        assert!(!doc.contains(child));
        assert_eq!(doc.total_listeners(), 0);
        assert!(!doc.remove_listener(l));
    }

    #[test]
    fn removed_slots_are_reused_and_skeleton_stays() {
        let mut doc = MemoryDocument::new();
        let base = doc.element_count();
        for _ in 0..4 {
            let list = doc.create_element("ul");
            let item = doc.create_element("li");
            doc.append_child(list, item);
            doc.remove(list);
        }
        assert_eq!(doc.element_count(), base);
        assert_eq!(doc.nodes.len(), base + 2);

        let (root, body) = (doc.root(), doc.body());
        doc.remove(body);
        doc.remove(root);
        assert!(doc.contains(body));
        assert!(doc.is_connected(body));
    }

    #[test]
    fn append_refuses_cycles() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_with_id("div", "a");
        let b = doc.create_element("div");
        doc.append_child(a, b);
        doc.append_child(b, a);
        assert_eq!(doc.parent_of(b), Some(a));
        assert_eq!(doc.parent_of(a), Some(doc.body()));
    }

    #[test]
    fn styles_go_first_in_head() {
        let mut doc = MemoryDocument::new();
        let s1 = doc.inject_style("a {}");
        let s2 = doc.inject_style("b {}");
        assert_eq!(doc.children_of(doc.head()), &[s2, s1]);
        doc.remove_style(s1);
        assert_eq!(doc.children_of(doc.head()), &[s2]);
        let body = doc.body();
        doc.remove_style(body);
        assert!(doc.contains(body));
    }

    #[test]
    fn route_orders_capture_target_bubble() {
        let mut doc = MemoryDocument::new();
        let outer = doc.create_with_id("div", "outer");
        let inner = doc.create_element("span");
        doc.append_child(outer, inner);
        let body = doc.body();

        let body_bubble = doc.add_listener(body, EventKind::Click, false);
        let outer_capture = doc.add_listener(outer, EventKind::Click, true);
        let outer_bubble = doc.add_listener(outer, EventKind::Click, false);
        let inner_bubble = doc.add_listener(inner, EventKind::Click, false);
        let inner_capture = doc.add_listener(inner, EventKind::Click, true);
        let _other_kind = doc.add_listener(inner, EventKind::ContextMenu, true);

        let ev = Event::new(EventKind::Click, inner, Point::ZERO);
        let seq: Vec<(Phase, ListenerId)> =
            doc.route(&ev).iter().map(|d| (d.phase, d.listener)).collect();
        assert_eq!(
            seq,
            vec![
                (Phase::Capture, outer_capture),
                (Phase::Target, inner_capture),
                (Phase::Target, inner_bubble),
                (Phase::Bubble, outer_bubble),
                (Phase::Bubble, body_bubble),
            ]
        );
    }

    #[test]
    fn route_for_dead_target_is_empty() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_with_id("div", "a");
        let _ = doc.add_listener(a, EventKind::Click, false);
        doc.remove(a);
        assert!(doc.route(&Event::new(EventKind::Click, a, Point::ZERO)).is_empty());
    }
}
