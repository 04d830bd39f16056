// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing facade.
//!
//! ## Overview
//!
//! [`ContextMenus`] owns a [`Document`] and composes the [target resolver](crate::target),
//! [menu builder](crate::menu), [`Registry`], [`Display`] and [`Interception`].
//! All state lives in the instance, so independent instances never interfere.
//!
//! ## Event delivery
//!
//! Every listener the instance registers is identified by a [`ListenerId`]. When one fires the
//! host calls [`ContextMenus::handle_event`] with that id. Documents implementing
//! [`EventRouting`] can be driven end to end with [`ContextMenus::dispatch`].
//!
//! - Context-menu listeners (capture phase, on targets) always prevent the default action and
//!   show the bound menu if the target is enabled.
//! - The outside-click listener (bubble phase, on the body) hides the visible menu.
//! - Item listeners (on built list items) run the item's action; an action returning
//!   [`Outcome::Stop`] keeps the click from reaching the body.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::vec::Vec;

use kurbo::Point;

use crate::config::MenuSpec;
use crate::display::Display;
use crate::dom::{Document, Event, EventKind, EventRouting, ListenerId, Outcome, Phase};
use crate::error::Error;
use crate::intercept::Interception;
use crate::menu::{self, ItemClick, ItemHandler};
use crate::registry::{Binding, Entry, Registry, TargetId};
use crate::style::DEFAULT_STYLE_SHEET;
use crate::target::{self, ResolvedTarget, TargetRef};

/// Per-element context menus over a [`Document`].
pub struct ContextMenus<D: Document> {
    doc: D,
    registry: Registry<D::Element>,
    display: Display<D::Element>,
    interception: Interception<D::Element>,
    items: BTreeMap<ListenerId, ItemHandler>,
    outside_click: ListenerId,
    style_sheet: D::Element,
}

impl<D: Document> core::fmt::Debug for ContextMenus<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContextMenus")
            .field("menus", &self.registry.len())
            .field("visible", &self.display.visible())
            .field("item_actions", &self.items.len())
            .field("outside_click", &self.outside_click)
            .finish_non_exhaustive()
    }
}

impl<D: Document> ContextMenus<D> {
    /// Take over `doc`: inject the default style sheet and listen for outside clicks.
    pub fn new(mut doc: D) -> Self {
        let style_sheet = doc.inject_style(DEFAULT_STYLE_SHEET);
        let body = doc.body();
        let outside_click = doc.add_listener(body, EventKind::Click, false);
        tracing::debug!(?outside_click, "context menus ready");
        Self {
            doc,
            registry: Registry::new(),
            display: Display::new(),
            interception: Interception::new(),
            items: BTreeMap::new(),
            outside_click,
            style_sheet,
        }
    }

    /// Like [`ContextMenus::new`], then add each spec in order.
    ///
    /// Fails with [`Error::Config`] when `specs` is empty or any spec is rejected; the message
    /// names the offending spec and the [`ContextMenus::add_menu`] error.
    pub fn with_menus<'a>(
        doc: D,
        specs: impl IntoIterator<Item = MenuSpec<'a, D::Element>>,
    ) -> Result<Self, Error>
    where
        D::Element: 'a,
    {
        let mut specs = specs.into_iter().peekable();
        if specs.peek().is_none() {
            return Err(Error::Config(
                "configuration must contain at least one menu".into(),
            ));
        }
        let mut menus = Self::new(doc);
        for (i, spec) in specs.enumerate() {
            menus
                .add_menu(spec)
                .map_err(|err| Error::Config(format!("menu {i}: {err}")))?;
        }
        Ok(menus)
    }

    /// Build a menu, bind it to its target and start intercepting right-clicks.
    ///
    /// Nothing is mutated unless every check passes. The new binding starts enabled.
    pub fn add_menu(&mut self, spec: MenuSpec<'_, D::Element>) -> Result<Binding<D::Element>, Error> {
        let MenuSpec {
            menu: source,
            target,
            style,
        } = spec;
        let source = source.ok_or(Error::MissingMenu)?;
        menu::validate(&self.doc, &source)?;
        let resolved = target::resolve(&self.doc, target)?;
        // Hiding the menu must not hide its own target.
        if source
            .element()
            .is_some_and(|el| menu::encloses(&self.doc, el, resolved.element))
        {
            return Err(Error::InvalidMenu);
        }
        if self.registry.contains(&resolved.id) {
            return Err(Error::DuplicateTarget(resolved.id));
        }

        let built = menu::build(&mut self.doc, source, style.as_deref());
        let binding = Binding {
            menu: built.element,
            target: resolved.element,
            style: built.style,
        };
        let mut item_listeners = Vec::with_capacity(built.handlers.len());
        for (listener, handler) in built.handlers {
            item_listeners.push(listener);
            self.items.insert(listener, handler);
        }
        self.registry.add(
            resolved.id.clone(),
            Entry {
                binding: binding.clone(),
                item_listeners,
            },
        )?;
        self.enable_resolved(&resolved);
        tracing::debug!(
            target_id = %resolved.id,
            menu = ?binding.menu,
            style = ?binding.style,
            "added context menu"
        );
        Ok(binding)
    }

    /// Unbind the menu of `target`.
    ///
    /// Interception is detached and the menu hidden before the binding goes away. With
    /// `delete_from_dom` the menu element and its items are removed from the document;
    /// otherwise the menu stays in place, hidden, for the caller to reuse.
    ///
    /// Targets whose element has since left the document, or whose identifier now names a
    /// different element, can still be removed by identifier.
    pub fn remove_menu<'a>(
        &mut self,
        target: impl Into<TargetRef<'a, D::Element>>,
        delete_from_dom: bool,
    ) -> Result<(), Error>
    where
        D::Element: 'a,
    {
        let id = self.bound_id(target.into())?;
        if self.remove_bound(&id, delete_from_dom) {
            Ok(())
        } else {
            Err(Error::UnknownTarget(id))
        }
    }

    /// Let right-clicks on `target` open its menu.
    ///
    /// Legal without a bound menu: the native menu is then suppressed and nothing is shown
    /// until a menu is added.
    pub fn enable_target<'a>(
        &mut self,
        target: impl Into<TargetRef<'a, D::Element>>,
    ) -> Result<D::Element, Error>
    where
        D::Element: 'a,
    {
        let resolved = target::resolve(&self.doc, target.into())?;
        self.enable_resolved(&resolved);
        tracing::debug!(target_id = %resolved.id, "enabled target");
        Ok(resolved.element)
    }

    /// Stop right-clicks on `target` from opening its menu.
    ///
    /// A bound target keeps suppressing the native menu. A target without a menu is released
    /// entirely.
    pub fn disable_target<'a>(
        &mut self,
        target: impl Into<TargetRef<'a, D::Element>>,
    ) -> Result<D::Element, Error>
    where
        D::Element: 'a,
    {
        let resolved = target::resolve(&self.doc, target.into())?;
        if self.registry.contains(&resolved.id) {
            self.registry.set_enabled(&resolved.id, false);
        } else {
            self.interception.detach(&mut self.doc, &resolved.id);
            self.registry.forget_flag(&resolved.id);
        }
        tracing::debug!(target_id = %resolved.id, "disabled target");
        Ok(resolved.element)
    }

    /// Remove every menu and interception.
    ///
    /// The outside-click listener and style sheet stay for the lifetime of the instance.
    pub fn clear_all(&mut self) {
        let ids: Vec<TargetId> = self.registry.ids().cloned().collect();
        for id in &ids {
            self.remove_bound(id, false);
        }
        self.interception.detach_all(&mut self.doc);
        self.registry.clear();
        self.display.hide(&mut self.doc);
        tracing::debug!(removed = ids.len(), "cleared context menus");
    }

    /// Show `menu` at `at`, hiding any other visible menu.
    pub fn show_menu_at(&mut self, menu: D::Element, at: Point) {
        self.display.show(&mut self.doc, menu, at);
    }

    /// Hide the visible menu, if any.
    pub fn hide_visible_menu(&mut self) {
        self.display.hide(&mut self.doc);
    }

    /// The currently shown menu.
    pub fn visible_menu(&self) -> Option<D::Element> {
        self.display.visible()
    }

    /// Handle one fired listener registered by this instance.
    ///
    /// The returned outcome has already been folded into `event`'s flags. Unknown listeners
    /// and mismatched event kinds are ignored.
    pub fn handle_event(&mut self, listener: ListenerId, event: &mut Event<D::Element>) -> Outcome {
        if listener == self.outside_click {
            if event.kind == EventKind::Click {
                self.display.hide(&mut self.doc);
            }
            return Outcome::Continue;
        }

        if let Some(id) = self.interception.target_of(listener) {
            if event.kind != EventKind::ContextMenu {
                return Outcome::Continue;
            }
            event.prevent_default();
            let menu = self
                .registry
                .get(id)
                .filter(|_| self.registry.is_enabled(id))
                .map(|b| b.menu);
            tracing::trace!(target_id = %id, opens = menu.is_some(), "intercepted context menu");
            if let Some(menu) = menu {
                self.display.show(&mut self.doc, menu, event.point);
            }
            return Outcome::Continue;
        }

        if let Some(handler) = self.items.get_mut(&listener) {
            if event.kind != EventKind::Click {
                return Outcome::Continue;
            }
            let click = ItemClick {
                index: handler.index,
                id: handler.id.clone(),
                point: event.point,
            };
            let outcome = (handler.action)(&click);
            event.apply(outcome);
            return outcome;
        }

        Outcome::Continue
    }

    /// The binding for identifier `id` (a leading `#` is ignored).
    pub fn binding(&self, id: &str) -> Option<&Binding<D::Element>> {
        self.registry.get(id.strip_prefix('#').unwrap_or(id))
    }

    /// Whether right-clicks on identifier `id` open a menu.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.registry.is_enabled(id.strip_prefix('#').unwrap_or(id))
    }

    /// Bound target identifiers in order.
    pub fn target_ids(&self) -> impl Iterator<Item = &TargetId> + '_ {
        self.registry.ids()
    }

    /// Number of bound menus.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no menus are bound.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The underlying document.
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// The underlying document, mutably.
    ///
    /// Changing visibility of bound menus directly bypasses the single-visible-menu rule.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// Tear down: remove every menu, the outside-click listener and the style sheet, and hand
    /// the document back.
    pub fn into_document(mut self) -> D {
        self.clear_all();
        self.doc.remove_listener(self.outside_click);
        self.doc.remove_style(self.style_sheet);
        tracing::debug!("context menus torn down");
        self.doc
    }

    fn enable_resolved(&mut self, resolved: &ResolvedTarget<D::Element>) {
        // The id may now name a different element than the one we listen on.
        if self
            .interception
            .element_of(&resolved.id)
            .is_some_and(|el| el != resolved.element)
        {
            self.interception.detach(&mut self.doc, &resolved.id);
        }
        self.interception
            .attach(&mut self.doc, &resolved.id, resolved.element);
        self.registry.set_enabled(&resolved.id, true);
    }

    /// The bound identifier `target` refers to.
    ///
    /// Identifiers are looked up in the registry directly and handles by the element bound at
    /// add time, so targets that were removed or replaced in the document can still be unbound.
    fn bound_id(&self, target: TargetRef<'_, D::Element>) -> Result<TargetId, Error> {
        let bound = match target {
            TargetRef::Id(raw) => {
                let id = raw.strip_prefix('#').unwrap_or(raw);
                self.registry.contains(id).then(|| TargetId::from(id))
            }
            TargetRef::Element(el) => self
                .registry
                .ids()
                .find(|id| self.registry.get(id).is_some_and(|b| b.target == el))
                .cloned(),
        };
        match bound {
            Some(id) => Ok(id),
            None => Err(Error::UnknownTarget(target::resolve(&self.doc, target)?.id)),
        }
    }

    fn remove_bound(&mut self, id: &str, delete_from_dom: bool) -> bool {
        let Some(menu) = self.registry.get(id).map(|b| b.menu) else {
            return false;
        };
        self.interception.detach(&mut self.doc, id);
        if self.display.visible() == Some(menu) {
            self.display.hide(&mut self.doc);
        }
        let Ok(entry) = self.registry.remove(id) else {
            return false;
        };
        for listener in entry.item_listeners {
            self.items.remove(&listener);
            self.doc.remove_listener(listener);
        }
        if delete_from_dom {
            self.doc.remove(entry.binding.menu);
        }
        tracing::debug!(target_id = id, ?menu, delete_from_dom, "removed context menu");
        true
    }
}

impl<D: EventRouting> ContextMenus<D> {
    /// Route `event` through the document and handle every listener it reaches.
    ///
    /// Stopping propagation lets the remaining listeners of the current node and phase run,
    /// then ends the walk. Returns the event with its final flags.
    pub fn dispatch(&mut self, mut event: Event<D::Element>) -> Event<D::Element> {
        let seq = self.doc.route(&event);
        let mut stopped_at: Option<(Phase, D::Element)> = None;
        for d in seq {
            if stopped_at.is_some_and(|at| at != (d.phase, d.node)) {
                break;
            }
            self.handle_event(d.listener, &mut event);
            if stopped_at.is_none() && event.propagation_stopped() {
                stopped_at = Some((d.phase, d.node));
            }
        }
        event
    }
}
