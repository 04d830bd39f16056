// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu builder: turn a [`MenuSource`] into a hidden menu element under the document body.
//!
//! ## Sources
//!
//! - [`MenuSource::Element`]: an existing element. It is moved under the body and hidden.
//! - [`MenuSource::Items`]: a list of [`MenuItem`]s. A `ul` with one `li` per item is built,
//!   and items with an action get a click listener.
//!
//! ## Class
//!
//! `None` applies [`DEFAULT_CLASS`](crate::style::DEFAULT_CLASS). `Some("")` leaves whatever
//! class the element already has. Any other string replaces the class.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;

use crate::dom::{Document, EventKind, ListenerId, Outcome};
use crate::error::Error;
use crate::style::DEFAULT_CLASS;

/// Details handed to an item action when its item is clicked.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemClick {
    /// Position of the item within its menu.
    pub index: usize,
    /// The item's `id` attribute, if it was given one.
    pub id: Option<String>,
    /// Pointer position of the click.
    pub point: Point,
}

/// Callback run when a built item is clicked.
///
/// Returning [`Outcome::Stop`] keeps the click from reaching the document, so the menu stays
/// open.
pub type ItemAction = Box<dyn FnMut(&ItemClick) -> Outcome>;

/// A declarative menu entry.
#[derive(Default)]
pub struct MenuItem {
    /// Text content of the entry.
    pub text: String,
    /// Optional `id` attribute.
    pub id: Option<String>,
    /// Optional inline `style` attribute.
    pub style: Option<String>,
    /// Optional click action.
    pub on_click: Option<ItemAction>,
}

impl core::fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuItem")
            .field("text", &self.text)
            .field("id", &self.id)
            .field("style", &self.style)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl MenuItem {
    /// An entry showing `text` with no action.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the inline `style` attribute.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Run `action` when the entry is clicked.
    #[must_use]
    pub fn on_click(mut self, action: impl FnMut(&ItemClick) -> Outcome + 'static) -> Self {
        self.on_click = Some(Box::new(action));
        self
    }
}

/// Where a menu's element comes from.
#[derive(Debug)]
pub enum MenuSource<E> {
    /// An existing element, owned by the caller.
    Element(E),
    /// Entries to build a list from.
    Items(Vec<MenuItem>),
}

impl<E: Copy> MenuSource<E> {
    /// The existing element, for [`MenuSource::Element`].
    pub fn element(&self) -> Option<E> {
        match self {
            Self::Element(el) => Some(*el),
            Self::Items(_) => None,
        }
    }
}

impl<E> From<Vec<MenuItem>> for MenuSource<E> {
    fn from(items: Vec<MenuItem>) -> Self {
        Self::Items(items)
    }
}

/// A registered item action with what it reports on click.
pub(crate) struct ItemHandler {
    pub(crate) index: usize,
    pub(crate) id: Option<String>,
    pub(crate) action: ItemAction,
}

impl core::fmt::Debug for ItemHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemHandler")
            .field("index", &self.index)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Output of [`build`].
#[derive(Debug)]
pub(crate) struct BuiltMenu<E> {
    pub(crate) element: E,
    pub(crate) style: Option<String>,
    pub(crate) handlers: Vec<(ListenerId, ItemHandler)>,
}

/// Check `source` without touching the document.
///
/// An element menu must be live and must not be the body or one of its ancestors, since
/// building hides it.
pub(crate) fn validate<D: Document>(doc: &D, source: &MenuSource<D::Element>) -> Result<(), Error> {
    match source {
        MenuSource::Items(items) if items.is_empty() => Err(Error::MissingMenu),
        MenuSource::Items(_) => Ok(()),
        MenuSource::Element(el) if doc.contains(*el) && !encloses(doc, *el, doc.body()) => Ok(()),
        MenuSource::Element(_) => Err(Error::InvalidMenu),
    }
}

/// Whether `el` is `node` or one of its ancestors.
pub(crate) fn encloses<D: Document>(doc: &D, el: D::Element, node: D::Element) -> bool {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if n == el {
            return true;
        }
        cur = doc.parent_of(n);
    }
    false
}

/// Build the menu element, append it to the body, hide it and apply the class.
///
/// Expects a source that passed [`validate`].
pub(crate) fn build<D: Document>(
    doc: &mut D,
    source: MenuSource<D::Element>,
    style: Option<&str>,
) -> BuiltMenu<D::Element> {
    let mut handlers = Vec::new();
    let element = match source {
        MenuSource::Element(el) => el,
        MenuSource::Items(items) => {
            let list = doc.create_element("ul");
            for (index, item) in items.into_iter().enumerate() {
                let li = doc.create_element("li");
                doc.set_text(li, &item.text);
                if let Some(style) = &item.style {
                    doc.set_attribute(li, "style", style);
                }
                if let Some(id) = &item.id {
                    doc.set_attribute(li, "id", id);
                }
                if let Some(action) = item.on_click {
                    let listener = doc.add_listener(li, EventKind::Click, false);
                    handlers.push((
                        listener,
                        ItemHandler {
                            index,
                            id: item.id,
                            action,
                        },
                    ));
                }
                doc.append_child(list, li);
            }
            list
        }
    };

    let body = doc.body();
    doc.append_child(body, element);
    doc.set_visible(element, false);

    match style {
        None => doc.set_attribute(element, "class", DEFAULT_CLASS),
        Some("") => {}
        Some(class) => doc.set_attribute(element, "class", class),
    }
    let style = doc.class_of(element).map(ToString::to_string);

    BuiltMenu {
        element,
        style,
        handlers,
    }
}
