// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu specifications: the typed [`MenuSpec`] and, with the `serde` feature, the declarative
//! [`MenuConfig`] that deserializes from JSON, TOML and friends.

use alloc::string::String;
use alloc::vec::Vec;

use crate::menu::{MenuItem, MenuSource};
use crate::target::TargetRef;

/// Everything [`ContextMenus::add_menu`](crate::menus::ContextMenus::add_menu) needs.
#[derive(Debug)]
pub struct MenuSpec<'a, E> {
    /// The menu; `None` is rejected with [`Error::MissingMenu`](crate::Error::MissingMenu).
    pub menu: Option<MenuSource<E>>,
    /// The element that opens the menu.
    pub target: TargetRef<'a, E>,
    /// Class for the menu element; see [`menu`](crate::menu) for the rules.
    pub style: Option<String>,
}

impl<'a, E> MenuSpec<'a, E> {
    /// A spec with the default class.
    pub fn new(menu: impl Into<MenuSource<E>>, target: impl Into<TargetRef<'a, E>>) -> Self {
        Self {
            menu: Some(menu.into()),
            target: target.into(),
            style: None,
        }
    }

    /// Use `style` as the menu's class.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// A declarative menu entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ItemConfig {
    /// Text content.
    pub text: String,
    /// Optional `id` attribute.
    pub id: Option<String>,
    /// Optional inline `style` attribute.
    pub style: Option<String>,
}

impl From<ItemConfig> for MenuItem {
    fn from(c: ItemConfig) -> Self {
        Self {
            text: c.text,
            id: c.id,
            style: c.style,
            on_click: None,
        }
    }
}

/// A declarative menu bound to a target identifier.
///
/// Item actions cannot be expressed declaratively; attach them after conversion by editing
/// the [`MenuItem`]s of the resulting spec.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct MenuConfig {
    /// Identifier of the target element.
    pub target: String,
    /// Entries, in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemConfig>,
    /// Optional class for the menu element.
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: Option<String>,
}

impl MenuConfig {
    /// Borrow this config as a [`MenuSpec`].
    pub fn to_spec<E>(&self) -> MenuSpec<'_, E> {
        MenuSpec {
            menu: Some(MenuSource::Items(
                self.items.iter().cloned().map(MenuItem::from).collect(),
            )),
            target: TargetRef::Id(&self.target),
            style: self.style.clone(),
        }
    }
}
