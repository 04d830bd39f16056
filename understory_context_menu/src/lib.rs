// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_context_menu --heading-base-level=0

//! Understory Context Menu: per-element right-click menus over a DOM-like document.
//!
//! ## Overview
//!
//! Register target elements, each bound to a popup menu (a list of items or an existing
//! element). A right-click on a target suppresses the native menu and shows the bound one at
//! the pointer. At most one menu is visible at a time, and any click in the document
//! dismisses it.
//!
//! The crate does not talk to a browser. It drives a [`Document`](crate::dom::Document), a
//! small consumed interface for element lookup, tree edits, listener registration, position
//! and visibility. [`MemoryDocument`](crate::memory::MemoryDocument) implements it in memory
//! for tests, demos and headless hosts.
//!
//! ## Pieces
//!
//! - [`target`]: resolves an identifier or handle to a live, identified element.
//! - [`menu`]: builds the menu element from a [`MenuSource`].
//! - [`registry`]: target → binding map plus per-target enablement flags.
//! - [`display`]: the single visible-menu slot.
//! - [`intercept`]: capture-phase context-menu listeners, retained for exact detach.
//! - [`menus`]: the [`ContextMenus`] facade composing the above.
//!
//! ## Lifecycle of a target
//!
//! `Unregistered → Registered(enabled) ⇄ Registered(disabled) → Unregistered`
//!
//! - [`ContextMenus::add_menu`] registers and enables.
//! - [`ContextMenus::disable_target`] / [`ContextMenus::enable_target`] toggle display; the
//!   native menu stays suppressed either way.
//! - [`ContextMenus::remove_menu`] detaches, hides if visible, then unregisters.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_context_menu::dom::{Document, Event, EventKind};
//! use understory_context_menu::{ContextMenus, MemoryDocument, MenuItem, MenuSpec};
//!
//! let mut doc = MemoryDocument::new();
//! let pad = doc.create_with_id("div", "pad");
//! let mut menus = ContextMenus::new(doc);
//!
//! let binding = menus
//!     .add_menu(MenuSpec::new(vec![MenuItem::new("Copy"), MenuItem::new("Paste")], "#pad"))
//!     .unwrap();
//!
//! // Right-click on the target opens its menu at the pointer.
//! let ev = menus.dispatch(Event::new(EventKind::ContextMenu, pad, Point::new(50.0, 60.0)));
//! assert!(ev.default_prevented());
//! assert_eq!(menus.visible_menu(), Some(binding.menu));
//! assert_eq!(menus.document().position(binding.menu), Some(Point::new(50.0, 60.0)));
//!
//! // Any click in the document dismisses it.
//! let body = menus.document().body();
//! menus.dispatch(Event::new(EventKind::Click, body, Point::ZERO));
//! assert_eq!(menus.visible_menu(), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod display;
pub mod dom;
pub mod error;
pub mod intercept;
pub mod memory;
pub mod menu;
pub mod menus;
pub mod registry;
pub mod style;
pub mod target;

pub use config::{ItemConfig, MenuConfig, MenuSpec};
pub use error::Error;
pub use memory::{ElementId, MemoryDocument};
pub use menu::{ItemAction, ItemClick, MenuItem, MenuSource};
pub use menus::ContextMenus;
pub use registry::{Binding, TargetId};
pub use target::TargetRef;
