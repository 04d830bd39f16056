// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context menu basics.
//!
//! Binds a two-item menu to `#pad`, right-clicks it, picks an item, and shows the menu being
//! dismissed by the click.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_context_menu_demos --example context_menu_basics`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_context_menu::dom::{Document, Event, EventKind, Outcome};
use understory_context_menu::{ContextMenus, MemoryDocument, MenuItem, MenuSpec};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = MemoryDocument::new();
    let pad = doc.create_with_id("textarea", "pad");
    let mut menus = ContextMenus::new(doc);

    let binding = menus
        .add_menu(MenuSpec::new(
            vec![
                MenuItem::new("Copy").on_click(|c| {
                    println!("  clicked item {} at {:?}", c.index, c.point);
                    Outcome::Continue
                }),
                MenuItem::new("Paste").with_id("paste"),
            ],
            "#pad",
        ))
        .expect("pad exists");
    println!("== Bound ==\n  {binding:?}");

    let ev = menus.dispatch(Event::new(
        EventKind::ContextMenu,
        pad,
        Point::new(50.0, 60.0),
    ));
    println!("== Right-click on #pad ==");
    println!("  native menu suppressed: {}", ev.default_prevented());
    println!(
        "  visible: {:?} at {:?}",
        menus.visible_menu(),
        menus.document().position(binding.menu)
    );

    let copy = menus.document().children_of(binding.menu)[0];
    menus.dispatch(Event::new(EventKind::Click, copy, Point::new(55.0, 70.0)));
    println!("== Click on \"Copy\" ==");
    println!("  visible: {:?}", menus.visible_menu());

    let body = menus.document().body();
    menus.dispatch(Event::new(EventKind::ContextMenu, body, Point::ZERO));
    println!("== Right-click on body (no menu bound) ==");
    println!("  visible: {:?}", menus.visible_menu());
}
