// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target lifecycle: add, disable, enable, remove, re-add, clear.
//!
//! Run:
//! - `cargo run -p understory_context_menu_demos --example context_menu_lifecycle`

use kurbo::Point;
use understory_context_menu::dom::{Event, EventKind};
use understory_context_menu::{
    ContextMenus, ElementId, MemoryDocument, MenuItem, MenuSource, MenuSpec, TargetRef,
};

fn right_click(menus: &mut ContextMenus<MemoryDocument>, at: ElementId, label: &str) {
    let ev = menus.dispatch(Event::new(EventKind::ContextMenu, at, Point::new(10.0, 10.0)));
    println!(
        "  right-click {label:<8} suppressed={:<5} visible={:?}",
        ev.default_prevented(),
        menus.visible_menu()
    );
}

fn main() {
    let mut doc = MemoryDocument::new();
    let pad = doc.create_with_id("div", "pad");
    let side = doc.create_with_id("div", "side");
    // A caller-owned menu element, reused across bindings.
    let owned = doc.create_with_id("div", "owned-menu");
    let mut menus = ContextMenus::new(doc);

    println!("== Add ==");
    menus
        .add_menu(MenuSpec::new(vec![MenuItem::new("Cut")], "pad"))
        .expect("pad exists");
    menus
        .add_menu(MenuSpec::new(MenuSource::Element(owned), TargetRef::Element(side)).with_style(""))
        .expect("side exists");
    right_click(&mut menus, pad, "#pad");
    right_click(&mut menus, side, "#side");

    println!("== Duplicate ==");
    let err = menus
        .add_menu(MenuSpec::new(vec![MenuItem::new("Again")], "pad"))
        .unwrap_err();
    println!("  {err}");

    println!("== Disable #pad ==");
    menus.disable_target("pad").expect("pad exists");
    menus.hide_visible_menu();
    right_click(&mut menus, pad, "#pad");

    println!("== Enable #pad ==");
    menus.enable_target("pad").expect("pad exists");
    right_click(&mut menus, pad, "#pad");

    println!("== Remove #side (menu element kept) ==");
    menus.remove_menu("side", false).expect("side is bound");
    right_click(&mut menus, side, "#side");
    println!(
        "  owned menu still attached: {}",
        menus.document().is_connected(owned)
    );

    println!("== Re-add #side ==");
    menus
        .add_menu(MenuSpec::new(MenuSource::Element(owned), "side"))
        .expect("side is free again");
    right_click(&mut menus, side, "#side");

    println!("== Clear ==");
    menus.clear_all();
    right_click(&mut menus, pad, "#pad");
    println!("  menus left: {}", menus.len());

    let doc = menus.into_document();
    println!("== Torn down ==\n  {doc:?}");
}
