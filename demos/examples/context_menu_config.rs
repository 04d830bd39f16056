// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative menus loaded from JSON.
//!
//! Run:
//! - `cargo run -p understory_context_menu_demos --example context_menu_config`

use kurbo::Point;
use understory_context_menu::dom::{Event, EventKind};
use understory_context_menu::{ContextMenus, MemoryDocument, MenuConfig};

const CONFIG: &str = r##"[
    { "target": "#editor", "items": [{ "text": "Undo" }, { "text": "Redo", "id": "redo" }] },
    { "target": "tree", "items": [{ "text": "Rename" }, { "text": "Delete", "style": "color: red" }], "style": "tree-menu" }
]"##;

fn main() {
    let configs: Vec<MenuConfig> = serde_json::from_str(CONFIG).expect("valid config");

    let mut doc = MemoryDocument::new();
    let editor = doc.create_with_id("div", "editor");
    let tree = doc.create_with_id("ul", "tree");

    let mut menus = ContextMenus::with_menus(doc, configs.iter().map(MenuConfig::to_spec))
        .expect("targets exist");
    for id in menus.target_ids() {
        println!("{id}: {:?}", menus.binding(id));
    }

    for (label, at) in [("editor", editor), ("tree", tree)] {
        menus.dispatch(Event::new(EventKind::ContextMenu, at, Point::new(100.0, 40.0)));
        println!("right-click {label}: visible={:?}", menus.visible_menu());
    }

    match ContextMenus::with_menus(MemoryDocument::new(), configs.iter().map(MenuConfig::to_spec)) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("without targets: {err}"),
    }
}
