// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display controller: the single visible-menu slot.
//!
//! Only [`Display::show`] and [`Display::hide`] mutate the slot, and `show` hides any other
//! menu first, so at most one menu is ever in the shown state.

use kurbo::Point;

use crate::dom::Document;

/// Owner of the visible-menu slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Display<E> {
    visible: Option<E>,
}

impl<E> Default for Display<E> {
    fn default() -> Self {
        Self { visible: None }
    }
}

impl<E: Copy + Eq + core::fmt::Debug> Display<E> {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently shown menu.
    pub fn visible(&self) -> Option<E> {
        self.visible
    }

    /// Show `menu` with its top-left corner at `at`.
    ///
    /// Showing the menu that is already visible only moves it.
    pub fn show<D: Document<Element = E>>(&mut self, doc: &mut D, menu: E, at: Point) {
        if self.visible.is_some_and(|v| v != menu) {
            self.hide(doc);
        }
        doc.set_position(menu, at);
        doc.set_visible(menu, true);
        tracing::trace!(?menu, x = at.x, y = at.y, "show context menu");
        self.visible = Some(menu);
    }

    /// Hide the visible menu, if any.
    pub fn hide<D: Document<Element = E>>(&mut self, doc: &mut D) {
        if let Some(menu) = self.visible.take() {
            doc.set_visible(menu, false);
            tracing::trace!(?menu, "hide context menu");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    #[test]
    fn show_positions_and_marks_visible() {
        let mut doc = MemoryDocument::new();
        let m = doc.create_with_id("ul", "m");
        let mut d = Display::new();
        d.show(&mut doc, m, Point::new(50.0, 60.0));
        assert_eq!(d.visible(), Some(m));
        assert!(doc.is_visible(m));
        assert_eq!(doc.position(m), Some(Point::new(50.0, 60.0)));
    }

    #[test]
    fn showing_another_menu_hides_the_first() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_with_id("ul", "a");
        let b = doc.create_with_id("ul", "b");
        let mut d = Display::new();
        d.show(&mut doc, a, Point::new(1.0, 1.0));
        d.show(&mut doc, b, Point::new(2.0, 2.0));
        assert_eq!(d.visible(), Some(b));
        assert!(!doc.is_visible(a));
        assert!(doc.is_visible(b));
    }

    #[test]
    fn reshow_same_menu_moves_it() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_with_id("ul", "a");
        let mut d = Display::new();
        d.show(&mut doc, a, Point::new(1.0, 1.0));
        d.show(&mut doc, a, Point::new(5.0, 7.0));
        assert_eq!(d.visible(), Some(a));
        assert!(doc.is_visible(a));
        assert_eq!(doc.position(a), Some(Point::new(5.0, 7.0)));
    }

    #[test]
    fn hide_is_a_noop_when_empty() {
        let mut doc = MemoryDocument::new();
        let a = doc.create_with_id("ul", "a");
        let mut d = Display::new();
        d.hide(&mut doc);
        assert_eq!(d.visible(), None);
        d.show(&mut doc, a, Point::ZERO);
        d.hide(&mut doc);
        d.hide(&mut doc);
        assert_eq!(d.visible(), None);
        assert!(!doc.is_visible(a));
    }

    // Any interleaving of shows and hides leaves at most one menu shown.
    #[test]
    fn at_most_one_visible_over_mixed_sequence() {
        let mut doc = MemoryDocument::new();
        let menus = [
            doc.create_with_id("ul", "a"),
            doc.create_with_id("ul", "b"),
            doc.create_with_id("ul", "c"),
        ];
        for m in menus {
            doc.set_visible(m, false);
        }
        let mut d = Display::new();
        let mut seed = 0x2545_f491_u32;
        for step in 0..200 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let pick = (seed % 4) as usize;
            if pick == 3 {
                d.hide(&mut doc);
            } else {
                d.show(&mut doc, menus[pick], Point::new(f64::from(step), 0.0));
            }
            let shown = menus.iter().filter(|m| doc.is_visible(**m)).count();
            assert!(shown <= 1, "step {step}: {shown} menus shown");
            assert_eq!(shown == 1, d.visible().is_some());
        }
    }
}
