//! Paint Contract & Damage Propagation
//!
//! Drawing itself lives in the backend; views only drive a scoped paint
//! context and forward damage rects to their ancestors.

use crate::geometry::IntRect;
use crate::tree::ViewTree;
use crate::{View, ViewId};

/// Scoped paint context supplied by the drawing backend.
pub trait PaintContext {
    fn save(&mut self);
    fn restore(&mut self);
    fn clip(&mut self, rect: IntRect);
    /// Whether any part of `rect` needs painting
    fn rect_visible(&self, rect: IntRect) -> bool;
    /// Make `view` the coordinate origin for subsequent calls
    fn map_view(&mut self, view: ViewId);
}

impl ViewTree {
    /// Paint `view` and, for containers, its visible children in link
    /// order (later children paint on top).
    pub fn paint(&self, view: ViewId, ctx: &mut dyn PaintContext) {
        let Some(v) = self.get(view) else { return };
        if !v.is_visible() {
            return;
        }
        let local = IntRect::of_size(v.rect().width(), v.rect().height());
        if local.is_empty() {
            return;
        }

        ctx.map_view(view);
        if !ctx.rect_visible(local) {
            return;
        }

        ctx.save();
        ctx.clip(local);
        if v.is_container() {
            for child in self.children(view) {
                if self.get(child).is_some_and(View::is_visible) {
                    self.paint(child, ctx);
                }
            }
        }
        ctx.restore();
    }

    /// Map a point from `view`-local coordinates to window coordinates
    pub fn view_to_window(&self, view: ViewId, x: i32, y: i32) -> (i32, i32) {
        let mut x = x;
        let mut y = y;
        let mut cur = Some(view);
        while let Some(id) = cur {
            let Some(v) = self.get(id) else { break };
            x += v.rect().left;
            y += v.rect().top;
            cur = v.parent();
        }
        (x, y)
    }

    /// Map a point from window coordinates into `view`-local coordinates
    pub fn window_to_view(&self, view: ViewId, x: i32, y: i32) -> (i32, i32) {
        let (dx, dy) = self.view_to_window(view, 0, 0);
        (x - dx, y - dy)
    }

    /// Request a repaint of the whole view
    pub fn update_view(&self, view: ViewId) {
        let Some(v) = self.get(view) else { return };
        let rect = IntRect::of_size(v.rect().width(), v.rect().height());
        self.update_view_rect(view, rect);
    }

    /// Request a repaint of `rect` (view-local coordinates).
    ///
    /// The damage is translated into each ancestor's space and clipped to
    /// the bounds it passes through; every ancestor container's hooks see
    /// the surviving rect.
    pub fn update_view_rect(&self, view: ViewId, rect: IntRect) {
        let Some(v) = self.get(view) else { return };
        let Some(parent) = v.parent() else { return };

        let moved = rect.offset(v.rect().left, v.rect().top);
        let Some(invalid) = moved.intersect(&v.rect()) else {
            return;
        };
        if let Some(hooks) = self.get(parent).and_then(View::container).and_then(|c| c.hooks.clone())
        {
            hooks.on_child_update_view(self, view, invalid);
        }
        self.update_view_rect(parent, invalid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ContainerHooks;
    use crate::flags::ViewFlags;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct LogContext {
        ops: RefCell<Vec<String>>,
    }

    impl PaintContext for LogContext {
        fn save(&mut self) {
            self.ops.borrow_mut().push("save".into());
        }
        fn restore(&mut self) {
            self.ops.borrow_mut().push("restore".into());
        }
        fn clip(&mut self, rect: IntRect) {
            self.ops.borrow_mut().push(format!("clip {}x{}", rect.width(), rect.height()));
        }
        fn rect_visible(&self, _rect: IntRect) -> bool {
            true
        }
        fn map_view(&mut self, view: ViewId) {
            self.ops.borrow_mut().push(format!("map {:?}", view));
        }
    }

    #[derive(Default)]
    struct DamageLog {
        rects: RefCell<Vec<IntRect>>,
    }

    impl ContainerHooks for DamageLog {
        fn on_child_update_view(&self, _tree: &ViewTree, _child: ViewId, invalid: IntRect) {
            self.rects.borrow_mut().push(invalid);
        }
    }

    #[test]
    fn test_paint_skips_hidden_and_empty() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        tree.get_mut(root).unwrap().set_rect(IntRect::new(0, 0, 100, 100));
        let hidden = tree.create_widget("", "", 1);
        let flat = tree.create_widget("", "", 2);
        let shown = tree.create_widget("", "", 3);
        tree.attach(hidden, root).unwrap();
        tree.attach(flat, root).unwrap();
        tree.attach(shown, root).unwrap();
        tree.set_flag(hidden, ViewFlags::VISIBLE, false);
        tree.get_mut(flat).unwrap().set_rect(IntRect::new(0, 0, 10, 0));
        tree.get_mut(shown).unwrap().set_rect(IntRect::new(0, 0, 10, 10));

        let mut ctx = LogContext::default();
        tree.paint(root, &mut ctx);

        let ops = ctx.ops.borrow();
        assert!(ops.iter().any(|op| op == &format!("map {:?}", shown)));
        assert!(!ops.iter().any(|op| op == &format!("map {:?}", hidden)));
        // zero-height child maps nothing and clips nothing
        assert!(!ops.iter().any(|op| op == &format!("map {:?}", flat)));
    }

    #[test]
    fn test_coordinate_round_trip() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        let panel = tree.create_container("", "", 1);
        let leaf = tree.create_widget("", "", 2);
        tree.attach(panel, root).unwrap();
        tree.attach(leaf, panel).unwrap();
        tree.get_mut(root).unwrap().set_rect(IntRect::new(0, 0, 500, 500));
        tree.get_mut(panel).unwrap().set_rect(IntRect::new(100, 50, 400, 300));
        tree.get_mut(leaf).unwrap().set_rect(IntRect::new(10, 20, 60, 70));

        let (wx, wy) = tree.view_to_window(leaf, 5, 5);
        assert_eq!((wx, wy), (115, 75));
        assert_eq!(tree.window_to_view(leaf, wx, wy), (5, 5));
    }

    #[test]
    fn test_damage_reaches_ancestors_clipped() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        let panel = tree.create_container("", "", 1);
        let leaf = tree.create_widget("", "", 2);
        tree.attach(panel, root).unwrap();
        tree.attach(leaf, panel).unwrap();
        tree.get_mut(root).unwrap().set_rect(IntRect::new(0, 0, 500, 500));
        tree.get_mut(panel).unwrap().set_rect(IntRect::new(100, 100, 200, 200));
        tree.get_mut(leaf).unwrap().set_rect(IntRect::new(50, 50, 150, 150));

        let panel_damage = Rc::new(DamageLog::default());
        let root_damage = Rc::new(DamageLog::default());
        tree.set_hooks(panel, panel_damage.clone()).unwrap();
        tree.set_hooks(root, root_damage.clone()).unwrap();

        tree.update_view(leaf);

        // panel sees the damage in its own coordinates
        assert_eq!(
            panel_damage.rects.borrow().as_slice(),
            &[IntRect::new(50, 50, 150, 150)]
        );
        // by the time it reaches root it is clipped to the panel bounds
        assert_eq!(
            root_damage.rects.borrow().as_slice(),
            &[IntRect::new(150, 150, 200, 200)]
        );
    }

    #[test]
    fn test_offscreen_damage_is_dropped() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        let leaf = tree.create_widget("", "", 1);
        tree.attach(leaf, root).unwrap();
        tree.get_mut(root).unwrap().set_rect(IntRect::new(0, 0, 100, 100));
        tree.get_mut(leaf).unwrap().set_rect(IntRect::new(0, 0, 50, 50));

        let damage = Rc::new(DamageLog::default());
        tree.set_hooks(root, damage.clone()).unwrap();

        // a rect entirely outside the leaf's bounds produces no damage
        tree.update_view_rect(leaf, IntRect::new(60, 60, 80, 80));
        assert!(damage.rects.borrow().is_empty());
    }
}
