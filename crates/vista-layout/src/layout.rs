//! Layout Pass
//!
//! Top-down traversal over views that own boxes: each container passes its
//! principal box to its children as their containing block. The numeric
//! box-model arithmetic (widths, margins, line breaking) belongs to a later
//! stage; this pass only seeds each box's content rect from the view
//! geometry so consumers see where boxes sit.

use vista_view::{View, ViewId, ViewTree};

use crate::box_model::Rect;
use crate::box_tree::{BoxId, BoxTree};

impl BoxTree {
    /// Lay out `view` and its subtree; containers pass their principal box
    /// down as the containing block.
    pub fn lay_out(&mut self, tree: &ViewTree, view: ViewId, _containing_block: Option<BoxId>) {
        let Some(principal) = self.principal(view) else {
            return;
        };

        if let Some(v) = tree.get(view) {
            let rect = v.rect();
            if let Some(b) = self.get_mut(principal) {
                b.dimensions.content = Rect::new(
                    rect.left as f32,
                    rect.top as f32,
                    rect.width() as f32,
                    rect.height() as f32,
                );
            }
        }

        if tree.get(view).is_some_and(View::is_container) {
            let kids: Vec<ViewId> = tree.children(view).collect();
            for child in kids {
                if self.principal(child).is_some() {
                    self.lay_out(tree, child, Some(principal));
                }
            }
        }
    }
}
