//! Stacking Contexts
//!
//! An independent walk after box generation. A child spawns a nested
//! context iff it is positioned and either carries an explicit z-index or
//! is fixed; every other descendant accumulates into the nearest ancestor
//! context. The result orders overlapping boxes for paint.

use vista_view::{View, ViewId, ViewTree};

use crate::box_tree::BoxTree;

/// One node of the paint-order tree
#[derive(Debug, Clone, PartialEq)]
pub struct StackingContext {
    /// Spawning view; the root context belongs to the tree root
    pub view: Option<ViewId>,
    pub z_index: i32,
    pub opacity: f32,
    pub children: Vec<StackingContext>,
}

impl StackingContext {
    fn new(view: ViewId, z_index: i32, opacity: f32) -> Self {
        Self {
            view: Some(view),
            z_index,
            opacity,
            children: Vec::new(),
        }
    }

    /// Build the stacking tree for everything below `root`
    pub fn build(tree: &ViewTree, boxes: &BoxTree, root: ViewId) -> StackingContext {
        let mut ctx = StackingContext::new(root, 0, 1.0);
        collect(tree, boxes, root, &mut ctx);
        sort_by_level(&mut ctx);
        ctx
    }
}

fn collect(tree: &ViewTree, boxes: &BoxTree, container: ViewId, ctx: &mut StackingContext) {
    for child in tree.children(container) {
        // views without a principal box paint nothing
        if boxes.principal(child).is_none() {
            continue;
        }
        let Some(style) = tree.get(child).and_then(View::computed_style) else {
            continue;
        };

        let spawns = style.is_positioned() && (style.z_index().is_some() || style.is_fixed());
        let is_container = tree.get(child).is_some_and(View::is_container);

        if spawns {
            let mut nested =
                StackingContext::new(child, style.z_index().unwrap_or(0), style.opacity());
            if is_container {
                collect(tree, boxes, child, &mut nested);
            }
            ctx.children.push(nested);
        } else if is_container {
            collect(tree, boxes, child, ctx);
        }
    }
}

fn sort_by_level(ctx: &mut StackingContext) {
    ctx.children.sort_by_key(|c| c.z_index);
    for child in &mut ctx.children {
        sort_by_level(child);
    }
}
