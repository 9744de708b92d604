//! Toolkit Facade
//!
//! Owns the view tree, the rule list and the generated box tree, and runs
//! the restyle/reflow pipeline over them.

use std::rc::Rc;

use vista_layout::{BoxTree, StackingContext};
use vista_style::DeclaredStyle;
use vista_view::{Selector, ViewTree};

struct StyleRule {
    style: Rc<DeclaredStyle>,
    selector: Box<dyn Selector>,
}

/// The assembled toolkit core
#[derive(Default)]
pub struct Toolkit {
    tree: ViewTree,
    boxes: BoxTree,
    rules: Vec<StyleRule>,
    stacking: Option<StackingContext>,
}

impl Toolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn boxes(&self) -> &BoxTree {
        &self.boxes
    }

    /// The paint-order tree of the last refresh
    pub fn stacking(&self) -> Option<&StackingContext> {
        self.stacking.as_ref()
    }

    /// Register a style rule
    pub fn add_rule(&mut self, style: DeclaredStyle, selector: impl Selector + 'static) {
        self.rules.push(StyleRule {
            style: Rc::new(style),
            selector: Box::new(selector),
        });
    }

    /// Route every registered rule into the matching views' buckets.
    ///
    /// Call again after structural changes; buckets are rebuilt from
    /// scratch.
    pub fn apply_styles(&mut self) {
        let Some(root) = self.tree.root() else {
            tracing::warn!("no root view; styles not applied");
            return;
        };
        self.tree.reset_styles(root);
        for rule in &self.rules {
            self.tree.apply_style(root, &rule.style, rule.selector.as_ref());
        }
    }

    /// Resolve the cascade and rebuild boxes, stacking contexts and layout
    pub fn refresh(&mut self) {
        let Some(root) = self.tree.root() else {
            tracing::warn!("no root view; nothing to refresh");
            return;
        };
        tracing::info!("refreshing styles and layout");

        self.tree.compute_styles(root);
        self.boxes.build(&self.tree, root);
        self.stacking = Some(StackingContext::build(&self.tree, &self.boxes, root));
        self.boxes.lay_out(&self.tree, root, None);
    }
}
