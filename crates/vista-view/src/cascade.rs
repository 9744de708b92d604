//! Cascade Drive
//!
//! Routes matched declarations into per-view buckets and resolves computed
//! styles strictly top-down, parent before child. The selector engine stays
//! external: it is consumed through the `Selector` contract and the
//! `SelectorMatch` result it returns.

use std::rc::Rc;

use vista_style::{AbsoluteContext, ComputedStyle, DeclaredStyle, SelectorMatch};

use crate::tree::ViewTree;
use crate::{View, ViewId};

/// External selector-matching contract.
///
/// `Static` matches hold until the tree structure changes; `Dynamic`
/// matches depend on hover/focus/... state.
pub trait Selector {
    fn matches(&self, tree: &ViewTree, view: ViewId) -> SelectorMatch;
}

impl ViewTree {
    /// Offer one declaration map to `view` and its subtree.
    ///
    /// Children are visited before the view itself; a match lands in the
    /// static or dynamic bucket with the specificity the selector reported.
    pub fn apply_style(&mut self, view: ViewId, style: &Rc<DeclaredStyle>, selector: &dyn Selector) {
        let kids: Vec<ViewId> = self.children(view).collect();
        for child in kids {
            self.apply_style(child, style, selector);
        }

        match selector.matches(self, view) {
            SelectorMatch::Static(specificity) => {
                if let Some(v) = self.get_mut(view) {
                    v.decl_static.append(style.clone(), specificity);
                }
            }
            SelectorMatch::Dynamic(specificity) => {
                if let Some(v) = self.get_mut(view) {
                    v.decl_dynamic.append(style.clone(), specificity);
                }
            }
            SelectorMatch::None => {}
        }
    }

    /// Drop all matched declarations below and including `view`
    pub fn reset_styles(&mut self, view: ViewId) {
        if let Some(v) = self.get_mut(view) {
            v.decl_static.clear();
            v.decl_dynamic.clear();
        }
        let kids: Vec<ViewId> = self.children(view).collect();
        for child in kids {
            self.reset_styles(child);
        }
    }

    /// Resolve computed styles for `view` and its subtree, top-down.
    ///
    /// Each snapshot is rebuilt wholesale; the previous one is discarded.
    pub fn compute_styles(&mut self, view: ViewId) {
        self.compute_style_one(view);
        let kids: Vec<ViewId> = self.children(view).collect();
        for child in kids {
            self.compute_styles(child);
        }
    }

    fn compute_style_one(&mut self, view: ViewId) {
        let parent = self.parent_of(view);
        let parent_style: Option<ComputedStyle> =
            parent.and_then(|p| self.get(p).and_then(|v| v.computed_style().cloned()));
        if parent.is_some() && parent_style.is_none() {
            // usage-ordering violation: resolution must run parent first
            tracing::warn!("parent style unresolved before child; inheritance skipped");
        }

        let root_font_size = self
            .root()
            .filter(|&r| r != view)
            .and_then(|r| self.get(r))
            .and_then(|v| v.computed_style())
            .map(ComputedStyle::font_size)
            .unwrap_or(16.0);

        let Some(v) = self.get(view) else { return };
        let mut computed = ComputedStyle::resolve(&v.decl_static, parent_style.as_ref());
        let ctx = AbsoluteContext {
            font_size: parent_style
                .as_ref()
                .map(ComputedStyle::font_size)
                .unwrap_or(16.0),
            root_font_size,
        };
        computed.make_absolute(&ctx);
        computed.validate();

        if let Some(v) = self.get_mut(view) {
            v.computed = Some(computed);
        }
    }

    /// Whether any declaration of `view` depends on dynamic state
    pub fn has_dynamic_rules(&self, view: ViewId) -> bool {
        self.get(view).is_some_and(View::has_dynamic_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_style::{CssValue, Display, Keyword, PropertyId, Specificity};

    /// Class selector with a fixed specificity; hover variants are dynamic
    struct ClassSelector {
        class: &'static str,
        specificity: u32,
        dynamic: bool,
    }

    impl Selector for ClassSelector {
        fn matches(&self, tree: &ViewTree, view: ViewId) -> SelectorMatch {
            let hit = tree.get(view).is_some_and(|v| v.check_class(self.class));
            match (hit, self.dynamic) {
                (false, _) => SelectorMatch::None,
                (true, false) => SelectorMatch::Static(Specificity(self.specificity)),
                (true, true) => SelectorMatch::Dynamic(Specificity(self.specificity)),
            }
        }
    }

    fn block_style() -> Rc<DeclaredStyle> {
        let mut style = DeclaredStyle::new();
        style.set(PropertyId::Display, CssValue::Keyword(Keyword::Block));
        Rc::new(style)
    }

    #[test]
    fn test_apply_and_compute() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("panel", "", 0);
        tree.set_root(root);
        let child = tree.create_widget("panel", "", 1);
        tree.attach(child, root).unwrap();

        let selector = ClassSelector {
            class: "panel",
            specificity: 1,
            dynamic: false,
        };
        tree.apply_style(root, &block_style(), &selector);
        tree.compute_styles(root);

        let style = tree.get(child).unwrap().computed_style().unwrap();
        assert_eq!(style.display(), Display::Block);
    }

    #[test]
    fn test_inheritance_runs_top_down() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("themed", "", 0);
        tree.set_root(root);
        let child = tree.create_widget("inheriting", "", 1);
        tree.attach(child, root).unwrap();

        let mut root_style = DeclaredStyle::new();
        root_style.set(PropertyId::Color, CssValue::Color(0xFFAA_BBCC));
        tree.apply_style(
            root,
            &Rc::new(root_style),
            &ClassSelector {
                class: "themed",
                specificity: 1,
                dynamic: false,
            },
        );

        let mut child_style = DeclaredStyle::new();
        child_style.set(PropertyId::Color, CssValue::Inherit);
        tree.apply_style(
            root,
            &Rc::new(child_style),
            &ClassSelector {
                class: "inheriting",
                specificity: 1,
                dynamic: false,
            },
        );

        tree.compute_styles(root);

        let style = tree.get(child).unwrap().computed_style().unwrap();
        assert_eq!(style.get(PropertyId::Color), CssValue::Color(0xFFAA_BBCC));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("panel", "", 0);
        tree.set_root(root);

        let selector = ClassSelector {
            class: "panel",
            specificity: 2,
            dynamic: false,
        };
        tree.apply_style(root, &block_style(), &selector);

        tree.compute_styles(root);
        let first = tree.get(root).unwrap().computed_style().unwrap().clone();
        tree.compute_styles(root);
        let second = tree.get(root).unwrap().computed_style().unwrap().clone();

        assert_eq!(first, second);
    }

    #[test]
    fn test_dynamic_match_lands_in_dynamic_bucket() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("hoverable", "", 0);
        tree.set_root(root);

        let selector = ClassSelector {
            class: "hoverable",
            specificity: 1,
            dynamic: true,
        };
        tree.apply_style(root, &block_style(), &selector);
        tree.compute_styles(root);

        assert!(tree.has_dynamic_rules(root));
        // dynamic declarations do not feed the static resolution
        let style = tree.get(root).unwrap().computed_style().unwrap();
        assert_eq!(style.display(), Display::Inline);
    }
}
