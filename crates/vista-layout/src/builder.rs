//! Box Generation
//!
//! Rebuilds the box tree from resolved styles. A container first classifies
//! its visible children: any block-level child establishes a block
//! formatting context and runs of consecutive inline-level children get
//! wrapped in anonymous inline boxes; otherwise the container collects all
//! children into one inline formatting context. Leaves follow the display
//! decision table. Floated sub-boxes are routed to the float list of the
//! nearest anonymous wrapper afterwards.

use vista_style::Display;
use vista_view::{ViewId, ViewTree};

use crate::box_tree::{BoxId, BoxKind, BoxTree, CssBox};

impl BoxTree {
    /// Rebuild the whole box tree below `root`, replacing any prior boxes.
    pub fn build(&mut self, tree: &ViewTree, root: ViewId) {
        self.clear();
        let root_box = self.build_box(tree, root);
        self.set_root(root_box);
    }

    /// Generate the principal box of one view (and its subtree).
    ///
    /// Returns `None` for `display: none` views and for views whose style
    /// has not been resolved yet.
    pub fn build_box(&mut self, tree: &ViewTree, view: ViewId) -> Option<BoxId> {
        let v = tree.get(view)?;
        let Some(style) = v.computed_style() else {
            tracing::warn!("box generation before style resolution");
            return None;
        };
        let display = style.display();
        if display == Display::None {
            return None;
        }

        let id = if v.is_container() && tree.children_count(view) > 0 {
            self.build_container_box(tree, view, display)
        } else {
            self.build_leaf_box(view, display, v.is_replaced())
        };
        self.set_principal(view, id);
        Some(id)
    }

    /// Display decision table for a childless view
    fn build_leaf_box(&mut self, view: ViewId, display: Display, replaced: bool) -> BoxId {
        let kind = match (display, replaced) {
            // non-replaced content still produces its own line boxes
            (Display::Block | Display::ListItem | Display::InlineBlock, false) => {
                BoxKind::LineBoxContainer
            }
            (Display::Inline, false) => BoxKind::LineBoxContainer,
            (Display::Inline | Display::InlineBlock, true) => BoxKind::Atomic,
            _ => BoxKind::Block,
        };
        self.alloc(CssBox::new(Some(view), kind))
    }

    fn build_container_box(&mut self, tree: &ViewTree, view: ViewId, display: Display) -> BoxId {
        // visible children with their resolved display
        let kids: Vec<(ViewId, Display)> = tree
            .children(view)
            .filter_map(|c| {
                let d = tree.get(c)?.computed_style()?.display();
                (d != Display::None).then_some((c, d))
            })
            .collect();

        if kids.is_empty() {
            let replaced = tree.get(view).is_some_and(|v| v.is_replaced());
            return self.build_leaf_box(view, display, replaced);
        }

        if kids.iter().any(|(_, d)| d.is_block_level()) {
            self.build_block_context(tree, view, &kids)
        } else {
            self.build_inline_context(tree, view, &kids)
        }
    }

    /// Block formatting context: block-level children contribute their own
    /// boxes, runs of consecutive inline-level children get anonymous
    /// wrappers.
    ///
    /// A trailing inline run joins the last wrapper instead of opening a
    /// second one, so the context only ever alternates wrapper/block boxes.
    fn build_block_context(
        &mut self,
        tree: &ViewTree,
        view: ViewId,
        kids: &[(ViewId, Display)],
    ) -> BoxId {
        let bc = self.alloc(CssBox::new(
            Some(view),
            BoxKind::BlockContainer {
                children: Vec::new(),
            },
        ));

        let mut last_wrapper: Option<BoxId> = None;
        let mut i = 0;
        while i < kids.len() {
            if kids[i].1.is_block_level() {
                if let Some(sub) = self.build_box(tree, kids[i].0) {
                    self.push_sub_box(bc, sub);
                }
                i += 1;
                continue;
            }

            // maximal inline run; the run is followed by a block-level
            // child unless it ends the child list
            let mut end = i;
            while end < kids.len() && !kids[end].1.is_block_level() {
                end += 1;
            }
            let wrapper = match last_wrapper {
                Some(w) if end == kids.len() => w,
                _ => {
                    let w = self.alloc(CssBox::new(
                        None,
                        BoxKind::AnonymousInline {
                            inlines: Vec::new(),
                            floats: Vec::new(),
                        },
                    ));
                    self.push_sub_box(bc, w);
                    last_wrapper = Some(w);
                    w
                }
            };
            while i < end {
                if let Some(sub) = self.build_box(tree, kids[i].0) {
                    self.push_inline(wrapper, sub);
                }
                i += 1;
            }
        }

        self.route_floats(tree, bc);
        bc
    }

    /// Inline formatting context collecting every visible child's box
    fn build_inline_context(
        &mut self,
        tree: &ViewTree,
        view: ViewId,
        kids: &[(ViewId, Display)],
    ) -> BoxId {
        let ibc = self.alloc(CssBox::new(
            Some(view),
            BoxKind::InlineContainer {
                inlines: Vec::new(),
                floats: Vec::new(),
            },
        ));
        for &(child, _) in kids {
            if let Some(sub) = self.build_box(tree, child) {
                self.push_inline(ibc, sub);
            }
        }
        ibc
    }

    /// Attach floated block-level sub-boxes to the float list of the
    /// nearest anonymous inline wrapper, preferring a preceding one.
    ///
    /// Floats stay in the sub-box sequence as well: they leave normal flow
    /// but still influence the line boxes around them.
    fn route_floats(&mut self, tree: &ViewTree, bc: BoxId) {
        let children: Vec<BoxId> = self.sub_boxes(bc).to_vec();
        let wrappers: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, id)| self.get(**id).is_some_and(CssBox::is_anonymous))
            .map(|(at, _)| at)
            .collect();
        if wrappers.is_empty() {
            return;
        }

        for (at, &sub) in children.iter().enumerate() {
            let Some(cssbox) = self.get(sub) else { continue };
            if cssbox.is_anonymous() {
                continue;
            }
            let Some(owner) = cssbox.view else { continue };
            let floated = tree
                .get(owner)
                .and_then(|v| v.computed_style())
                .is_some_and(|s| s.is_floated());
            if !floated {
                continue;
            }

            let target = wrappers
                .iter()
                .rev()
                .find(|&&w| w < at)
                .or_else(|| wrappers.iter().find(|&&w| w > at));
            if let Some(&w) = target {
                self.push_float(children[w], sub);
            }
        }
    }

    fn push_sub_box(&mut self, container: BoxId, sub: BoxId) {
        if let Some(BoxKind::BlockContainer { children }) = self.get_mut(container).map(|b| &mut b.kind)
        {
            children.push(sub);
        }
    }

    fn push_inline(&mut self, container: BoxId, sub: BoxId) {
        match self.get_mut(container).map(|b| &mut b.kind) {
            Some(BoxKind::InlineContainer { inlines, .. })
            | Some(BoxKind::AnonymousInline { inlines, .. }) => inlines.push(sub),
            _ => {}
        }
    }

    fn push_float(&mut self, container: BoxId, sub: BoxId) {
        match self.get_mut(container).map(|b| &mut b.kind) {
            Some(BoxKind::InlineContainer { floats, .. })
            | Some(BoxKind::AnonymousInline { floats, .. }) => floats.push(sub),
            _ => {}
        }
    }
}
