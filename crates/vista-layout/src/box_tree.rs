//! Box Tree (arena-based allocation)
//!
//! Boxes live in one slab addressed by `BoxId`; the tree keeps a map from
//! each view to its principal box. Rebuilding discards the whole arena:
//! boxes are replaced wholesale, never patched.

use std::collections::HashMap;

use vista_view::ViewId;

use crate::box_model::BoxDimensions;

/// Box identifier (index into the box arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(pub(crate) u32);

/// Formatting-context kind of a box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxKind {
    /// Plain block-level box (leaf fallback, replaced block)
    Block,
    /// Atomic inline-level box for replaced inline content
    Atomic,
    /// Inline-content container a node produces for its own content
    LineBoxContainer,
    /// Block formatting context: a linear sequence of block-level boxes
    BlockContainer { children: Vec<BoxId> },
    /// Inline formatting context collecting every child's box
    InlineContainer {
        inlines: Vec<BoxId>,
        floats: Vec<BoxId>,
    },
    /// Synthesized wrapper with no owning view, letting inline runs sit
    /// between block-level siblings
    AnonymousInline {
        inlines: Vec<BoxId>,
        floats: Vec<BoxId>,
    },
}

/// One layout box
#[derive(Debug, Clone, PartialEq)]
pub struct CssBox {
    /// Owning view; `None` for anonymous boxes
    pub view: Option<ViewId>,
    pub kind: BoxKind,
    pub dimensions: BoxDimensions,
}

impl CssBox {
    pub(crate) fn new(view: Option<ViewId>, kind: BoxKind) -> Self {
        Self {
            view,
            kind,
            dimensions: BoxDimensions::default(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self.kind, BoxKind::AnonymousInline { .. })
    }
}

/// Arena of boxes plus the view-to-principal-box map
#[derive(Debug, Default)]
pub struct BoxTree {
    boxes: Vec<CssBox>,
    principal: HashMap<ViewId, BoxId>,
    root: Option<BoxId>,
}

impl BoxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every box and principal mapping
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.principal.clear();
        self.root = None;
    }

    pub(crate) fn alloc(&mut self, cssbox: CssBox) -> BoxId {
        self.boxes.push(cssbox);
        BoxId((self.boxes.len() - 1) as u32)
    }

    pub fn get(&self, id: BoxId) -> Option<&CssBox> {
        self.boxes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut CssBox> {
        self.boxes.get_mut(id.0 as usize)
    }

    /// The principal box generated for `view`, if any
    pub fn principal(&self, view: ViewId) -> Option<BoxId> {
        self.principal.get(&view).copied()
    }

    pub(crate) fn set_principal(&mut self, view: ViewId, id: BoxId) {
        self.principal.insert(view, id);
    }

    pub fn root(&self) -> Option<BoxId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, id: Option<BoxId>) {
        self.root = id;
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Direct sub-boxes of a formatting-context box
    pub fn sub_boxes(&self, id: BoxId) -> &[BoxId] {
        match self.get(id).map(|b| &b.kind) {
            Some(BoxKind::BlockContainer { children }) => children,
            Some(BoxKind::InlineContainer { inlines, .. })
            | Some(BoxKind::AnonymousInline { inlines, .. }) => inlines,
            _ => &[],
        }
    }

    /// Float list of an inline-formatting box
    pub fn float_boxes(&self, id: BoxId) -> &[BoxId] {
        match self.get(id).map(|b| &b.kind) {
            Some(BoxKind::InlineContainer { floats, .. })
            | Some(BoxKind::AnonymousInline { floats, .. }) => floats,
            _ => &[],
        }
    }
}
