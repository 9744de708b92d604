//! Declared Styles & Match Buckets
//!
//! Matched declarations arrive from the external selector engine as shared
//! property-value maps tagged with a specificity weight. Each view keeps two
//! buckets: one for statically matched rules, one for rules that depend on
//! dynamic state (hover/focus/...).

use std::rc::Rc;

use crate::properties::{CssValue, PropertyId};

/// Selector matching precedence weight, opaque to this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32);

/// Result of matching a selector group against a view.
///
/// `Static` matches are stable until the tree structure changes; `Dynamic`
/// matches must be re-evaluated when dynamic state flags change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorMatch {
    None,
    Static(Specificity),
    Dynamic(Specificity),
}

/// An ordered property-value map; insertion overwrites.
#[derive(Debug, Clone, Default)]
pub struct DeclaredStyle {
    entries: Vec<(PropertyId, CssValue)>,
}

impl DeclaredStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration, overwriting a previous one for the same property
    pub fn set(&mut self, property: PropertyId, value: CssValue) {
        for entry in self.entries.iter_mut() {
            if entry.0 == property {
                entry.1 = value;
                return;
            }
        }
        self.entries.push((property, value));
    }

    pub fn get(&self, property: PropertyId) -> Option<CssValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, CssValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A specificity-ordered bucket of matched declarations.
///
/// Entries stay sorted by ascending specificity; equal specificities keep
/// insertion order, so walking the bucket front to back applies the winning
/// declaration last.
#[derive(Debug, Clone, Default)]
pub struct DeclaredGroup {
    entries: Vec<(Rc<DeclaredStyle>, Specificity)>,
}

impl DeclaredGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a matched declaration map, keeping the bucket ordered
    pub fn append(&mut self, style: Rc<DeclaredStyle>, specificity: Specificity) {
        let at = self
            .entries
            .iter()
            .position(|(_, s)| *s > specificity)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, (style, specificity));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DeclaredStyle, Specificity)> + '_ {
        self.entries.iter().map(|(style, s)| (style.as_ref(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
