//! Pseudo-Class Matching
//!
//! Structural pseudo-classes are computed from tree position; dynamic ones
//! are O(1) reads of the view's flag word. Keywords are matched through a
//! closed table, case-insensitively.

use crate::flags::ViewFlags;
use crate::tree::ViewTree;
use crate::{View, ViewId};

/// Known pseudo-class keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    Hover,
    Active,
    Focus,
    Disabled,
    Enabled,
    Checked,
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild,
    NthLastChild,
    Root,
    Empty,
}

impl PseudoClass {
    /// Look a keyword up, case-insensitively
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "hover" => Some(Self::Hover),
            "active" => Some(Self::Active),
            "focus" => Some(Self::Focus),
            "disabled" => Some(Self::Disabled),
            "enabled" => Some(Self::Enabled),
            "checked" => Some(Self::Checked),
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "only-child" => Some(Self::OnlyChild),
            "nth-child" => Some(Self::NthChild),
            "nth-last-child" => Some(Self::NthLastChild),
            "root" => Some(Self::Root),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    /// Whether matching depends on mutable UI state
    pub fn is_dynamic(self) -> bool {
        matches!(
            self,
            Self::Hover | Self::Active | Self::Focus | Self::Disabled | Self::Enabled | Self::Checked
        )
    }
}

/// Split `nth-child(2n+1)`-style text into keyword and argument
fn split_functional(text: &str) -> (&str, &str) {
    match text.find('(') {
        Some(open) => {
            let name = &text[..open];
            let rest = &text[open + 1..];
            let arg = match rest.rfind(')') {
                Some(close) => &rest[..close],
                None => rest,
            };
            (name, arg.trim())
        }
        None => (text, ""),
    }
}

/// Match `odd`, `even` or a literal 1-based index against a position
fn nth_matches(arg: &str, position: usize) -> bool {
    match arg {
        "odd" => position % 2 == 1,
        "even" => position % 2 == 0,
        literal => literal.parse::<usize>().is_ok_and(|n| n == position),
    }
}

impl ViewTree {
    /// Match one pseudo-class selector component against `view`.
    ///
    /// `text` carries the keyword plus an optional bracketed argument,
    /// e.g. `nth-child(odd)`.
    pub fn check_pseudo_class(&self, view: ViewId, text: &str) -> bool {
        let (keyword, arg) = split_functional(text);
        let Some(pseudo) = PseudoClass::from_keyword(keyword) else {
            return false;
        };
        let Some(v) = self.get(view) else {
            return false;
        };

        match pseudo {
            PseudoClass::Hover => v.flags().contains(ViewFlags::HOVER),
            PseudoClass::Active => v.flags().contains(ViewFlags::ACTIVE),
            PseudoClass::Focus => v.flags().contains(ViewFlags::FOCUSED),
            PseudoClass::Disabled => v.flags().contains(ViewFlags::DISABLED),
            PseudoClass::Enabled => !v.flags().contains(ViewFlags::DISABLED),
            PseudoClass::Checked => v.flags().contains(ViewFlags::CHECKED),

            PseudoClass::FirstChild => self.position_check(view, |tree, parent| {
                tree.get(parent).and_then(View::container).and_then(|c| c.first()) == Some(view)
            }),
            PseudoClass::LastChild => self.position_check(view, |tree, parent| {
                tree.get(parent).and_then(View::container).and_then(|c| c.last()) == Some(view)
            }),
            PseudoClass::OnlyChild => self.position_check(view, |tree, parent| {
                let data = tree.get(parent).and_then(View::container);
                data.is_some_and(|c| c.first() == Some(view) && c.last() == Some(view))
            }),
            PseudoClass::NthChild => self.position_check(view, |tree, parent| {
                tree.child_index(parent, view)
                    .is_some_and(|idx| nth_matches(arg, idx + 1))
            }),
            PseudoClass::NthLastChild => self.position_check(view, |tree, parent| {
                tree.child_index(parent, view).is_some_and(|idx| {
                    let from_end = tree.children_count(parent) - idx;
                    nth_matches(arg, from_end)
                })
            }),
            PseudoClass::Root => self.is_root(view),
            PseudoClass::Empty => match v.container() {
                Some(data) => data.count() == 0,
                None => true,
            },
        }
    }

    fn position_check(
        &self,
        view: ViewId,
        check: impl Fn(&ViewTree, ViewId) -> bool,
    ) -> bool {
        match self.parent_of(view) {
            Some(parent) => check(self, parent),
            None => false,
        }
    }

    /// Pseudo-element matching is not wired to a taxonomy yet; everything
    /// reports no match
    pub fn check_pseudo_element(&self, _view: ViewId, name: &str) -> bool {
        tracing::debug!(name, "pseudo-element matching not implemented");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(count: usize) -> (ViewTree, ViewId, Vec<ViewId>) {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        tree.set_root(root);
        let kids: Vec<ViewId> = (0..count)
            .map(|i| {
                let w = tree.create_widget("", "", i as i32 + 1);
                tree.attach(w, root).unwrap();
                w
            })
            .collect();
        (tree, root, kids)
    }

    #[test]
    fn test_first_and_last_child() {
        let (tree, _, kids) = family(3);
        assert!(tree.check_pseudo_class(kids[0], "first-child"));
        assert!(!tree.check_pseudo_class(kids[1], "first-child"));
        assert!(tree.check_pseudo_class(kids[2], "last-child"));
        assert!(!tree.check_pseudo_class(kids[0], "last-child"));
    }

    #[test]
    fn test_only_child() {
        let (tree, _, kids) = family(1);
        assert!(tree.check_pseudo_class(kids[0], "only-child"));

        let (tree, _, kids) = family(2);
        assert!(!tree.check_pseudo_class(kids[0], "only-child"));
    }

    #[test]
    fn test_nth_child_odd_matches_positions_1_and_3() {
        let (tree, _, kids) = family(4);
        let odd: Vec<bool> = kids
            .iter()
            .map(|&k| tree.check_pseudo_class(k, "nth-child(odd)"))
            .collect();
        assert_eq!(odd, vec![true, false, true, false]);
    }

    #[test]
    fn test_nth_child_literal_and_even() {
        let (tree, _, kids) = family(4);
        assert!(tree.check_pseudo_class(kids[1], "nth-child(2)"));
        assert!(!tree.check_pseudo_class(kids[1], "nth-child(3)"));
        assert!(tree.check_pseudo_class(kids[3], "nth-child(even)"));
        assert!(!tree.check_pseudo_class(kids[0], "nth-child(bogus)"));
    }

    #[test]
    fn test_nth_last_child_counts_from_end() {
        let (tree, _, kids) = family(4);
        assert!(tree.check_pseudo_class(kids[3], "nth-last-child(1)"));
        assert!(tree.check_pseudo_class(kids[0], "nth-last-child(4)"));
        assert!(tree.check_pseudo_class(kids[3], "nth-last-child(odd)"));
        assert!(tree.check_pseudo_class(kids[2], "nth-last-child(even)"));
    }

    #[test]
    fn test_root_and_empty() {
        let (mut tree, root, kids) = family(1);
        assert!(tree.check_pseudo_class(root, "root"));
        assert!(!tree.check_pseudo_class(kids[0], "root"));

        // a widget is trivially empty, a container only without children
        assert!(tree.check_pseudo_class(kids[0], "empty"));
        assert!(!tree.check_pseudo_class(root, "empty"));
        let bare = tree.create_container("", "", 9);
        tree.attach(bare, root).unwrap();
        assert!(tree.check_pseudo_class(bare, "empty"));
    }

    #[test]
    fn test_dynamic_flags_read_directly() {
        let (mut tree, _, kids) = family(1);
        let v = kids[0];

        assert!(tree.check_pseudo_class(v, "enabled"));
        assert!(!tree.check_pseudo_class(v, "hover"));

        tree.set_flag(v, ViewFlags::HOVER, true);
        tree.set_flag(v, ViewFlags::DISABLED, true);
        tree.set_flag(v, ViewFlags::CHECKED, true);

        assert!(tree.check_pseudo_class(v, "hover"));
        assert!(tree.check_pseudo_class(v, "disabled"));
        assert!(!tree.check_pseudo_class(v, "enabled"));
        assert!(tree.check_pseudo_class(v, "checked"));
        assert!(tree.check_pseudo_class(v, "HOVER"));
    }

    #[test]
    fn test_unknown_keyword_never_matches() {
        let (tree, _, kids) = family(1);
        assert!(!tree.check_pseudo_class(kids[0], "visited"));
        assert!(!tree.check_pseudo_element(kids[0], "before"));
    }
}
