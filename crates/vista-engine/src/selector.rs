//! Simple Selectors
//!
//! A minimal selector form for wiring rules without a full selector
//! engine: universal, class and name bases with optional pseudo-class
//! suffixes. A selector containing a dynamic pseudo-class reports a
//! dynamic match so its declarations land in the dynamic bucket.

use vista_style::{SelectorMatch, Specificity};
use vista_view::{PseudoClass, Selector, ViewId, ViewTree};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Base {
    Universal,
    Class(String),
    Name(String),
}

/// `*`, `.class` or `#name`, optionally followed by `:pseudo` components
#[derive(Debug, Clone)]
pub struct SimpleSelector {
    base: Base,
    pseudo: Vec<String>,
    specificity: Specificity,
}

impl SimpleSelector {
    /// Parse a selector string, e.g. `.item:hover` or `#list:nth-child(odd)`
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split(':');
        let base_text = parts.next()?.trim();
        let pseudo: Vec<String> = parts.map(|p| p.trim().to_string()).collect();
        if pseudo.iter().any(String::is_empty) {
            return None;
        }

        let (base, weight) = if base_text.is_empty() || base_text == "*" {
            (Base::Universal, 0)
        } else if let Some(class) = base_text.strip_prefix('.') {
            (Base::Class(class.to_string()), 10)
        } else if let Some(name) = base_text.strip_prefix('#') {
            (Base::Name(name.to_string()), 100)
        } else {
            return None;
        };

        let specificity = Specificity(weight + 10 * pseudo.len() as u32);
        Some(Self {
            base,
            pseudo,
            specificity,
        })
    }

    fn is_dynamic(&self) -> bool {
        self.pseudo.iter().any(|p| {
            let keyword = p.split('(').next().unwrap_or(p);
            PseudoClass::from_keyword(keyword).is_some_and(PseudoClass::is_dynamic)
        })
    }
}

impl Selector for SimpleSelector {
    fn matches(&self, tree: &ViewTree, view: ViewId) -> SelectorMatch {
        let Some(v) = tree.get(view) else {
            return SelectorMatch::None;
        };
        let base_hit = match &self.base {
            Base::Universal => true,
            Base::Class(class) => v.check_class(class),
            Base::Name(name) => !v.name().is_empty() && v.name().eq_ignore_ascii_case(name),
        };
        if !base_hit {
            return SelectorMatch::None;
        }

        // a dynamic selector matches structurally; its state is evaluated
        // later, against the dynamic bucket
        if self.is_dynamic() {
            return SelectorMatch::Dynamic(self.specificity);
        }
        for pseudo in &self.pseudo {
            if !tree.check_pseudo_class(view, pseudo) {
                return SelectorMatch::None;
            }
        }
        SelectorMatch::Static(self.specificity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (ViewTree, ViewId, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.create_container("panel", "main", 1);
        tree.set_root(root);
        let child = tree.create_widget("item", "entry", 2);
        tree.attach(child, root).unwrap();
        (tree, root, child)
    }

    #[test]
    fn test_class_and_name_bases() {
        let (tree, root, child) = sample_tree();

        let by_class = SimpleSelector::parse(".item").unwrap();
        assert!(matches!(by_class.matches(&tree, child), SelectorMatch::Static(_)));
        assert_eq!(by_class.matches(&tree, root), SelectorMatch::None);

        let by_name = SimpleSelector::parse("#MAIN").unwrap();
        assert!(matches!(by_name.matches(&tree, root), SelectorMatch::Static(_)));
    }

    #[test]
    fn test_name_outweighs_class() {
        let class = SimpleSelector::parse(".item").unwrap();
        let name = SimpleSelector::parse("#entry").unwrap();
        let (tree, _, child) = sample_tree();

        let (SelectorMatch::Static(c), SelectorMatch::Static(n)) =
            (class.matches(&tree, child), name.matches(&tree, child))
        else {
            panic!("both selectors should match statically");
        };
        assert!(n > c);
    }

    #[test]
    fn test_structural_pseudo_filters() {
        let (tree, _, child) = sample_tree();
        let first = SimpleSelector::parse(".item:first-child").unwrap();
        let second = SimpleSelector::parse(".item:nth-child(2)").unwrap();

        assert!(matches!(first.matches(&tree, child), SelectorMatch::Static(_)));
        assert_eq!(second.matches(&tree, child), SelectorMatch::None);
    }

    #[test]
    fn test_dynamic_pseudo_reports_dynamic() {
        let (tree, _, child) = sample_tree();
        let hover = SimpleSelector::parse(".item:hover").unwrap();

        // matches dynamically even while the view is not hovered
        assert!(matches!(hover.matches(&tree, child), SelectorMatch::Dynamic(_)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SimpleSelector::parse("div").is_none());
        assert!(SimpleSelector::parse(".x:").is_none());
        assert!(SimpleSelector::parse("*").is_some());
        assert!(SimpleSelector::parse("").is_some());
    }
}
