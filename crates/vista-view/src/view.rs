//! View Node Data
//!
//! One visual element: identity, class tokens, attributes, state flags,
//! matched declarations and the resolved style snapshot. Tree links are
//! arena indices owned by the surrounding `ViewTree`.

use std::collections::HashMap;
use std::rc::Rc;

use vista_style::{ComputedStyle, DeclaredGroup};

use crate::events::{ContainerHooks, EventListener};
use crate::flags::ViewFlags;
use crate::geometry::IntRect;
use crate::ViewId;

/// Widget/container discriminant of a view
pub enum ViewKind {
    /// Leaf widget; `replaced` marks externally supplied content
    Widget { replaced: bool },
    /// Ordered child collection
    Container(ContainerData),
}

/// Child-list bookkeeping of a container view.
///
/// Children are linked through their own prev/next fields; the container
/// stores only the endpoints, the count and the focused-child back-reference.
#[derive(Default)]
pub struct ContainerData {
    pub(crate) first: Option<ViewId>,
    pub(crate) last: Option<ViewId>,
    pub(crate) count: usize,
    pub(crate) focused: Option<ViewId>,
    pub(crate) hooks: Option<Rc<dyn ContainerHooks>>,
}

impl ContainerData {
    pub fn first(&self) -> Option<ViewId> {
        self.first
    }

    pub fn last(&self) -> Option<ViewId> {
        self.last
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }
}

/// One visual element
pub struct View {
    pub(crate) id: i32,
    pub(crate) name: String,
    /// Class tokens, space delimited and space padded: the string always
    /// begins and ends with exactly one space (a single space when empty),
    /// so token membership is a padded substring test.
    pub(crate) classes: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) flags: ViewFlags,
    pub(crate) rect: IntRect,
    pub(crate) user_data: usize,

    pub(crate) parent: Option<ViewId>,
    pub(crate) prev: Option<ViewId>,
    pub(crate) next: Option<ViewId>,

    pub(crate) decl_static: DeclaredGroup,
    pub(crate) decl_dynamic: DeclaredGroup,
    pub(crate) computed: Option<ComputedStyle>,

    pub(crate) listeners: Vec<Rc<dyn EventListener>>,
    pub(crate) kind: ViewKind,
}

/// Normalize a token string to the padded form
fn pad_tokens(tokens: &str) -> String {
    let trimmed = tokens.trim();
    if trimmed.is_empty() {
        " ".to_string()
    } else {
        format!(" {trimmed} ")
    }
}

/// Byte offset of a case-insensitive substring match
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

impl View {
    pub(crate) fn new(kind: ViewKind, classes: &str, name: &str, id: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            classes: pad_tokens(classes),
            attrs: HashMap::new(),
            flags: ViewFlags::default(),
            rect: IntRect::default(),
            user_data: 0,
            parent: None,
            prev: None,
            next: None,
            decl_static: DeclaredGroup::new(),
            decl_dynamic: DeclaredGroup::new(),
            computed: None,
            listeners: Vec::new(),
            kind,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename; comparison is case-insensitive and an unchanged non-empty
    /// name is a no-op failure
    pub fn set_name(&mut self, name: &str) -> bool {
        if !self.name.is_empty() && name.eq_ignore_ascii_case(&self.name) {
            return false;
        }
        self.name = name.to_string();
        true
    }

    /// The padded class-token string
    pub fn classes(&self) -> &str {
        &self.classes
    }

    /// Replace the whole token string; returns false when unchanged
    pub fn set_classes(&mut self, classes: &str) -> bool {
        let padded = pad_tokens(classes);
        if padded.eq_ignore_ascii_case(&self.classes) {
            return false;
        }
        self.classes = padded;
        true
    }

    /// Add a class token; a present token is a no-op failure
    pub fn include_class(&mut self, class: &str) -> bool {
        let token = class.trim();
        if token.is_empty() {
            return false;
        }
        if find_ignore_case(&self.classes, &pad_tokens(token)).is_some() {
            return false;
        }
        self.classes.push_str(token);
        self.classes.push(' ');
        true
    }

    /// Remove a class token; an absent token is a no-op failure
    pub fn exclude_class(&mut self, class: &str) -> bool {
        let needle = pad_tokens(class.trim());
        let Some(at) = find_ignore_case(&self.classes, &needle) else {
            return false;
        };
        // drop " token", keep the trailing space as the new separator
        self.classes.replace_range(at..at + needle.len() - 1, "");
        true
    }

    /// Token membership test, case-insensitive
    pub fn check_class(&self, class: &str) -> bool {
        find_ignore_case(&self.classes, &pad_tokens(class.trim())).is_some()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) -> bool {
        self.attrs.insert(key.to_string(), value.to_string());
        true
    }

    /// Exact key/value match
    pub fn check_attribute(&self, key: &str, value: &str) -> bool {
        self.attrs.get(key).is_some_and(|v| v == value)
    }

    /// Match a `key=value` pair; a pair without exactly one `=` is
    /// diagnosed and reported as no match
    pub fn check_attribute_pair(&self, pair: &str) -> bool {
        let parts: Vec<&str> = pair.split('=').collect();
        if parts.len() == 2 {
            self.check_attribute(parts[0], parts[1])
        } else {
            tracing::warn!(pair, "malformed attribute pair");
            false
        }
    }

    pub fn flags(&self) -> ViewFlags {
        self.flags
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(ViewFlags::VISIBLE)
    }

    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ViewFlags::DISABLED)
    }

    pub fn is_focused(&self) -> bool {
        self.flags.contains(ViewFlags::FOCUSED)
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ViewKind::Container(_))
    }

    /// Whether this view renders externally supplied (replaced) content
    pub fn is_replaced(&self) -> bool {
        matches!(self.kind, ViewKind::Widget { replaced: true })
    }

    pub fn container(&self) -> Option<&ContainerData> {
        match &self.kind {
            ViewKind::Container(data) => Some(data),
            ViewKind::Widget { .. } => None,
        }
    }

    pub(crate) fn container_mut(&mut self) -> Option<&mut ContainerData> {
        match &mut self.kind {
            ViewKind::Container(data) => Some(data),
            ViewKind::Widget { .. } => None,
        }
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn prev(&self) -> Option<ViewId> {
        self.prev
    }

    pub fn next(&self) -> Option<ViewId> {
        self.next
    }

    pub fn rect(&self) -> IntRect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: IntRect) {
        self.rect = rect;
    }

    pub fn user_data(&self) -> usize {
        self.user_data
    }

    pub fn set_user_data(&mut self, data: usize) {
        self.user_data = data;
    }

    /// The resolved style snapshot, if the cascade has run
    pub fn computed_style(&self) -> Option<&ComputedStyle> {
        self.computed.as_ref()
    }

    /// Matched declarations that depend on dynamic state
    pub fn has_dynamic_rules(&self) -> bool {
        !self.decl_dynamic.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> View {
        View::new(ViewKind::Widget { replaced: false }, "", "", 0)
    }

    #[test]
    fn test_class_string_stays_padded() {
        let mut v = View::new(ViewKind::Widget { replaced: false }, "alpha beta", "", 0);
        assert_eq!(v.classes(), " alpha beta ");

        assert!(v.include_class("gamma"));
        assert!(v.classes().starts_with(' ') && v.classes().ends_with(' '));

        assert!(v.exclude_class("alpha"));
        assert_eq!(v.classes(), " beta gamma ");

        assert!(v.exclude_class("beta"));
        assert!(v.exclude_class("gamma"));
        assert_eq!(v.classes(), " ");
    }

    #[test]
    fn test_class_edits_are_idempotent_failures() {
        let mut v = widget();
        assert!(v.include_class("on"));
        assert!(!v.include_class("on"));
        assert!(!v.include_class("ON"));
        assert!(v.exclude_class("on"));
        assert!(!v.exclude_class("on"));
    }

    #[test]
    fn test_check_class_is_case_insensitive() {
        let v = View::new(ViewKind::Widget { replaced: false }, "Nav Item", "", 0);
        assert!(v.check_class("nav"));
        assert!(v.check_class("ITEM"));
        assert!(!v.check_class("navitem"));
    }

    #[test]
    fn test_set_classes_replaces_wholesale() {
        let mut v = View::new(ViewKind::Widget { replaced: false }, "a b", "", 0);
        assert!(v.set_classes("c"));
        assert_eq!(v.classes(), " c ");
        assert!(!v.set_classes("C"));
    }

    #[test]
    fn test_set_name_detects_unchanged() {
        let mut v = widget();
        assert!(v.set_name("menu"));
        assert!(!v.set_name("MENU"));
        assert!(v.set_name("toolbar"));
    }

    #[test]
    fn test_attribute_pair_matching() {
        let mut v = widget();
        v.set_attribute("role", "button");

        assert!(v.check_attribute_pair("role=button"));
        assert!(!v.check_attribute_pair("role=link"));
        assert!(!v.check_attribute_pair("role"));
        assert!(!v.check_attribute_pair("role=button=extra"));
    }

    #[test]
    fn test_attribute_overwrite() {
        let mut v = widget();
        v.set_attribute("state", "open");
        v.set_attribute("state", "closed");
        assert_eq!(v.attribute("state"), Some("closed"));
    }
}
