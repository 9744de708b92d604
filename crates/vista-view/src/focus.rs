//! Focus Delegation
//!
//! Each container remembers at most one focused child; focus forms a single
//! leaf-to-root path. Focusing a view walks its ancestors, unfocusing any
//! sibling subtree that previously held focus, and focusing a container
//! re-descends into its remembered focused descendant.

use crate::flags::ViewFlags;
use crate::tree::ViewTree;
use crate::events::ViewNotification;
use crate::{View, ViewId};

impl ViewTree {
    /// Make `child` the focused child of `parent`.
    ///
    /// No-op when `child` is already focused. The previously focused child
    /// receives its lost-focus notification before `child` gains focus.
    pub fn focus_child(&mut self, parent: ViewId, child: ViewId) {
        let Some(data) = self.get(parent).and_then(View::container) else {
            return;
        };
        if data.focused == Some(child) || self.get(child).is_none() {
            return;
        }

        let old = data.focused;
        if let Some(data) = self.get_mut(parent).and_then(View::container_mut) {
            data.focused = Some(child);
        }
        self.set_flag(parent, ViewFlags::FOCUSABLE, true);

        if let Some(old) = old {
            self.set_flag(old, ViewFlags::FOCUSED, false);
            self.notify_lost_focus(old);
        }

        self.set_flag(child, ViewFlags::FOCUSED, true);
        self.notify_got_focus(child);

        // focus is a chain: descend into the remembered focused descendant
        if let Some(descendant) = self.get(child).and_then(View::container).and_then(|c| c.focused)
        {
            self.set_flag(descendant, ViewFlags::FOCUSED, true);
            self.notify_got_focus(descendant);
            self.descend_focus(descendant);
        }
    }

    fn descend_focus(&mut self, view: ViewId) {
        if let Some(descendant) = self.get(view).and_then(View::container).and_then(|c| c.focused)
        {
            self.set_flag(descendant, ViewFlags::FOCUSED, true);
            self.notify_got_focus(descendant);
            self.descend_focus(descendant);
        }
    }

    /// Clear the focused child of `parent`, unfocusing its descendant chain
    pub fn unfocus_child(&mut self, parent: ViewId) {
        let Some(data) = self.get(parent).and_then(View::container) else {
            return;
        };
        let Some(old) = data.focused else { return };

        if let Some(data) = self.get_mut(parent).and_then(View::container_mut) {
            data.focused = None;
        }
        self.set_flag(old, ViewFlags::FOCUSED, false);
        self.notify_lost_focus(old);
        if self.get(old).is_some_and(View::is_container) {
            self.unfocus_child(old);
        }
        self.set_flag(parent, ViewFlags::FOCUSABLE, false);
    }

    /// Focus `view`, making every ancestor mark the path to it as focused.
    ///
    /// A previously focused sibling subtree is unfocused along the way; at
    /// most one leaf-to-root path holds focus afterwards.
    pub fn focus_me(&mut self, view: ViewId) {
        if self.is_root(view) {
            return;
        }
        let Some(parent) = self.parent_of(view) else {
            return;
        };

        // the root container is implicitly on the focus path
        let parent_focused =
            self.is_root(parent) || self.get(parent).is_some_and(View::is_focused);
        if parent_focused {
            let focused = self.get(parent).and_then(View::container).and_then(|c| c.focused);
            if focused.is_some() && focused != Some(view) {
                self.unfocus_child(parent);
            }
        } else {
            self.focus_me(parent);
        }
        self.focus_child(parent, view);
    }

    /// Focus helper mirroring the listener-facing entry point
    pub fn set_focus(&mut self, view: ViewId) -> bool {
        if self.get(view).is_none() {
            return false;
        }
        self.focus_me(view);
        true
    }

    fn notify_got_focus(&self, view: ViewId) {
        self.raise_event(view, ViewNotification::GotFocus);
        self.update_view(view);
    }

    fn notify_lost_focus(&self, view: ViewId) {
        self.raise_event(view, ViewNotification::LostFocus);
        self.update_view(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventListener, ViewEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        log: Rc<RefCell<Vec<(ViewId, ViewNotification)>>>,
    }

    impl EventListener for Recorder {
        fn on_event(&self, event: &ViewEvent) -> bool {
            self.log.borrow_mut().push((event.source, event.notification));
            false
        }
    }

    fn recorded(
        tree: &mut ViewTree,
        view: ViewId,
        log: &Rc<RefCell<Vec<(ViewId, ViewNotification)>>>,
    ) {
        let listener = Rc::new(Recorder { log: log.clone() });
        tree.add_event_listener(view, listener);
    }

    #[test]
    fn test_focus_switch_notifies_lost_then_got() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        tree.set_root(root);
        let a = tree.create_widget("", "", 1);
        let b = tree.create_widget("", "", 2);
        tree.attach(a, root).unwrap();
        tree.attach(b, root).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        recorded(&mut tree, a, &log);
        recorded(&mut tree, b, &log);

        tree.focus_child(root, a);
        log.borrow_mut().clear();

        tree.focus_child(root, b);

        assert_eq!(
            log.borrow().as_slice(),
            &[
                (a, ViewNotification::LostFocus),
                (b, ViewNotification::GotFocus)
            ]
        );
    }

    #[test]
    fn test_refocus_is_noop() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        let a = tree.create_widget("", "", 1);
        tree.attach(a, root).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        recorded(&mut tree, a, &log);

        tree.focus_child(root, a);
        tree.focus_child(root, a);

        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_focus_descends_remembered_chain() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        tree.set_root(root);
        let panel = tree.create_container("", "", 1);
        let leaf = tree.create_widget("", "", 2);
        tree.attach(panel, root).unwrap();
        tree.attach(leaf, panel).unwrap();

        // remember a focused descendant, then focus the panel from outside
        tree.focus_child(panel, leaf);
        let log = Rc::new(RefCell::new(Vec::new()));
        recorded(&mut tree, leaf, &log);

        tree.focus_child(root, panel);

        assert!(tree.get(leaf).unwrap().is_focused());
        assert!(
            log.borrow()
                .contains(&(leaf, ViewNotification::GotFocus))
        );
    }

    #[test]
    fn test_focus_me_builds_single_path() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        tree.set_root(root);
        let left = tree.create_container("", "", 1);
        let right = tree.create_container("", "", 2);
        let left_leaf = tree.create_widget("", "", 3);
        let right_leaf = tree.create_widget("", "", 4);
        tree.attach(left, root).unwrap();
        tree.attach(right, root).unwrap();
        tree.attach(left_leaf, left).unwrap();
        tree.attach(right_leaf, right).unwrap();

        tree.focus_me(left_leaf);
        assert!(tree.get(left_leaf).unwrap().is_focused());
        assert_eq!(tree.get(root).unwrap().container().unwrap().focused(), Some(left));

        tree.focus_me(right_leaf);

        assert!(tree.get(right_leaf).unwrap().is_focused());
        assert!(!tree.get(left_leaf).unwrap().is_focused());
        assert!(!tree.get(left).unwrap().is_focused());
        assert_eq!(tree.get(root).unwrap().container().unwrap().focused(), Some(right));
        assert_eq!(tree.get(left).unwrap().container().unwrap().focused(), None);
    }

    #[test]
    fn test_unfocus_clears_chain() {
        let mut tree = ViewTree::new();
        let root = tree.create_container("", "", 0);
        tree.set_root(root);
        let panel = tree.create_container("", "", 1);
        let leaf = tree.create_widget("", "", 2);
        tree.attach(panel, root).unwrap();
        tree.attach(leaf, panel).unwrap();
        tree.focus_me(leaf);

        tree.unfocus_child(root);

        assert!(!tree.get(panel).unwrap().is_focused());
        assert!(!tree.get(leaf).unwrap().is_focused());
        assert_eq!(tree.get(panel).unwrap().container().unwrap().focused(), None);
    }
}
