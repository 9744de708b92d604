//! View Tree (arena-based allocation)
//!
//! All views live in one slab; parent/sibling/endpoint references are
//! `Option<ViewId>` indices, cleared synchronously on every detach so no
//! dangling link survives a mutation. Containers own their children: a
//! destroyed container destroys its subtree, and moving a view between
//! containers is a single ownership transfer.

use std::rc::Rc;

use crate::events::{ContainerHooks, EventListener, ViewEvent, ViewNotification};
use crate::flags::ViewFlags;
use crate::geometry::IntRect;
use crate::view::{View, ViewKind};
use crate::{ViewId, ViewResult};

/// Tree operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("no such view")]
    NoSuchView,
    #[error("view is not a container")]
    NotAContainer,
    #[error("view is not a child of this container")]
    NotAChild,
    #[error("anchor is not a child of this container")]
    AnchorNotChild,
    #[error("view has no parent")]
    NoParent,
    #[error("insertion would create a cycle")]
    WouldCycle,
}

/// Arena of views with slot recycling
#[derive(Default)]
pub struct ViewTree {
    slots: Vec<Option<View>>,
    free: Vec<u32>,
    root: Option<ViewId>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, view: View) -> ViewId {
        if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = Some(view);
            ViewId(idx)
        } else {
            self.slots.push(Some(view));
            ViewId((self.slots.len() - 1) as u32)
        }
    }

    /// Create a leaf widget
    pub fn create_widget(&mut self, classes: &str, name: &str, id: i32) -> ViewId {
        self.alloc(View::new(ViewKind::Widget { replaced: false }, classes, name, id))
    }

    /// Create a leaf widget with externally supplied (replaced) content
    pub fn create_replaced(&mut self, classes: &str, name: &str, id: i32) -> ViewId {
        self.alloc(View::new(ViewKind::Widget { replaced: true }, classes, name, id))
    }

    /// Create a container
    pub fn create_container(&mut self, classes: &str, name: &str, id: i32) -> ViewId {
        self.alloc(View::new(
            ViewKind::Container(Default::default()),
            classes,
            name,
            id,
        ))
    }

    pub fn get(&self, view: ViewId) -> Option<&View> {
        self.slots.get(view.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, view: ViewId) -> Option<&mut View> {
        self.slots.get_mut(view.0 as usize)?.as_mut()
    }

    /// Number of live views
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_root(&mut self, view: ViewId) {
        self.root = Some(view);
    }

    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    pub fn is_root(&self, view: ViewId) -> bool {
        self.root == Some(view)
    }

    pub fn parent_of(&self, view: ViewId) -> Option<ViewId> {
        self.get(view)?.parent
    }

    /// Children in link order
    pub fn children(&self, parent: ViewId) -> Children<'_> {
        Children {
            tree: self,
            cur: self.get(parent).and_then(|v| v.container()).and_then(|c| c.first),
            forward: true,
        }
    }

    /// Children in reverse (paint-top-first) order
    pub fn children_rev(&self, parent: ViewId) -> Children<'_> {
        Children {
            tree: self,
            cur: self.get(parent).and_then(|v| v.container()).and_then(|c| c.last),
            forward: false,
        }
    }

    pub fn children_count(&self, parent: ViewId) -> usize {
        self.get(parent)
            .and_then(|v| v.container())
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn is_child(&self, parent: ViewId, view: ViewId) -> bool {
        self.parent_of(view) == Some(parent)
    }

    fn is_ancestor(&self, maybe_ancestor: ViewId, of: ViewId) -> bool {
        let mut cur = self.parent_of(of);
        while let Some(v) = cur {
            if v == maybe_ancestor {
                return true;
            }
            cur = self.parent_of(v);
        }
        false
    }

    fn hooks_of(&self, view: ViewId) -> Option<Rc<dyn ContainerHooks>> {
        self.get(view)?.container()?.hooks.clone()
    }

    /// Install the lifecycle hooks of a container
    pub fn set_hooks(&mut self, view: ViewId, hooks: Rc<dyn ContainerHooks>) -> ViewResult<()> {
        let data = self
            .get_mut(view)
            .ok_or(TreeError::NoSuchView)?
            .container_mut()
            .ok_or(TreeError::NotAContainer)?;
        data.hooks = Some(hooks);
        Ok(())
    }

    fn guard_insert(
        &self,
        parent: ViewId,
        anchor: Option<ViewId>,
        child: ViewId,
    ) -> ViewResult<bool> {
        self.get(child).ok_or(TreeError::NoSuchView)?;
        let pv = self.get(parent).ok_or(TreeError::NoSuchView)?;
        if pv.container().is_none() {
            return Err(TreeError::NotAContainer);
        }
        if let Some(a) = anchor {
            if !self.is_child(parent, a) {
                return Err(TreeError::AnchorNotChild);
            }
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle);
        }
        // reinserting an existing child (or inserting at itself) is a no-op
        Ok(anchor == Some(child) || self.is_child(parent, child))
    }

    /// Insert `child` after `anchor` (`None` inserts at the front).
    ///
    /// A child of another container is silently detached from it first.
    pub fn insert_after(
        &mut self,
        parent: ViewId,
        anchor: Option<ViewId>,
        child: ViewId,
    ) -> ViewResult<()> {
        if self.guard_insert(parent, anchor, child)? {
            return Ok(());
        }
        if let Some(old) = self.parent_of(child) {
            self.detach_child(old, child)?;
        }

        let next = match anchor {
            Some(a) => self.get(a).and_then(|v| v.next),
            None => self.get(parent).and_then(|v| v.container()).and_then(|c| c.first),
        };
        self.link_child(parent, child, anchor, next);
        Ok(())
    }

    /// Insert `child` before `anchor` (`None` appends at the back).
    pub fn insert_before(
        &mut self,
        parent: ViewId,
        anchor: Option<ViewId>,
        child: ViewId,
    ) -> ViewResult<()> {
        if self.guard_insert(parent, anchor, child)? {
            return Ok(());
        }
        if let Some(old) = self.parent_of(child) {
            self.detach_child(old, child)?;
        }

        let prev = match anchor {
            Some(a) => self.get(a).and_then(|v| v.prev),
            None => self.get(parent).and_then(|v| v.container()).and_then(|c| c.last),
        };
        self.link_child(parent, child, prev, anchor);
        Ok(())
    }

    /// Insert before the child at `index`; a negative or out-of-range index
    /// appends
    pub fn insert_before_index(
        &mut self,
        parent: ViewId,
        index: i32,
        child: ViewId,
    ) -> ViewResult<()> {
        if index < 0 {
            return self.insert_before(parent, None, child);
        }
        let anchor = self.child_by_index(parent, index);
        self.insert_before(parent, anchor, child)
    }

    fn link_child(
        &mut self,
        parent: ViewId,
        child: ViewId,
        prev: Option<ViewId>,
        next: Option<ViewId>,
    ) {
        if let Some(v) = self.get_mut(child) {
            v.prev = prev;
            v.next = next;
            v.parent = Some(parent);
        }
        if let Some(p) = prev {
            if let Some(v) = self.get_mut(p) {
                v.next = Some(child);
            }
        }
        if let Some(n) = next {
            if let Some(v) = self.get_mut(n) {
                v.prev = Some(child);
            }
        }
        if let Some(data) = self.get_mut(parent).and_then(View::container_mut) {
            if prev.is_none() {
                data.first = Some(child);
            }
            if next.is_none() {
                data.last = Some(child);
            }
            data.count += 1;
        }
    }

    /// Append `child` to `parent` and notify the parent's hooks
    pub fn attach(&mut self, child: ViewId, parent: ViewId) -> ViewResult<()> {
        self.insert_before(parent, None, child)?;
        if let Some(hooks) = self.hooks_of(parent) {
            hooks.on_child_attached(self, parent, child);
        }
        Ok(())
    }

    /// Unlink `child` from its parent and notify the parent's hooks
    pub fn detach(&mut self, child: ViewId) -> ViewResult<()> {
        let parent = self.parent_of(child).ok_or(TreeError::NoParent)?;
        self.detach_child(parent, child)?;
        if let Some(hooks) = self.hooks_of(parent) {
            hooks.on_child_detached(self, parent, child);
        }
        Ok(())
    }

    /// Unlink `child` in O(1) without destroying it.
    ///
    /// Clears the focused-child back-reference when it pointed at `child`.
    pub fn detach_child(&mut self, parent: ViewId, child: ViewId) -> ViewResult<()> {
        if !self.is_child(parent, child) {
            return Err(TreeError::NotAChild);
        }
        let (prev, next) = {
            let v = self.get(child).ok_or(TreeError::NoSuchView)?;
            (v.prev, v.next)
        };

        if let Some(p) = prev {
            if let Some(v) = self.get_mut(p) {
                v.next = next;
            }
        }
        if let Some(n) = next {
            if let Some(v) = self.get_mut(n) {
                v.prev = prev;
            }
        }
        if let Some(data) = self.get_mut(parent).and_then(View::container_mut) {
            if data.first == Some(child) {
                data.first = next;
            }
            if data.last == Some(child) {
                data.last = prev;
            }
            if data.focused == Some(child) {
                data.focused = None;
            }
            data.count -= 1;
        }
        if let Some(v) = self.get_mut(child) {
            v.parent = None;
            v.prev = None;
            v.next = None;
        }
        Ok(())
    }

    /// Detach `child` and destroy its subtree
    pub fn remove_child(&mut self, parent: ViewId, child: ViewId) -> ViewResult<()> {
        self.detach_child(parent, child)?;
        self.destroy_subtree(child);
        Ok(())
    }

    /// Destroy every child of `parent` and reset it to the empty state
    pub fn remove_all(&mut self, parent: ViewId) {
        let kids: Vec<ViewId> = self.children(parent).collect();
        for child in kids {
            self.destroy_subtree(child);
        }
        if let Some(data) = self.get_mut(parent).and_then(View::container_mut) {
            data.first = None;
            data.last = None;
            data.count = 0;
            data.focused = None;
        }
    }

    /// Destroy `view` and its subtree, detaching it from its parent first
    pub fn destroy(&mut self, view: ViewId) {
        if let Some(parent) = self.parent_of(view) {
            let _ = self.detach_child(parent, view);
        }
        self.destroy_subtree(view);
    }

    fn destroy_subtree(&mut self, view: ViewId) {
        let mut stack = vec![view];
        while let Some(v) = stack.pop() {
            stack.extend(self.children(v));
            if self.root == Some(v) {
                self.root = None;
            }
            let idx = v.0 as usize;
            if self.slots.get(idx).is_some_and(Option::is_some) {
                self.slots[idx] = None;
                self.free.push(v.0);
            }
        }
    }

    /// First child carrying `id`, in link order
    pub fn child_by_id(&self, parent: ViewId, id: i32) -> Option<ViewId> {
        self.children(parent)
            .find(|&c| self.get(c).is_some_and(|v| v.id == id))
    }

    /// First descendant carrying `id`, in document order
    pub fn find_descendant(&self, parent: ViewId, id: i32) -> Option<ViewId> {
        for child in self.children(parent) {
            let Some(v) = self.get(child) else { continue };
            if v.id == id {
                return Some(child);
            }
            if v.is_container() {
                if let Some(found) = self.find_descendant(child, id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Child at `index`, scanning from whichever end is nearer.
    ///
    /// A negative index yields the last child; an index past the end yields
    /// `None`.
    pub fn child_by_index(&self, parent: ViewId, index: i32) -> Option<ViewId> {
        let data = self.get(parent)?.container()?;
        if index < 0 {
            return data.last;
        }
        let index = index as usize;
        if index >= data.count {
            return None;
        }
        if index > data.count / 2 {
            self.children_rev(parent).nth(data.count - index - 1)
        } else {
            self.children(parent).nth(index)
        }
    }

    /// Position of `view` among the children of `parent`
    pub fn child_index(&self, parent: ViewId, view: ViewId) -> Option<usize> {
        if !self.is_child(parent, view) {
            return None;
        }
        self.children(parent).position(|c| c == view)
    }

    /// First child that is not disabled
    pub fn first_enabled_child(&self, parent: ViewId) -> Option<ViewId> {
        self.children(parent)
            .find(|&c| self.get(c).is_some_and(|v| !v.is_disabled()))
    }

    /// Hit test in `parent`'s local coordinates.
    ///
    /// Children are scanned back to front (later children paint on top);
    /// the point recurses into a matching container child translated into
    /// its local space. Returns `parent` itself when no child matches.
    pub fn child_at_point(&self, parent: ViewId, x: i32, y: i32) -> ViewId {
        for child in self.children_rev(parent) {
            let Some(v) = self.get(child) else { continue };
            if v.rect.contains(x, y) {
                if v.is_container() {
                    return self.child_at_point(child, x - v.rect.left, y - v.rect.top);
                }
                return child;
            }
        }
        parent
    }

    /// Grow `parent`'s rect to the bounding box of its children
    pub fn auto_fit_size(&mut self, parent: ViewId) {
        let mut rect = IntRect::default();
        for child in self.children(parent) {
            if let Some(v) = self.get(child) {
                rect = rect.union(&IntRect::new(0, 0, v.rect.right, v.rect.bottom));
            }
        }
        if let Some(v) = self.get_mut(parent) {
            v.rect = rect;
        }
    }

    // ---- style-affecting mutators --------------------------------------

    /// A style input of `view` changed; tell the parent's hooks
    pub(crate) fn notify_style_changed(&self, view: ViewId) {
        if let Some(parent) = self.parent_of(view) {
            if let Some(hooks) = self.hooks_of(parent) {
                hooks.on_child_style_changed(self, parent, view);
            }
        }
    }

    pub fn set_name(&mut self, view: ViewId, name: &str) -> bool {
        let changed = self.get_mut(view).is_some_and(|v| v.set_name(name));
        if changed {
            self.notify_style_changed(view);
        }
        changed
    }

    pub fn set_classes(&mut self, view: ViewId, classes: &str) -> bool {
        let changed = self.get_mut(view).is_some_and(|v| v.set_classes(classes));
        if changed {
            self.notify_style_changed(view);
        }
        changed
    }

    pub fn include_class(&mut self, view: ViewId, class: &str) -> bool {
        let changed = self.get_mut(view).is_some_and(|v| v.include_class(class));
        if changed {
            self.notify_style_changed(view);
        }
        changed
    }

    pub fn exclude_class(&mut self, view: ViewId, class: &str) -> bool {
        let changed = self.get_mut(view).is_some_and(|v| v.exclude_class(class));
        if changed {
            self.notify_style_changed(view);
        }
        changed
    }

    /// Set or clear a state flag.
    ///
    /// A change to a dynamic-pseudo-class flag on a view with dynamic rules
    /// notifies the parent's hooks so owners can re-resolve styles.
    pub fn set_flag(&mut self, view: ViewId, flag: ViewFlags, on: bool) {
        let Some(v) = self.get_mut(view) else { return };
        let before = v.flags;
        v.flags.set(flag, on);
        if before == v.flags {
            return;
        }
        let dynamic = ViewFlags::HOVER
            | ViewFlags::ACTIVE
            | ViewFlags::FOCUSED
            | ViewFlags::DISABLED
            | ViewFlags::CHECKED;
        if flag.intersects(dynamic) && self.get(view).is_some_and(View::has_dynamic_rules) {
            self.notify_style_changed(view);
        }
    }

    /// Resize `view`, notifying the parent's hooks on a size change
    pub fn set_view_rect(&mut self, view: ViewId, rect: IntRect) {
        let Some(v) = self.get_mut(view) else { return };
        let resized = v.rect.width() != rect.width() || v.rect.height() != rect.height();
        v.rect = rect;
        if resized {
            if let Some(parent) = self.parent_of(view) {
                if let Some(hooks) = self.hooks_of(parent) {
                    hooks.on_child_size_changed(self, parent, view);
                }
            }
        }
    }

    // ---- listeners and notifications -----------------------------------

    pub fn add_event_listener(&mut self, view: ViewId, listener: Rc<dyn EventListener>) {
        if let Some(v) = self.get_mut(view) {
            v.listeners.push(listener);
        }
    }

    /// Drop one registration of `listener`; releases exactly one reference
    pub fn remove_event_listener(
        &mut self,
        view: ViewId,
        listener: &Rc<dyn EventListener>,
    ) -> bool {
        let Some(v) = self.get_mut(view) else {
            return false;
        };
        match v.listeners.iter().position(|l| Rc::ptr_eq(l, listener)) {
            Some(at) => {
                v.listeners.remove(at);
                true
            }
            None => false,
        }
    }

    pub fn release_event_listeners(&mut self, view: ViewId) {
        if let Some(v) = self.get_mut(view) {
            v.listeners.clear();
        }
    }

    /// Deliver a notification to the view's listeners in registration
    /// order; a handled result stops delivery
    pub fn raise_event(&self, view: ViewId, notification: ViewNotification) -> bool {
        let Some(v) = self.get(view) else {
            return false;
        };
        let listeners: Vec<Rc<dyn EventListener>> = v.listeners.to_vec();
        let event = ViewEvent {
            notification,
            source: view,
        };
        for listener in listeners {
            if listener.on_event(&event) {
                return true;
            }
        }
        false
    }

    pub fn activate(&mut self, view: ViewId) {
        self.set_flag(view, ViewFlags::ACTIVE, true);
        self.raise_event(view, ViewNotification::Activated);
    }

    pub fn deactivate(&mut self, view: ViewId) {
        self.set_flag(view, ViewFlags::ACTIVE, false);
        self.raise_event(view, ViewNotification::Deactivated);
    }

    pub fn click(&self, view: ViewId) -> bool {
        self.raise_event(view, ViewNotification::Clicked)
    }

    pub fn double_click(&self, view: ViewId) -> bool {
        self.raise_event(view, ViewNotification::DoubleClicked)
    }
}

/// Iterator over the children of one container
pub struct Children<'a> {
    tree: &'a ViewTree,
    cur: Option<ViewId>,
    forward: bool,
}

impl Iterator for Children<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        let id = self.cur?;
        let v = self.tree.get(id);
        self.cur = if self.forward {
            v.and_then(|v| v.next)
        } else {
            v.and_then(|v| v.prev)
        };
        Some(id)
    }
}
