//! Notifications, Listeners & Container Hooks
//!
//! Views notify registered listeners of focus/activation/click changes;
//! containers expose overridable lifecycle hooks for concrete widget kinds.

use crate::geometry::IntRect;
use crate::tree::ViewTree;
use crate::ViewId;

/// Outward notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewNotification {
    GotFocus,
    LostFocus,
    Activated,
    Deactivated,
    Clicked,
    DoubleClicked,
}

/// A notification raised by a view
#[derive(Debug, Clone, Copy)]
pub struct ViewEvent {
    pub notification: ViewNotification,
    pub source: ViewId,
}

/// Receiver of view notifications.
///
/// Listeners are shared (`Rc`) between the view and the registering code;
/// delivery is in registration order and returning `true` (handled) stops
/// delivery for that event instance.
pub trait EventListener {
    fn on_event(&self, event: &ViewEvent) -> bool;
}

/// Lifecycle hooks a container owner may install.
///
/// All hooks default to no-ops and run after the mutation has committed;
/// the tree is borrowed immutably.
pub trait ContainerHooks {
    fn on_child_attached(&self, _tree: &ViewTree, _parent: ViewId, _child: ViewId) {}

    fn on_child_detached(&self, _tree: &ViewTree, _parent: ViewId, _child: ViewId) {}

    fn on_child_style_changed(&self, _tree: &ViewTree, _parent: ViewId, _child: ViewId) {}

    fn on_child_size_changed(&self, _tree: &ViewTree, _parent: ViewId, _child: ViewId) {}

    /// A descendant requested a repaint of `invalid`, given in the
    /// receiving container's coordinate space
    fn on_child_update_view(&self, _tree: &ViewTree, _child: ViewId, _invalid: IntRect) {}
}
