//! Vista View - Retained-Mode View Tree
//!
//! An arena-backed tree of visual nodes carrying style classes, attributes,
//! matched style declarations and UI state flags. The tree drives cascade
//! resolution top-down and exposes the hit-testing, focus and paint
//! contracts the rest of the toolkit builds on.

mod cascade;
mod events;
mod flags;
mod focus;
mod geometry;
mod paint;
mod pseudo;
mod tree;
mod view;

pub use cascade::Selector;
pub use events::{ContainerHooks, EventListener, ViewEvent, ViewNotification};
pub use flags::ViewFlags;
pub use geometry::IntRect;
pub use paint::PaintContext;
pub use pseudo::PseudoClass;
pub use tree::{TreeError, ViewTree};
pub use view::{ContainerData, View, ViewKind};

/// View identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub(crate) u32);

/// Result type for tree operations
pub type ViewResult<T> = Result<T, TreeError>;
