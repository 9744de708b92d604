//! Vista Layout - Box Generation
//!
//! Converts resolved styles into a tree of layout boxes: block and inline
//! formatting contexts, synthesized anonymous wrappers, float routing and
//! stacking contexts. The numeric box-model pass consumes this tree.

mod box_model;
mod box_tree;
mod builder;
mod layout;
mod stacking;

pub use box_model::{BoxDimensions, EdgeSizes, Rect};
pub use box_tree::{BoxId, BoxKind, BoxTree, CssBox};
pub use stacking::StackingContext;
