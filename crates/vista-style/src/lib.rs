//! Vista Style - Property Model & Cascade
//!
//! Declared and computed styles for the view tree. Selector matching and
//! property-value parsing live outside this crate; matched declarations
//! arrive as opaque property-value maps with a specificity weight.

mod computed;
mod declared;
mod properties;

pub use computed::{AbsoluteContext, ComputedStyle};
pub use declared::{DeclaredGroup, DeclaredStyle, SelectorMatch, Specificity};
pub use properties::{CssValue, Display, Float, Keyword, Length, LengthUnit, Position, PropertyId};
