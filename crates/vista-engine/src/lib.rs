//! Vista Engine
//!
//! Ties the view tree, style rules and box tree together and drives the
//! restyle/reflow pipeline: apply rules, resolve the cascade top-down,
//! regenerate boxes and stacking contexts, run the layout pass.
//!
//! # Example
//! ```rust
//! use vista_engine::{SimpleSelector, Toolkit};
//! use vista_style::{CssValue, DeclaredStyle, Keyword, PropertyId};
//!
//! let mut toolkit = Toolkit::new();
//! let root = toolkit.tree_mut().create_container("panel", "root", 1);
//! toolkit.tree_mut().set_root(root);
//!
//! let mut style = DeclaredStyle::new();
//! style.set(PropertyId::Display, CssValue::Keyword(Keyword::Block));
//! toolkit.add_rule(style, SimpleSelector::parse(".panel").unwrap());
//!
//! toolkit.apply_styles();
//! toolkit.refresh();
//! assert!(toolkit.boxes().root().is_some());
//! ```

mod selector;
mod toolkit;

pub use selector::SimpleSelector;
pub use toolkit::Toolkit;

// Re-export sub-crates for direct access
pub use vista_layout as layout;
pub use vista_style as style;
pub use vista_view as view;
