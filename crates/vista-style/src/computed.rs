//! Computed Style Snapshot
//!
//! One dense, wholesale-replaced snapshot per view. Resolution walks the
//! static bucket in specificity order, substitutes inherited values from the
//! parent snapshot, then runs the absolutization and validation passes.

use crate::declared::DeclaredGroup;
use crate::properties::{CssValue, Display, Float, Keyword, Length, Position, PropertyId};

/// Context for absolutizing relative values.
#[derive(Debug, Clone, Copy)]
pub struct AbsoluteContext {
    /// Font size em-relative lengths resolve against
    pub font_size: f32,
    /// Root font size rem-relative lengths resolve against
    pub root_font_size: f32,
}

impl Default for AbsoluteContext {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            root_font_size: 16.0,
        }
    }
}

/// The resolved property set of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    values: [CssValue; PropertyId::COUNT],
}

impl Default for ComputedStyle {
    fn default() -> Self {
        let mut values = [CssValue::Auto; PropertyId::COUNT];
        for pid in PropertyId::all() {
            values[pid.index()] = pid.initial();
        }
        Self { values }
    }
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, property: PropertyId) -> CssValue {
        self.values[property.index()]
    }

    #[inline]
    pub fn set(&mut self, property: PropertyId, value: CssValue) {
        self.values[property.index()] = value;
    }

    /// Resolve a fresh snapshot from the static declaration bucket.
    ///
    /// Declarations apply in bucket order; an `Inherit` value substitutes the
    /// parent's resolved value. A missing parent snapshot leaves the initial
    /// value in place: cascade resolution must run parent before child, and
    /// the caller reports the ordering violation.
    pub fn resolve(declared: &DeclaredGroup, parent: Option<&ComputedStyle>) -> Self {
        let mut computed = Self::default();

        for (style, _specificity) in declared.iter() {
            for (pid, value) in style.iter() {
                if value == CssValue::Inherit {
                    match parent {
                        Some(p) => computed.set(pid, p.get(pid)),
                        None => {
                            tracing::warn!(property = ?pid, "inherit without a resolved parent style");
                        }
                    }
                } else {
                    computed.set(pid, value);
                }
            }
        }

        computed
    }

    /// Fold font-relative lengths into device pixels.
    pub fn make_absolute(&mut self, ctx: &AbsoluteContext) {
        // Own font size resolves first so no other property depends on a
        // still-relative value.
        if let CssValue::Length(l) = self.get(PropertyId::FontSize) {
            if !l.is_absolute() {
                let px = l.to_px(ctx.font_size, ctx.root_font_size);
                self.set(PropertyId::FontSize, CssValue::Length(Length::px(px)));
            }
        }

        let font_size = self.font_size();
        for pid in PropertyId::all() {
            if pid == PropertyId::FontSize {
                continue;
            }
            if let CssValue::Length(l) = self.get(pid) {
                if !l.is_absolute() {
                    let px = l.to_px(font_size, ctx.root_font_size);
                    self.set(pid, CssValue::Length(Length::px(px)));
                }
            }
        }
    }

    /// Clamp or reset invalid combinations.
    pub fn validate(&mut self) {
        if let CssValue::Number(o) = self.get(PropertyId::Opacity) {
            self.set(PropertyId::Opacity, CssValue::Number(o.clamp(0.0, 1.0)));
        }

        match self.get(PropertyId::ZIndex) {
            CssValue::Integer(_) | CssValue::Auto => {}
            _ => self.set(PropertyId::ZIndex, PropertyId::ZIndex.initial()),
        }

        let non_negative = [
            PropertyId::Width,
            PropertyId::Height,
            PropertyId::PaddingTop,
            PropertyId::PaddingRight,
            PropertyId::PaddingBottom,
            PropertyId::PaddingLeft,
        ];
        for pid in non_negative {
            if let CssValue::Length(l) = self.get(pid) {
                if l.value < 0.0 {
                    self.set(pid, pid.initial());
                }
            }
        }

        if let CssValue::Number(lh) = self.get(PropertyId::LineHeight) {
            if lh < 0.0 {
                self.set(PropertyId::LineHeight, PropertyId::LineHeight.initial());
            }
        }
    }

    pub fn display(&self) -> Display {
        match self.get(PropertyId::Display) {
            CssValue::Keyword(Keyword::None) => Display::None,
            CssValue::Keyword(Keyword::Block) => Display::Block,
            CssValue::Keyword(Keyword::InlineBlock) => Display::InlineBlock,
            CssValue::Keyword(Keyword::ListItem) => Display::ListItem,
            _ => Display::Inline,
        }
    }

    pub fn position(&self) -> Position {
        match self.get(PropertyId::Position) {
            CssValue::Keyword(Keyword::Relative) => Position::Relative,
            CssValue::Keyword(Keyword::Absolute) => Position::Absolute,
            CssValue::Keyword(Keyword::Fixed) => Position::Fixed,
            _ => Position::Static,
        }
    }

    pub fn float(&self) -> Float {
        match self.get(PropertyId::Float) {
            CssValue::Keyword(Keyword::Left) => Float::Left,
            CssValue::Keyword(Keyword::Right) => Float::Right,
            _ => Float::None,
        }
    }

    /// Explicit z-index, or None when kept as auto
    pub fn z_index(&self) -> Option<i32> {
        match self.get(PropertyId::ZIndex) {
            CssValue::Integer(z) => Some(z),
            _ => None,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self.get(PropertyId::Opacity) {
            CssValue::Number(o) => o,
            _ => 1.0,
        }
    }

    pub fn font_size(&self) -> f32 {
        match self.get(PropertyId::FontSize) {
            CssValue::Length(l) if l.is_absolute() => l.value,
            _ => 16.0,
        }
    }

    #[inline]
    pub fn is_positioned(&self) -> bool {
        self.position().is_positioned()
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.position() == Position::Fixed
    }

    #[inline]
    pub fn is_floated(&self) -> bool {
        self.float().is_floated()
    }
}
