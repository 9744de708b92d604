//! CSS Box Model

/// Content rect plus the three edge rings of one box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxDimensions {
    pub content: Rect,
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
    pub margin: EdgeSizes,
}

/// Rectangle in layout units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn expanded(&self, edges: EdgeSizes) -> Rect {
        Rect {
            x: self.x - edges.left,
            y: self.y - edges.top,
            width: self.width + edges.left + edges.right,
            height: self.height + edges.top + edges.bottom,
        }
    }
}

/// Per-edge sizes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl BoxDimensions {
    /// Content plus padding
    pub fn padding_box(&self) -> Rect {
        self.content.expanded(self.padding)
    }

    /// Content plus padding plus border
    pub fn border_box(&self) -> Rect {
        self.padding_box().expanded(self.border)
    }

    /// The full area the box occupies
    pub fn margin_box(&self) -> Rect {
        self.border_box().expanded(self.margin)
    }
}
