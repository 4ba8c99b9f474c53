//! The square drawing region the face is laid out on.

use dial_engine::coords::{Rect, Vec2, Viewport};

use crate::geometry::Scale;

/// Share of the viewport's shorter side the canvas covers.
pub const DEFAULT_FILL: f32 = 0.9;

/// A `size × size` square in window logical pixels, centered in the viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Canvas {
    rect: Rect,
}

impl Canvas {
    /// Fits a canvas of `min(width, height) × fill` into `viewport`.
    ///
    /// Returns `None` for an empty or non-finite viewport, or a fill that
    /// leaves nothing to draw on.
    pub fn fit(viewport: Viewport, fill: f32) -> Option<Self> {
        if !viewport.is_valid() || !(fill > 0.0) || !fill.is_finite() {
            return None;
        }
        let size = viewport.min_side() * fill;
        let center = Vec2::new(viewport.width * 0.5, viewport.height * 0.5);
        Some(Self {
            rect: Rect::from_center_size(center, Vec2::new(size, size)),
        })
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.rect.width()
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Design-unit scale for this canvas.
    #[inline]
    pub fn scale(&self) -> Scale {
        Scale::for_width(self.size())
    }
}
