use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Stroked line segment payload with butt caps.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke width in logical pixels, centered on the segment.
    pub width: f32,
    pub color: Color,
}

impl LineCmd {
    #[inline]
    pub fn new(from: Vec2, to: Vec2, width: f32, color: Color) -> Self {
        Self {
            from,
            to,
            width,
            color,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Zero-length or zero-width segments draw nothing.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0) || !(self.length() > 0.0)
    }
}

impl DrawList {
    /// Records a stroked segment from `from` to `to`.
    #[inline]
    pub fn push_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(DrawCmd::Line(LineCmd::new(from, to, width, color)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_segments() {
        let c = Color::BLACK;
        assert!(LineCmd::new(Vec2::zero(), Vec2::zero(), 1.0, c).is_degenerate());
        assert!(LineCmd::new(Vec2::zero(), Vec2::new(1.0, 0.0), 0.0, c).is_degenerate());
        assert!(LineCmd::new(Vec2::zero(), Vec2::new(1.0, 0.0), f32::NAN, c).is_degenerate());
        assert!(!LineCmd::new(Vec2::zero(), Vec2::new(3.0, 4.0), 1.0, c).is_degenerate());
    }
}
