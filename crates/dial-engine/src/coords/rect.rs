use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Rectangle of `size` whose center sits at `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_center_size_round_trips_center() {
        let r = Rect::from_center_size(Vec2::new(500.0, 400.0), Vec2::new(720.0, 720.0));
        assert_eq!(r.origin, Vec2::new(140.0, 40.0));
        assert_eq!(r.center(), Vec2::new(500.0, 400.0));
        assert_eq!((r.width(), r.height()), (720.0, 720.0));
    }
}
