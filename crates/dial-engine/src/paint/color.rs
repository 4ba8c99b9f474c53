/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are already multiplied by `a`. Renderers blend
/// with `One, OneMinusSrcAlpha`, which assumes exactly that.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_is_rgba_order() {
        let c = Color::from_premul(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn constants_are_opaque() {
        assert_eq!(Color::BLACK.a, 1.0);
        assert_eq!(Color::WHITE.to_array(), [1.0; 4]);
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(Color::BLACK.is_finite());
        assert!(!Color::from_premul(f32::NAN, 0.0, 0.0, 1.0).is_finite());
    }
}
