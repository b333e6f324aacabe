//! Colour types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A floating point RGB colour with components nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Rgb {
    /// Plain grey given to every loop when colouring is not randomised.
    pub const PLAIN: Self = Self::new(0.7, 0.7, 0.7);

    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new colour from its components.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation towards `other`; `t = 0` gives `self`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Component-wise average of two colours.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new(
            (self.r + other.r) / 2.0,
            (self.g + other.g) / 2.0,
            (self.b + other.b) / 2.0,
        )
    }

    /// Quantise to 8 bits per channel, truncating.
    #[must_use]
    pub fn to_vertex_color(&self) -> VertexColor {
        VertexColor::from_float(self.r, self.g, self.b)
    }
}

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl VertexColor {
    /// Create a new color from RGB components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from floating point values in [0, 1] range.
    ///
    /// Values are clamped, scaled by 255 and truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::VertexColor;
    ///
    /// let color = VertexColor::from_float(1.0, 0.5, 0.0);
    /// assert_eq!(color.r, 255);
    /// assert_eq!(color.g, 127);
    /// assert_eq!(color.b, 0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_float(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
        }
    }

    /// The components as an array, in file order.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_hits_both_ends() {
        let a = Rgb::new(0.0, 0.2, 1.0);
        let b = Rgb::new(1.0, 0.4, 0.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        let end = a.lerp(&b, 1.0);
        assert_relative_eq!(end.r, b.r);
        assert_relative_eq!(end.g, b.g);
        assert_relative_eq!(end.b, b.b);
    }

    #[test]
    fn midpoint_averages() {
        let mid = Rgb::new(0.0, 0.2, 1.0).midpoint(&Rgb::new(1.0, 0.4, 0.0));
        assert_relative_eq!(mid.r, 0.5);
        assert_relative_eq!(mid.g, 0.3);
        assert_relative_eq!(mid.b, 0.5);
    }

    #[test]
    fn quantisation_truncates() {
        let color = Rgb::new(0.999, 0.5, 0.003_92).to_vertex_color();
        assert_eq!(color, VertexColor::new(254, 127, 0));
    }

    #[test]
    fn quantisation_clamps() {
        let color = VertexColor::from_float(-0.5, 1.5, 0.0);
        assert_eq!(color.to_array(), [0, 255, 0]);
    }
}
