//! Direction markers and grid orientation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which way a strand passes through a tile corner or tile centre.
///
/// A fresh grid is filled with [`TileDirection::Cross`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileDirection {
    /// No strand; the corner or centre is never traversed.
    Invalid,
    /// Diagonal passage, flipping every axis.
    #[default]
    Cross,
    /// Along the x axis.
    Horizontal,
    /// Along the y axis.
    Vertical,
    /// Along the z axis. Only meaningful in three dimensions.
    Longitudinal,
}

impl TileDirection {
    /// Axes this direction moves along, as a bit mask (x = 1, y = 2, z = 4),
    /// in a grid of `dims` dimensions.
    ///
    /// Returns `None` for [`Invalid`](Self::Invalid) and for axes the grid
    /// does not have.
    ///
    /// # Example
    ///
    /// ```
    /// use knot_topology::TileDirection;
    ///
    /// assert_eq!(TileDirection::Vertical.axis_mask(2), Some(0b10));
    /// assert_eq!(TileDirection::Cross.axis_mask(3), Some(0b111));
    /// assert_eq!(TileDirection::Longitudinal.axis_mask(2), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn axis_mask(self, dims: usize) -> Option<u8> {
        let mask: u8 = match self {
            Self::Invalid => return None,
            Self::Cross => return Some(((1u16 << dims) - 1) as u8),
            Self::Horizontal => 0b001,
            Self::Vertical => 0b010,
            Self::Longitudinal => 0b100,
        };
        if (mask as u16) < (1u16 << dims) {
            Some(mask)
        } else {
            None
        }
    }

    /// Whether a strand passes here.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Which pair of grid edges the strands run parallel to in two dimensions.
///
/// With [`Horizontal`](Self::Horizontal) the strands bounce off the top and
/// bottom edges and run along the left and right ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Rows of horizontal strands along the top and bottom.
    #[default]
    Horizontal,
    /// Columns of vertical strands along the left and right.
    Vertical,
}

impl Orientation {
    /// Integer code used in saved settings.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Horizontal => 1,
            Self::Vertical => 2,
        }
    }

    /// Parse a settings code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Horizontal),
            2 => Some(Self::Vertical),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_in_two_dimensions() {
        assert_eq!(TileDirection::Horizontal.axis_mask(2), Some(1));
        assert_eq!(TileDirection::Cross.axis_mask(2), Some(3));
        assert_eq!(TileDirection::Invalid.axis_mask(2), None);
    }

    #[test]
    fn longitudinal_needs_a_third_axis() {
        assert_eq!(TileDirection::Longitudinal.axis_mask(3), Some(4));
        assert_eq!(TileDirection::Longitudinal.axis_mask(2), None);
    }

    #[test]
    fn default_is_cross() {
        assert_eq!(TileDirection::default(), TileDirection::Cross);
        assert!(TileDirection::default().is_valid());
        assert!(!TileDirection::Invalid.is_valid());
    }

    #[test]
    fn orientation_codes() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            assert_eq!(Orientation::from_code(orientation.code()), Some(orientation));
        }
        assert_eq!(Orientation::from_code(0), None);
    }
}
