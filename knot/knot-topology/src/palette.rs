//! Per-loop colours.

use mesh_types::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of one colour per traced loop.
///
/// A colour seed of zero gives every loop [`Rgb::PLAIN`]; any other seed
/// draws reproducible random colours.
#[derive(Debug, Clone)]
pub struct LoopPalette {
    rng: Option<StdRng>,
}

impl LoopPalette {
    /// Palette for `colour_seed`.
    #[must_use]
    pub fn new(colour_seed: u32) -> Self {
        let rng = (colour_seed != 0).then(|| StdRng::seed_from_u64(u64::from(colour_seed)));
        Self { rng }
    }

    /// Whether loops get random colours.
    #[must_use]
    pub fn is_random(&self) -> bool {
        self.rng.is_some()
    }

    /// Colour for the next loop.
    pub fn next_color(&mut self) -> Rgb {
        match self.rng.as_mut() {
            Some(rng) => {
                let mut channel = || f32::from(rng.gen_range(0u8..255)) / 255.0;
                let r = channel();
                let g = channel();
                let b = channel();
                Rgb::new(r, g, b)
            }
            None => Rgb::PLAIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_plain() {
        let mut palette = LoopPalette::new(0);
        assert!(!palette.is_random());
        assert_eq!(palette.next_color(), Rgb::PLAIN);
        assert_eq!(palette.next_color(), Rgb::PLAIN);
    }

    #[test]
    fn seeded_colours_repeat() {
        let mut a = LoopPalette::new(17);
        let mut b = LoopPalette::new(17);
        assert!(a.is_random());
        for _ in 0..8 {
            let color = a.next_color();
            assert_eq!(color, b.next_color());
            for channel in [color.r, color.g, color.b] {
                assert!((0.0..1.0).contains(&channel));
            }
        }
    }
}
