//! Decorative particle field
//!
//! Bulk-generated once at scene construction from the seeded RNG and
//! immutable afterwards. Purely presentational: the driver turns these
//! descriptors into styled DOM nodes a single time.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;

/// Glyphs a snowflake can render as
pub const SNOW_SYMBOLS: [&str; 6] = ["\u{2744}", "\u{2745}", "\u{2746}", "\u{273b}", "\u{273c}", "\u{2749}"];

/// Bulb colors for the tree lights
pub const LIGHT_COLORS: [&str; 6] = [
    "#ff0000", "#00ff00", "#ffdd00", "#ff00ff", "#00ffff", "#ff6600",
];

/// Symbols for the floating emoji layer
pub const EMOJI_SYMBOLS: [&str; 8] = ["🎄", "🎅", "🎁", "⭐", "🦌", "🔔", "🎀", "🍪"];

/// A falling snowflake descriptor
#[derive(Debug, Clone, Serialize)]
pub struct Snowflake {
    pub id: u32,
    /// Horizontal position, percent of field width
    pub left: f32,
    /// Fall animation duration, seconds
    pub duration: f32,
    /// Animation start delay, seconds
    pub delay: f32,
    /// Glyph size, pixels
    pub size: f32,
    pub symbol: &'static str,
}

/// A twinkling star descriptor (upper band of the sky)
#[derive(Debug, Clone, Serialize)]
pub struct Star {
    pub id: u32,
    pub left: f32,
    pub top: f32,
    pub delay: f32,
}

/// One bulb on the tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeLight {
    pub id: u32,
    pub left: f32,
    pub top: f32,
    pub delay: f32,
    pub color: &'static str,
}

/// A drifting background emoji descriptor
#[derive(Debug, Clone, Serialize)]
pub struct FloatingEmoji {
    pub id: u32,
    pub left: f32,
    pub duration: f32,
    pub delay: f32,
    pub symbol: &'static str,
}

/// The complete static decorative field
#[derive(Debug, Clone, Serialize)]
pub struct DecorField {
    pub snowflakes: Vec<Snowflake>,
    pub stars: Vec<Star>,
    pub tree_lights: Vec<TreeLight>,
    pub floating_emojis: Vec<FloatingEmoji>,
}

impl DecorField {
    /// Generate the whole field from the scene RNG
    pub fn generate(rng: &mut Pcg32) -> Self {
        Self {
            snowflakes: (0..SNOWFLAKE_COUNT as u32)
                .map(|id| Snowflake {
                    id,
                    left: rng.random_range(0.0..100.0),
                    duration: rng.random_range(5.0..15.0),
                    delay: rng.random_range(0.0..10.0),
                    size: rng.random_range(10.0..30.0),
                    symbol: SNOW_SYMBOLS[rng.random_range(0..SNOW_SYMBOLS.len())],
                })
                .collect(),
            stars: (0..STAR_COUNT as u32)
                .map(|id| Star {
                    id,
                    left: rng.random_range(0.0..100.0),
                    top: rng.random_range(0.0..40.0),
                    delay: rng.random_range(0.0..3.0),
                })
                .collect(),
            tree_lights: (0..TREE_LIGHT_COUNT as u32)
                .map(|id| TreeLight {
                    id,
                    left: rng.random_range(20.0..80.0),
                    top: rng.random_range(10.0..80.0),
                    delay: rng.random_range(0.0..2.0),
                    color: LIGHT_COLORS[rng.random_range(0..LIGHT_COLORS.len())],
                })
                .collect(),
            floating_emojis: (0..FLOATING_EMOJI_COUNT as u32)
                .map(|id| FloatingEmoji {
                    id,
                    left: rng.random_range(0.0..100.0),
                    duration: rng.random_range(10.0..20.0),
                    delay: rng.random_range(0.0..15.0),
                    symbol: EMOJI_SYMBOLS[rng.random_range(0..EMOJI_SYMBOLS.len())],
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_family_sizes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = DecorField::generate(&mut rng);
        assert_eq!(field.snowflakes.len(), SNOWFLAKE_COUNT);
        assert_eq!(field.stars.len(), STAR_COUNT);
        assert_eq!(field.tree_lights.len(), TREE_LIGHT_COUNT);
        assert_eq!(field.floating_emojis.len(), FLOATING_EMOJI_COUNT);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = DecorField::generate(&mut rng);
        for (i, flake) in field.snowflakes.iter().enumerate() {
            assert_eq!(flake.id, i as u32);
        }
        for (i, star) in field.stars.iter().enumerate() {
            assert_eq!(star.id, i as u32);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        let fa = DecorField::generate(&mut a);
        let fb = DecorField::generate(&mut b);
        for (x, y) in fa.snowflakes.iter().zip(&fb.snowflakes) {
            assert_eq!(x.left, y.left);
            assert_eq!(x.symbol, y.symbol);
        }
    }

    proptest! {
        #[test]
        fn prop_placement_bounds_and_palettes(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let field = DecorField::generate(&mut rng);

            for f in &field.snowflakes {
                prop_assert!((0.0..100.0).contains(&f.left));
                prop_assert!((5.0..15.0).contains(&f.duration));
                prop_assert!((0.0..10.0).contains(&f.delay));
                prop_assert!((10.0..30.0).contains(&f.size));
                prop_assert!(SNOW_SYMBOLS.contains(&f.symbol));
            }
            for s in &field.stars {
                prop_assert!((0.0..100.0).contains(&s.left));
                prop_assert!((0.0..40.0).contains(&s.top));
                prop_assert!((0.0..3.0).contains(&s.delay));
            }
            for l in &field.tree_lights {
                prop_assert!((20.0..80.0).contains(&l.left));
                prop_assert!((10.0..80.0).contains(&l.top));
                prop_assert!((0.0..2.0).contains(&l.delay));
                prop_assert!(LIGHT_COLORS.contains(&l.color));
            }
            for e in &field.floating_emojis {
                prop_assert!((0.0..100.0).contains(&e.left));
                prop_assert!((10.0..20.0).contains(&e.duration));
                prop_assert!((0.0..15.0).contains(&e.delay));
                prop_assert!(EMOJI_SYMBOLS.contains(&e.symbol));
            }
        }
    }
}
