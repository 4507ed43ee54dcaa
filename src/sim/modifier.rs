//! Score modifier collectables
//!
//! A collectable carries a signed score delta. Its color tells players what
//! they are about to grab: green for a bonus, pink for a penalty.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreModifier {
    pub value: i32,
}

impl Default for ScoreModifier {
    fn default() -> Self {
        Self { value: 1 }
    }
}

impl ScoreModifier {
    /// Tint for a modifier value; zero gets the neutral sprite color
    pub fn color_for(value: i32) -> Color {
        match value.signum() {
            1 => Color::GREEN,
            -1 => Color::DEEP_PINK,
            _ => Color::WHITE,
        }
    }

    /// Uniform pick from the configured roll set (+1 when the set is empty)
    pub fn roll<R: Rng + ?Sized>(values: &[i32], rng: &mut R) -> i32 {
        values.choose(rng).copied().unwrap_or(1)
    }
}
