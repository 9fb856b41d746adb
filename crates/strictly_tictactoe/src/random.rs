//! Random source for the first-turn draw.

use crate::phases::{HUMAN, ROBOT};
use crate::types::Player;
use rand::Rng;
use tracing::{debug, instrument};

/// Lowest value of the first-turn draw.
pub const DRAW_MIN: u32 = 1;

/// Highest value of the first-turn draw.
pub const DRAW_MAX: u32 = 10;

/// Source of uniform integers, injected so tests can fix the draw.
pub trait RandomSource {
    /// Returns an integer uniformly drawn from `min..=max`.
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32;
}

/// Random source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        (**self).int_inclusive(min, max)
    }
}

/// Picks who moves first: draws from `1..=10`, above the midpoint the human starts.
#[instrument(skip(random))]
pub fn pick_first_player(random: &mut impl RandomSource) -> Player {
    let draw = random.int_inclusive(DRAW_MIN, DRAW_MAX);
    let first = if draw > (DRAW_MIN + DRAW_MAX) / 2 {
        HUMAN
    } else {
        ROBOT
    };
    debug!(draw, ?first, "First player drawn");
    first
}
