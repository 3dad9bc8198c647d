//! Sources of dice values.

use rand::Rng;

/// Anything that can produce the next die value in an inclusive range.
///
/// Every [`rand::Rng`] is a dice source, so a seeded `StdRng` gives a fully
/// reproducible sequence of rolls.
pub trait DiceSource {
    /// Draw the next value uniformly from `low..=high`.
    fn next_in_range(&mut self, low: u8, high: u8) -> u8;
}

impl<R: Rng> DiceSource for R {
    fn next_in_range(&mut self, low: u8, high: u8) -> u8 {
        self.gen_range(low..=high)
    }
}
