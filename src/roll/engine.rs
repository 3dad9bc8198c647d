//! Roll mechanics and outcome classification.

use parking_lot::Mutex;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use tracing::{info, trace};

use super::outcome::{Outcome, RollResult};
use super::source::DiceSource;

const ACTION_DIE_SIDES: u8 = 6;
const CHALLENGE_DIE_SIDES: u8 = 10;

/// Classify a roll from the action score and the two challenge dice.
///
/// Each challenge die is compared independently and only a strictly greater
/// total beats it; a tie is a loss.
pub fn determine_outcome(total: i128, challenge_dice: [u8; 2]) -> Outcome {
    let wins = challenge_dice
        .iter()
        .filter(|&&die| total > i128::from(die))
        .count();
    let is_double = challenge_dice[0] == challenge_dice[1];

    match (wins, is_double) {
        (2, true) => Outcome::CriticalSuccess,
        (2, false) => Outcome::Success,
        (1, _) => Outcome::PartialSuccess,
        (0, true) => Outcome::CriticalFailure,
        (0, false) => Outcome::Failure,
        _ => unreachable!("{} wins against two challenge dice", wins),
    }
}

/// Perform one roll, drawing the action die then both challenge dice from `source`.
pub fn roll_with<S: DiceSource + ?Sized>(source: &mut S, modifier: i64) -> RollResult {
    let action_die = source.next_in_range(1, ACTION_DIE_SIDES);
    let challenge_dice = [
        source.next_in_range(1, CHALLENGE_DIE_SIDES),
        source.next_in_range(1, CHALLENGE_DIE_SIDES),
    ];

    let total = i128::from(action_die) + i128::from(modifier);
    let outcome = determine_outcome(total, challenge_dice);

    RollResult {
        action_die,
        modifier,
        challenge_dice,
        total,
        outcome,
    }
}

/// Perform one roll using the thread-local generator.
pub fn roll(modifier: i64) -> RollResult {
    roll_with(&mut rand::thread_rng(), modifier)
}

/// A roll engine that owns its dice source.
///
/// The source sits behind a lock so one engine can be shared across request
/// tasks. All three dice of a roll are drawn under a single lock hold.
pub struct RollEngine<S = StdRng> {
    source: Mutex<S>,
}

impl RollEngine<StdRng> {
    /// Create an engine seeded from the operating system's CSPRNG.
    ///
    /// The seed is logged so a misbehaving sequence can be replayed with
    /// [`RollEngine::seeded`].
    pub fn from_entropy() -> Self {
        let seed = OsRng.next_u64();
        info!(seed = seed, "Dice source initialized");
        Self::seeded(seed)
    }

    /// Create an engine with a fixed seed. The same seed always yields the
    /// same sequence of results.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(StdRng::seed_from_u64(seed))
    }
}

impl<S: DiceSource> RollEngine<S> {
    /// Create an engine around any dice source.
    pub fn with_source(source: S) -> Self {
        Self {
            source: Mutex::new(source),
        }
    }

    /// Roll with the given modifier.
    pub fn roll(&self, modifier: i64) -> RollResult {
        let result = {
            let mut source = self.source.lock();
            roll_with(&mut *source, modifier)
        };

        trace!(
            action_die = result.action_die,
            modifier = result.modifier,
            challenge = ?result.challenge_dice,
            outcome = %result.outcome,
            "Rolled"
        );

        result
    }
}

impl Default for RollEngine<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of die values.
    struct ScriptedDice(VecDeque<u8>);

    impl ScriptedDice {
        fn new(values: &[u8]) -> Self {
            Self(values.iter().copied().collect())
        }
    }

    impl DiceSource for ScriptedDice {
        fn next_in_range(&mut self, _low: u8, _high: u8) -> u8 {
            self.0.pop_front().expect("script exhausted")
        }
    }

    #[test]
    fn test_determine_outcome_table() {
        let cases = [
            ("critical success", 3, [2, 2], Outcome::CriticalSuccess),
            ("success", 3, [1, 2], Outcome::Success),
            ("partial success", 6, [5, 7], Outcome::PartialSuccess),
            ("critical failure", 5, [8, 8], Outcome::CriticalFailure),
            ("failure", 5, [9, 10], Outcome::Failure),
            ("equality counts as loss", 5, [5, 6], Outcome::Failure),
        ];

        for (name, total, challenge, want) in cases {
            assert_eq!(determine_outcome(total, challenge), want, "{}", name);
        }
    }

    #[test]
    fn test_split_dice_give_partial_success() {
        assert_eq!(determine_outcome(8, [7, 9]), Outcome::PartialSuccess);
        assert_eq!(determine_outcome(8, [9, 7]), Outcome::PartialSuccess);
    }

    #[test]
    fn test_extreme_modifiers() {
        let mut dice = ScriptedDice::new(&[6, 10, 10]);
        let result = roll_with(&mut dice, i64::MAX);
        assert_eq!(result.total, i128::from(i64::MAX) + 6);
        assert_eq!(result.outcome, Outcome::CriticalSuccess);

        let mut dice = ScriptedDice::new(&[1, 1, 2]);
        let result = roll_with(&mut dice, i64::MIN);
        assert_eq!(result.total, i128::from(i64::MIN) + 1);
        assert_eq!(result.outcome, Outcome::Failure);
    }

    #[test]
    fn test_roll_draws_action_die_first() {
        let mut dice = ScriptedDice::new(&[4, 7, 2]);
        let result = roll_with(&mut dice, -1);

        assert_eq!(result.action_die, 4);
        assert_eq!(result.challenge_dice, [7, 2]);
        assert_eq!(result.total, 3);
        assert_eq!(result.outcome, Outcome::PartialSuccess);
    }

    #[test]
    fn test_roll_produces_consistent_result() {
        let engine = RollEngine::seeded(42);

        for modifier in -5..=5 {
            let result = engine.roll(modifier);

            assert_eq!(
                result.total,
                i128::from(result.action_die) + i128::from(result.modifier)
            );
            assert!((1..=6).contains(&result.action_die));
            for die in result.challenge_dice {
                assert!((1..=10).contains(&die));
            }
            assert_eq!(
                result.outcome,
                determine_outcome(result.total, result.challenge_dice)
            );
        }
    }

    #[test]
    fn test_seeded_engines_repeat() {
        let first = RollEngine::seeded(12345);
        let second = RollEngine::seeded(12345);

        let seq1: Vec<RollResult> = (0..20).map(|i| first.roll(i % 4 - 2)).collect();
        let seq2: Vec<RollResult> = (0..20).map(|i| second.roll(i % 4 - 2)).collect();

        assert_eq!(seq1, seq2);
    }

    #[test]
    fn test_every_face_is_reachable() {
        let engine = RollEngine::seeded(2024);
        let mut action_seen = [false; 6];
        let mut challenge_seen = [false; 10];

        for _ in 0..2000 {
            let result = engine.roll(0);
            action_seen[usize::from(result.action_die) - 1] = true;
            for die in result.challenge_dice {
                challenge_seen[usize::from(die) - 1] = true;
            }
        }

        assert!(action_seen.iter().all(|&seen| seen));
        assert!(challenge_seen.iter().all(|&seen| seen));
    }

    #[test]
    fn test_convenience_roll_respects_ranges() {
        for _ in 0..100 {
            let result = roll(3);
            assert_eq!(result.modifier, 3);
            assert!((1..=6).contains(&result.action_die));
        }
    }

    #[test]
    fn test_entropy_engine_rolls() {
        let engine = RollEngine::from_entropy();
        let result = engine.roll(0);
        assert!((1..=6).contains(&result.action_die));
    }
}
