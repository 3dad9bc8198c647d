//! Roll outcome categories and the result value.

use serde::Serialize;
use std::fmt;

/// Final category of an Ironsworn roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Outcome {
    /// Both challenge dice beaten and showing the same value
    CriticalSuccess,
    /// Both challenge dice beaten
    Success,
    /// Exactly one challenge die beaten
    PartialSuccess,
    /// Neither challenge die beaten
    Failure,
    /// Neither challenge die beaten and both showing the same value
    CriticalFailure,
}

impl Outcome {
    /// Human-readable name, suitable for direct display in chat.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::CriticalSuccess => "Critical Success",
            Outcome::Success => "Success",
            Outcome::PartialSuccess => "Partial Success",
            Outcome::Failure => "Failure",
            Outcome::CriticalFailure => "Critical Failure",
        }
    }
}

impl From<Outcome> for &'static str {
    fn from(outcome: Outcome) -> Self {
        outcome.as_str()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full dice breakdown of a single roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollResult {
    /// The 1d6 action die
    pub action_die: u8,
    /// Modifier supplied by the caller
    pub modifier: i64,
    /// The two 1d10 challenge dice, in draw order
    pub challenge_dice: [u8; 2],
    /// Action die plus modifier
    pub total: i128,
    /// Outcome derived from `total` and `challenge_dice`
    pub outcome: Outcome,
}
