//! Ironsworn action roll.
//!
//! A roll is one action die (1d6) plus a modifier, compared independently
//! against two challenge dice (1d10 each). This module holds pure domain
//! logic only and knows nothing about HTTP, chat bots, or rate limits.

mod engine;
mod outcome;
mod source;

pub use engine::{determine_outcome, roll, roll_with, RollEngine};
pub use outcome::{Outcome, RollResult};
pub use source::DiceSource;
