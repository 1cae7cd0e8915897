//! Boss satisfaction score and round counter.
//!
//! Both are small newtypes that are valid by construction: a [`Satisfaction`]
//! can never leave `[MIN_SCORE, MAX_SCORE]` and a [`Round`] never drops below 1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest satisfaction the boss can have.
pub const MIN_SCORE: i32 = 0;

/// Satisfaction at which the player wins.
pub const MAX_SCORE: i32 = 100;

/// Number of rounds in a game. A selection made in this round ends the game.
pub const MAX_ROUNDS: u32 = 10;

/// Boss satisfaction, clamped to `[MIN_SCORE, MAX_SCORE]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "i32", into = "i32")]
pub struct Satisfaction(i32);

impl Satisfaction {
    pub const ZERO: Satisfaction = Satisfaction(MIN_SCORE);
    pub const FULL: Satisfaction = Satisfaction(MAX_SCORE);

    /// Build a score, clamping out-of-range values.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(MIN_SCORE, MAX_SCORE))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Apply a score delta and clamp the result.
    pub fn apply(self, delta: i32) -> Self {
        Self::new(self.0.saturating_add(delta))
    }

    /// Whether the boss is fully satisfied (the win condition).
    pub fn is_full(self) -> bool {
        self.0 >= MAX_SCORE
    }
}

impl From<i32> for Satisfaction {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Satisfaction> for i32 {
    fn from(value: Satisfaction) -> Self {
        value.0
    }
}

impl fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based round counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Round(u32);

impl Round {
    pub const FIRST: Round = Round(1);

    /// Build a round number; zero is treated as the first round.
    pub fn new(number: u32) -> Self {
        Self(number.max(1))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// A selection made in this round ends the game.
    pub fn is_last(self) -> bool {
        self.0 >= MAX_ROUNDS
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<u32> for Round {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Round> for u32 {
    fn from(value: Round) -> Self {
        value.0
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
