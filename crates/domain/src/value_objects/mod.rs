//! Value objects - Immutable objects defined by their attributes

pub mod fallback;
mod reply;
mod satisfaction;

pub use reply::{BossReply, ReplyOption};
pub use satisfaction::{Round, Satisfaction, MAX_ROUNDS, MAX_SCORE, MIN_SCORE};

/// Number of reply options offered to the player each turn.
pub const OPTIONS_PER_TURN: usize = 6;
