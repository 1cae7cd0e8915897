//! Use cases - User story orchestration.
//!
//! - `generation` - asking the model for the boss's line and reply options
//! - `game` - the turn controller over stored sessions
//! - `chat` - one-shot replies for clients that keep their own state

pub mod chat;
pub mod game;
pub mod generation;

pub use chat::BossReplyUseCase;
pub use game::{GameError, GameUseCases, ScenarioChoice};
pub use generation::{GenerationError, OptionGenerator};
