//! Boss Coaxing Simulator domain.
//!
//! Pure game rules with no I/O: a [`Session`] aggregate that tracks the
//! satisfaction score, the round counter and the boss conversation, plus the
//! value objects and fixed content (scenarios, fallback replies) it relies on.

extern crate self as bosscoax_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::session::{
    ContextLine, ContextRole, GenerationContext, Outcome, Session, SessionError, SessionPhase,
    TurnStep,
};
pub use entities::{Message, Scenario, Speaker};
pub use error::DomainError;
pub use ids::SessionId;
pub use value_objects::{
    fallback, BossReply, ReplyOption, Round, Satisfaction, MAX_ROUNDS, MAX_SCORE, MIN_SCORE,
    OPTIONS_PER_TURN,
};
