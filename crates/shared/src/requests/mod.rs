//! Request bodies accepted by the engine.

mod chat;
mod session;

pub use chat::{ChatLine, ChatRequest};
pub use session::{CreateSessionRequest, SelectOptionRequest};
