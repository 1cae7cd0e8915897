//! Domain entities - Core business objects

mod message;
mod scenario;

pub use message::{Message, Speaker};
pub use scenario::{Scenario, GENERIC_OPENING_LINE, MAX_CUSTOM_DESCRIPTION_CHARS};
