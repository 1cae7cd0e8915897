//! In-memory state storage.
//!
//! Sessions live only as long as the process; nothing is persisted.

pub mod session;

pub use session::{SessionBusy, SessionHandle, SessionStore, DEFAULT_SESSION_IDLE_TTL};
