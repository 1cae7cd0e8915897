//! Boss Coaxing Simulator Protocol - Wire types for the HTTP API
//!
//! This crate contains the JSON bodies exchanged with browser clients:
//! - The stateless chat endpoint (`/api/chat`)
//! - The server-held session endpoints (`/api/sessions`)
//! - The scenario catalog (`/api/scenarios`)
//!
//! # Design Principles
//!
//! 1. **camelCase on the wire** - field names match the browser client
//! 2. **No business logic** - pure data types and conversions from the domain
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod requests;
pub mod responses;

pub use requests::{ChatLine, ChatRequest, CreateSessionRequest, SelectOptionRequest};
pub use responses::{
    ChatResponse, ErrorResponse, MessageView, OptionData, ScenarioView, SessionView,
};
