//! Boss Coaxing Simulator engine library.
//!
//! This crate contains all server-side code for the game.
//!
//! ## Structure
//!
//! - `use_cases/` - Option generation and the turn controller
//! - `stores/` - In-memory session storage
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
