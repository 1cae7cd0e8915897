//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{ClockPort, LlmPort};
use crate::stores::SessionStore;
use crate::use_cases;
use crate::use_cases::game::{EndGame, GetGame, ResetGame, SelectOption, StartGame};

/// Main application state.
///
/// Holds the session store and all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub sessions: Arc<SessionStore>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub game: use_cases::GameUseCases,
    pub chat: Arc<use_cases::BossReplyUseCase>,
}

impl App {
    /// Wire the use cases around a model client and a clock. Sessions idle
    /// for `session_idle_ttl` are dropped by [`SessionStore::evict_idle`].
    pub fn new(
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        session_idle_ttl: Duration,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new(clock.clone(), session_idle_ttl));
        let generator = Arc::new(use_cases::OptionGenerator::new(llm));

        let game = use_cases::GameUseCases::new(
            Arc::new(StartGame::new(
                sessions.clone(),
                generator.clone(),
                clock.clone(),
            )),
            Arc::new(SelectOption::new(
                sessions.clone(),
                generator.clone(),
                clock.clone(),
            )),
            Arc::new(ResetGame::new(sessions.clone(), generator.clone(), clock)),
            Arc::new(GetGame::new(sessions.clone())),
            Arc::new(EndGame::new(sessions.clone())),
        );

        let chat = Arc::new(use_cases::BossReplyUseCase::new(generator));

        Self {
            sessions,
            use_cases: UseCases { game, chat },
        }
    }
}
