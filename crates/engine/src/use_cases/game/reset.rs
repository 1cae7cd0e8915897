//! Reset game use case.
//!
//! Throws away all progress and starts the same scenario again, including a
//! fresh request for opening options.

use std::sync::Arc;

use bosscoax_domain::{Session, SessionId};

use super::{lock_session, opening_options, GameError};
use crate::infrastructure::ports::ClockPort;
use crate::stores::SessionStore;
use crate::use_cases::generation::OptionGenerator;

pub struct ResetGame {
    sessions: Arc<SessionStore>,
    generator: Arc<OptionGenerator>,
    clock: Arc<dyn ClockPort>,
}

impl ResetGame {
    pub fn new(
        sessions: Arc<SessionStore>,
        generator: Arc<OptionGenerator>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            sessions,
            generator,
            clock,
        }
    }

    pub async fn execute(&self, id: SessionId) -> Result<Session, GameError> {
        let mut session = lock_session(&self.sessions, id)?;
        session.reset(self.clock.now());

        let generator = self.generator.clone();

        // Same as a turn: the session must not be left in `Init` if the
        // caller goes away mid-generation.
        let restart = tokio::spawn(async move {
            let context = session.opening_context();
            let options = opening_options(&generator, id, &context).await;
            session.begin(options)?;

            tracing::info!(session_id = %id, "Game reset");
            Ok::<Session, GameError>((*session).clone())
        });

        restart
            .await
            .map_err(|e| GameError::Internal(format!("Reset task failed: {e}")))?
    }
}
