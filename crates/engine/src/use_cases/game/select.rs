//! Select option use case.
//!
//! Applies the player's answer and, unless that ends the game, gets the
//! boss's next line. The session stays locked for the whole turn, so a
//! second selection on the same session is rejected until this one is done.

use std::sync::Arc;

use bosscoax_domain::{fallback, Session, SessionId, TurnStep};

use super::{lock_session, GameError};
use crate::infrastructure::ports::ClockPort;
use crate::stores::SessionStore;
use crate::use_cases::generation::OptionGenerator;

pub struct SelectOption {
    sessions: Arc<SessionStore>,
    generator: Arc<OptionGenerator>,
    clock: Arc<dyn ClockPort>,
}

impl SelectOption {
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

    /// Answer with the option at `option_index` of the current option set.
    ///
    /// # Returns
    /// * `Ok(Session)` - Snapshot after the turn (terminal, or back to playing)
    /// * `Err(GameError)` - Unknown session, busy session, or an illegal selection
    pub async fn execute(&self, id: SessionId, option_index: usize) -> Result<Session, GameError> {
        let mut session = lock_session(&self.sessions, id)?;

        let context = match session.select_option(option_index, self.clock.now())? {
            TurnStep::Finished(outcome) => {
                tracing::info!(
                    session_id = %id,
                    outcome = outcome.as_str(),
                    round = session.round().number(),
                    score = session.score().value(),
                    "Game over"
                );
                return Ok((*session).clone());
            }
            TurnStep::Continue(context) => context,
        };

        let generator = self.generator.clone();
        let clock = self.clock.clone();

        // Owns the session guard, so the turn completes even if the caller
        // stops waiting.
        let turn = tokio::spawn(async move {
            let reply = match generator.generate(&context).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!(
                        session_id = %id,
                        round = context.round.number(),
                        error = %e,
                        "Boss reply generation failed, using fallback"
                    );
                    fallback::turn_reply()
                }
            };

            session.complete_turn(reply, clock.now())?;

            tracing::info!(
                session_id = %id,
                round = session.round().number(),
                score = session.score().value(),
                "Turn completed"
            );
            Ok::<Session, GameError>((*session).clone())
        });

        turn.await
            .map_err(|e| GameError::Internal(format!("Turn task failed: {e}")))?
    }
}
