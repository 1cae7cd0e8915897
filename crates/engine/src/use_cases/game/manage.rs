//! Session lookup and teardown.

use std::sync::Arc;

use bosscoax_domain::{Session, SessionId};

use super::GameError;
use crate::stores::SessionStore;

/// Read the current state of a session.
pub struct GetGame {
    sessions: Arc<SessionStore>,
}

impl GetGame {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    /// Waits for an in-flight turn to finish before reading.
    pub async fn execute(&self, id: SessionId) -> Result<Session, GameError> {
        let handle = self
            .sessions
            .get(id)
            .ok_or(GameError::SessionNotFound(id))?;
        let session = handle.lock().await;
        Ok(session.clone())
    }
}

/// Drop a session from the store.
pub struct EndGame {
    sessions: Arc<SessionStore>,
}

impl EndGame {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    pub fn execute(&self, id: SessionId) -> Result<(), GameError> {
        self.sessions
            .remove(id)
            .map(|_| tracing::info!(session_id = %id, "Game ended"))
            .ok_or(GameError::SessionNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::game::start::{ScenarioChoice, StartGame};
    use crate::use_cases::game::test_support::{clock, scripted, store, OPENING_REPLY};

    #[tokio::test]
    async fn get_and_end_session() {
        let sessions = store();
        let start = StartGame::new(sessions.clone(), scripted(vec![Ok(OPENING_REPLY)]), clock());
        let started = start.execute(ScenarioChoice::BuiltIn(2)).await.unwrap();

        let get = GetGame::new(sessions.clone());
        let end = EndGame::new(sessions.clone());

        assert_eq!(get.execute(started.id()).await.unwrap(), started);

        end.execute(started.id()).unwrap();

        assert!(matches!(
            get.execute(started.id()).await,
            Err(GameError::SessionNotFound(_))
        ));
        assert!(matches!(
            end.execute(started.id()),
            Err(GameError::SessionNotFound(_))
        ));
    }
}
