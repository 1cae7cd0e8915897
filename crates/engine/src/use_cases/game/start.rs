//! Start game use case.
//!
//! Creates a session for a built-in or custom scenario, asks the model for
//! the opening options and stores the session.

use std::sync::Arc;

use bosscoax_domain::{Scenario, Session, SessionId};

use super::{opening_options, GameError};
use crate::infrastructure::ports::ClockPort;
use crate::stores::SessionStore;
use crate::use_cases::generation::OptionGenerator;

/// Which scenario a new game is played in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioChoice {
    /// One of the catalog scenarios, by id.
    BuiltIn(u32),
    /// A free-form description written by the player.
    Custom(String),
}

impl ScenarioChoice {
    fn resolve(self) -> Result<Scenario, GameError> {
        match self {
            ScenarioChoice::BuiltIn(id) => Scenario::find(id).ok_or(GameError::UnknownScenario(id)),
            ScenarioChoice::Custom(description) => Ok(Scenario::custom(description)?),
        }
    }
}

pub struct StartGame {
    sessions: Arc<SessionStore>,
    generator: Arc<OptionGenerator>,
    clock: Arc<dyn ClockPort>,
}

impl StartGame {
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

    /// Start a new game and return a snapshot of the playable session.
    pub async fn execute(&self, choice: ScenarioChoice) -> Result<Session, GameError> {
        let scenario = choice.resolve()?;
        let mut session = Session::new(SessionId::new(), scenario, self.clock.now());

        let options =
            opening_options(&self.generator, session.id(), &session.opening_context()).await;
        session.begin(options)?;

        tracing::info!(
            session_id = %session.id(),
            scenario = session.scenario().title(),
            "Game started"
        );

        self.sessions.insert(session.clone());
        Ok(session)
    }
}
