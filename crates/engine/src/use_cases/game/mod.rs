//! Game use cases - the turn controller.
//!
//! A game flows:
//! 1. Player picks a scenario (StartGame); the opening options are generated
//! 2. Player answers with one of the options (SelectOption)
//! 3. Unless the game just ended, the boss's next line is generated
//! 4. Repeat until the score reaches 100 or round 10 is answered
//! 5. Player may start over with the same scenario (ResetGame)
//!
//! Generation failures never reach the player: the fixed fallback replies
//! in [`bosscoax_domain::fallback`] stand in for the model.

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;

use bosscoax_domain::{
    fallback, DomainError, GenerationContext, ReplyOption, Session, SessionError, SessionId,
};

use crate::stores::{SessionBusy, SessionStore};
use crate::use_cases::generation::OptionGenerator;

mod manage;
mod reset;
mod select;
mod start;

pub use manage::{EndGame, GetGame};
pub use reset::ResetGame;
pub use select::SelectOption;
pub use start::{ScenarioChoice, StartGame};

/// Container for game use cases.
pub struct GameUseCases {
    pub start: Arc<StartGame>,
    pub select: Arc<SelectOption>,
    pub reset: Arc<ResetGame>,
    pub get: Arc<GetGame>,
    pub end: Arc<EndGame>,
}

impl GameUseCases {
    pub fn new(
        start: Arc<StartGame>,
        select: Arc<SelectOption>,
        reset: Arc<ResetGame>,
        get: Arc<GetGame>,
        end: Arc<EndGame>,
    ) -> Self {
        Self {
            start,
            select,
            reset,
            get,
            end,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
    #[error("Another turn is in progress for this session")]
    TurnInProgress,
    #[error("Unknown scenario: {0}")]
    UnknownScenario(u32),
    #[error(transparent)]
    Session(SessionError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SessionError> for GameError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::TurnInProgress => GameError::TurnInProgress,
            other => GameError::Session(other),
        }
    }
}

/// Take exclusive hold of a session for one transition.
pub(crate) fn lock_session(
    sessions: &SessionStore,
    id: SessionId,
) -> Result<OwnedMutexGuard<Session>, GameError> {
    match sessions.try_lock(id) {
        Some(Ok(guard)) => Ok(guard),
        Some(Err(SessionBusy)) => Err(GameError::TurnInProgress),
        None => Err(GameError::SessionNotFound(id)),
    }
}

/// Opening options for a fresh or reset session.
///
/// Only the options are kept; the boss already spoke the scenario's opening
/// line, so the generated boss message is dropped.
pub(crate) async fn opening_options(
    generator: &OptionGenerator,
    session_id: SessionId,
    context: &GenerationContext,
) -> Vec<ReplyOption> {
    match generator.generate(context).await {
        Ok(reply) => reply.options,
        Err(e) => {
            tracing::warn!(
                session_id = %session_id,
                error = %e,
                "Opening generation failed, using fallback options"
            );
            fallback::opening_options()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{ClockPort, LlmError, LlmResponse, MockLlmPort};
    use crate::stores::{SessionStore, DEFAULT_SESSION_IDLE_TTL};
    use crate::use_cases::generation::OptionGenerator;

    pub const OPENING_REPLY: &str = r#"{
        "bossMessage": "这句话不会显示",
        "options": [
            {"text": "老板对不起，我马上补救", "score": 12},
            {"text": "我已经联系客户道歉了", "score": 16},
            {"text": "今天地铁太挤了", "score": -6},
            {"text": "反正客户也没签约", "score": -14},
            {"text": "我梦见自己准时到了", "score": -11},
            {"text": "老板您今天领带很帅", "score": -7}
        ]
    }"#;

    pub const TURN_REPLY: &str = r#"{
        "bossMessage": "那你说说怎么补救？",
        "options": [
            {"text": "今晚加班整理方案", "score": 20},
            {"text": "明天一早亲自拜访客户", "score": 14},
            {"text": "让同事替我去", "score": -9},
            {"text": "客户不会在意的", "score": -13},
            {"text": "我们先团建一下吧", "score": -15},
            {"text": "老板您吃了吗", "score": -5}
        ]
    }"#;

    pub fn clock() -> Arc<dyn ClockPort> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap(),
        ))
    }

    /// Generator answering each call with the next scripted result.
    pub fn scripted(replies: Vec<Result<&'static str, LlmError>>) -> Arc<OptionGenerator> {
        let mut llm = MockLlmPort::new();
        let mut replies = replies.into_iter();
        llm.expect_generate()
            .times(replies.len())
            .returning(move |_| {
                replies
                    .next()
                    .unwrap_or(Err(LlmError::RequestFailed("script exhausted".into())))
                    .map(LlmResponse::text)
            });
        Arc::new(OptionGenerator::new(Arc::new(llm)))
    }

    pub fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(clock(), DEFAULT_SESSION_IDLE_TTL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::LlmError;
    use bosscoax_domain::Scenario;

    #[test]
    fn phase_conflict_maps_to_turn_in_progress() {
        assert!(matches!(
            GameError::from(SessionError::TurnInProgress),
            GameError::TurnInProgress
        ));
        assert!(matches!(
            GameError::from(SessionError::NotStarted),
            GameError::Session(SessionError::NotStarted)
        ));
    }

    #[tokio::test]
    async fn opening_options_fall_back_on_failure() {
        let generator = test_support::scripted(vec![Err(LlmError::MissingCredential)]);
        let session = Session::new(
            SessionId::new(),
            Scenario::find(2).unwrap(),
            chrono::Utc::now(),
        );

        let options =
            opening_options(&generator, session.id(), &session.opening_context()).await;

        assert_eq!(options, fallback::opening_options());
    }

    #[tokio::test]
    async fn opening_options_keep_generated_options_only() {
        let generator = test_support::scripted(vec![Ok(test_support::OPENING_REPLY)]);
        let session = Session::new(
            SessionId::new(),
            Scenario::find(1).unwrap(),
            chrono::Utc::now(),
        );

        let options =
            opening_options(&generator, session.id(), &session.opening_context()).await;

        assert_eq!(options.len(), 6);
        assert_eq!(options[0].text, "老板对不起，我马上补救");
    }
}
