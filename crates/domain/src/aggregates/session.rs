//! Session aggregate - one playthrough of the game
//!
//! # State machine
//!
//! ```text
//! Init --begin--> Playing --select_option--> AwaitingBoss --complete_turn--> Playing
//!                    |
//!                    +--select_option (last round or full score)--> Terminal(outcome)
//! ```
//!
//! `Terminal` is absorbing until [`Session::reset`], which returns to `Init`.
//! While a turn is `AwaitingBoss` no further option can be selected.
//!
//! The aggregate never talks to the model itself: a non-terminal selection
//! hands back a [`GenerationContext`] and the caller feeds the resulting
//! [`BossReply`] (generated or fallback) into [`Session::complete_turn`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Message, Scenario, Speaker};
use crate::ids::SessionId;
use crate::value_objects::{BossReply, ReplyOption, Round, Satisfaction};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "outcome", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Opening line shown, waiting for the first option set.
    Init,
    /// Options on the table, waiting for the player.
    Playing,
    /// Player answered, waiting for the boss's next line.
    AwaitingBoss,
    Terminal(Outcome),
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Init => "init",
            SessionPhase::Playing => "playing",
            SessionPhase::AwaitingBoss => "awaiting_boss",
            SessionPhase::Terminal(_) => "terminal",
        }
    }
}

/// Role of a line sent to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextRole {
    System,
    User,
    Assistant,
}

impl ContextRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextRole::System => "system",
            ContextRole::User => "user",
            ContextRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLine {
    pub role: ContextRole,
    pub content: String,
}

impl ContextLine {
    pub fn new(role: ContextRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Everything the generator needs for one call. Generation is stateless, so
/// the full transcript travels with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    pub scenario: String,
    pub lines: Vec<ContextLine>,
    pub score: Satisfaction,
    pub round: Round,
}

/// Result of selecting an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStep {
    /// The game ended with this selection. No generation is needed.
    Finished(Outcome),
    /// The boss must answer; generate a reply for this context.
    Continue(GenerationContext),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session has not received its opening options yet")]
    NotStarted,
    #[error("Session has already started")]
    AlreadyStarted,
    #[error("A turn is already in progress")]
    TurnInProgress,
    #[error("No turn is waiting for a boss reply")]
    NoPendingTurn,
    #[error("Game is over ({0:?})")]
    GameOver(Outcome),
    #[error("Option {index} out of range ({available} available)")]
    OptionOutOfRange { index: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    scenario: Scenario,
    score: Satisfaction,
    round: Round,
    transcript: Vec<Message>,
    options: Vec<ReplyOption>,
    phase: SessionPhase,
}

impl Session {
    /// Create a session with the scenario's opening line already said.
    pub fn new(id: SessionId, scenario: Scenario, now: DateTime<Utc>) -> Self {
        let opening = Message::boss(scenario.opening_line(), now);
        Self {
            id,
            scenario,
            score: Satisfaction::ZERO,
            round: Round::FIRST,
            transcript: vec![opening],
            options: Vec::new(),
            phase: SessionPhase::Init,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn score(&self) -> Satisfaction {
        self.score
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn options(&self) -> &[ReplyOption] {
        &self.options
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            SessionPhase::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// End-of-game line shown to the player.
    pub fn summary(&self) -> Option<String> {
        self.outcome().map(|outcome| match outcome {
            Outcome::Win => format!(
                "恭喜你！经过 {} 轮对话，老板满意度达到了 {} 分！",
                self.round, self.score
            ),
            Outcome::Lose => format!(
                "很遗憾，{} 轮对话后老板满意度只有 {} 分。",
                self.round, self.score
            ),
        })
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Context for the opening option request: the scenario and the boss's
    /// first line, at score 0 in round 1.
    pub fn opening_context(&self) -> GenerationContext {
        GenerationContext {
            scenario: self.scenario.description().to_string(),
            lines: vec![
                ContextLine::new(ContextRole::System, self.scenario.system_line()),
                ContextLine::new(ContextRole::Assistant, self.scenario.opening_line()),
            ],
            score: self.score,
            round: self.round,
        }
    }

    /// Install the first option set. `Init -> Playing`.
    pub fn begin(&mut self, options: Vec<ReplyOption>) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Init {
            return Err(SessionError::AlreadyStarted);
        }
        self.options = options;
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// Answer the boss with the option at `index`.
    ///
    /// The option text joins the transcript and its delta is applied to the
    /// clamped score. A selection in the last round, or one that fills the
    /// score, ends the game; otherwise the session waits for the boss and the
    /// returned context describes the request for the next round.
    pub fn select_option(
        &mut self,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<TurnStep, SessionError> {
        match self.phase {
            SessionPhase::Playing => {}
            SessionPhase::Init => return Err(SessionError::NotStarted),
            SessionPhase::AwaitingBoss => return Err(SessionError::TurnInProgress),
            SessionPhase::Terminal(outcome) => return Err(SessionError::GameOver(outcome)),
        }

        let option = self
            .options
            .get(index)
            .cloned()
            .ok_or(SessionError::OptionOutOfRange {
                index,
                available: self.options.len(),
            })?;

        self.transcript.push(Message::user(option.text, now));
        self.options.clear();
        self.score = self.score.apply(option.score);

        if self.round.is_last() || self.score.is_full() {
            let outcome = if self.score.is_full() {
                Outcome::Win
            } else {
                Outcome::Lose
            };
            self.phase = SessionPhase::Terminal(outcome);
            return Ok(TurnStep::Finished(outcome));
        }

        self.phase = SessionPhase::AwaitingBoss;
        Ok(TurnStep::Continue(self.turn_context()))
    }

    /// Deliver the boss's reply for the pending turn and advance the round.
    /// `AwaitingBoss -> Playing`.
    pub fn complete_turn(
        &mut self,
        reply: BossReply,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if self.phase != SessionPhase::AwaitingBoss {
            return Err(SessionError::NoPendingTurn);
        }
        self.transcript.push(Message::boss(reply.boss_message, now));
        self.options = reply.options;
        self.round = self.round.next();
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// Throw away all progress and start over with the same scenario.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Session::new(self.id, self.scenario.clone(), now);
    }

    fn turn_context(&self) -> GenerationContext {
        let mut lines = Vec::with_capacity(self.transcript.len() + 1);
        lines.push(ContextLine::new(
            ContextRole::System,
            self.scenario.system_line(),
        ));
        lines.extend(self.transcript.iter().map(|message| {
            let role = match message.speaker() {
                Speaker::Boss => ContextRole::Assistant,
                Speaker::User => ContextRole::User,
            };
            ContextLine::new(role, message.text())
        }));

        GenerationContext {
            scenario: self.scenario.description().to_string(),
            lines,
            score: self.score,
            round: self.round.next(),
        }
    }
}
