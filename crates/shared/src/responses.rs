//! Response bodies returned by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bosscoax_domain::{BossReply, Message, ReplyOption, Scenario, Session, MAX_ROUNDS};

// =============================================================================
// Chat endpoint
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionData {
    pub text: String,
    pub score: i32,
}

impl From<&ReplyOption> for OptionData {
    fn from(option: &ReplyOption) -> Self {
        Self {
            text: option.text.clone(),
            score: option.score,
        }
    }
}

/// Body of a successful `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub boss_message: String,
    pub options: Vec<OptionData>,
}

impl From<BossReply> for ChatResponse {
    fn from(reply: BossReply) -> Self {
        Self {
            options: reply.options.iter().map(OptionData::from).collect(),
            boss_message: reply.boss_message,
        }
    }
}

/// Error body for every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl From<&Scenario> for ScenarioView {
    fn from(scenario: &Scenario) -> Self {
        Self {
            id: scenario.id(),
            title: scenario.title().to_string(),
            description: scenario.description().to_string(),
            icon: scenario.icon().to_string(),
        }
    }
}

// =============================================================================
// Sessions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub role: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            role: message.speaker().as_str().to_string(),
            text: message.text().to_string(),
            timestamp: message.timestamp(),
        }
    }
}

/// Snapshot of a game for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub scenario: ScenarioView,
    pub score: i32,
    pub round: u32,
    pub max_rounds: u32,
    pub messages: Vec<MessageView>,
    pub options: Vec<OptionData>,
    /// `init`, `playing`, `awaiting_boss` or `terminal`
    pub phase: String,
    /// `win` or `lose` once terminal
    pub outcome: Option<String>,
    pub summary: Option<String>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_uuid(),
            scenario: ScenarioView::from(session.scenario()),
            score: session.score().value(),
            round: session.round().number(),
            max_rounds: MAX_ROUNDS,
            messages: session.transcript().iter().map(MessageView::from).collect(),
            options: session.options().iter().map(OptionData::from).collect(),
            phase: session.phase().as_str().to_string(),
            outcome: session.outcome().map(|o| o.as_str().to_string()),
            summary: session.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bosscoax_domain::{fallback, SessionId};

    #[test]
    fn chat_response_uses_camel_case() {
        let response = ChatResponse::from(BossReply::new(
            "说吧。",
            vec![ReplyOption::new("好的", 12)],
        ));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["bossMessage"], "说吧。");
        assert_eq!(json["options"][0]["text"], "好的");
        assert_eq!(json["options"][0]["score"], 12);
    }

    #[test]
    fn session_view_reflects_live_game() {
        let mut session = Session::new(
            SessionId::new(),
            Scenario::find(1).unwrap(),
            Utc::now(),
        );
        session.begin(fallback::opening_options()).unwrap();

        let view = SessionView::from(&session);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["phase"], "playing");
        assert_eq!(json["maxRounds"], 10);
        assert_eq!(json["score"], 0);
        assert_eq!(json["round"], 1);
        assert_eq!(json["messages"][0]["role"], "boss");
        assert_eq!(json["options"].as_array().unwrap().len(), 6);
        assert!(json["outcome"].is_null());
        assert_eq!(json["scenario"]["id"], 1);
    }
}
