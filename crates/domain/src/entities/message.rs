use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who said a line in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Boss,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Boss => "boss",
        }
    }
}

/// One line of the transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    speaker: Speaker,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp: at,
        }
    }

    pub fn boss(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            speaker: Speaker::Boss,
            text: text.into(),
            timestamp: at,
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
