use serde::{Deserialize, Serialize};

/// A candidate reply the player can pick, with its effect on boss satisfaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyOption {
    pub text: String,
    /// Satisfaction delta, roughly in `[-15, +20]`. Not validated.
    pub score: i32,
}

impl ReplyOption {
    pub fn new(text: impl Into<String>, score: i32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.score > 0
    }
}

/// The boss's next line plus the options offered in response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossReply {
    pub boss_message: String,
    pub options: Vec<ReplyOption>,
}

impl BossReply {
    pub fn new(boss_message: impl Into<String>, options: Vec<ReplyOption>) -> Self {
        Self {
            boss_message: boss_message.into(),
            options,
        }
    }
}
