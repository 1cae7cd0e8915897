use serde::{Deserialize, Serialize};

use bosscoax_domain::{ContextLine, ContextRole, GenerationContext, Round, Satisfaction};

/// One transcript line as sent by the browser (`role` is free text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub role: String,
    pub content: String,
}

impl ChatLine {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatLine>,
    pub scenario: String,
    pub current_score: i32,
    pub round: u32,
}

impl ChatRequest {
    /// Convert to the generator's input. Unknown roles are sent as user lines.
    pub fn into_context(self) -> GenerationContext {
        let lines = self
            .messages
            .into_iter()
            .map(|line| {
                let role = match line.role.as_str() {
                    "system" => ContextRole::System,
                    "assistant" | "boss" => ContextRole::Assistant,
                    _ => ContextRole::User,
                };
                ContextLine::new(role, line.content)
            })
            .collect();

        GenerationContext {
            scenario: self.scenario,
            lines,
            score: Satisfaction::new(self.current_score),
            round: Round::new(self.round),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_payload() {
        let json = r#"{
            "messages": [
                {"role": "system", "content": "场景：你连续一周没有发日报。"},
                {"role": "assistant", "content": "这是什么情况？"},
                {"role": "user", "content": "我错了"}
            ],
            "scenario": "你连续一周没有发日报。",
            "currentScore": 15,
            "round": 2
        }"#;

        let request: ChatRequest = serde_json::from_str(json).unwrap();
        let context = request.into_context();

        assert_eq!(context.round.number(), 2);
        assert_eq!(context.score.value(), 15);
        let roles: Vec<_> = context.lines.iter().map(|l| l.role).collect();
        assert_eq!(
            roles,
            vec![ContextRole::System, ContextRole::Assistant, ContextRole::User]
        );
    }

    #[test]
    fn boss_and_unknown_roles_are_mapped() {
        let request = ChatRequest {
            messages: vec![ChatLine::new("boss", "嗯？"), ChatLine::new("narrator", "...")],
            scenario: "s".to_string(),
            current_score: 250,
            round: 0,
        };

        let context = request.into_context();

        assert_eq!(context.lines[0].role, ContextRole::Assistant);
        assert_eq!(context.lines[1].role, ContextRole::User);
        assert_eq!(context.score.value(), 100);
        assert_eq!(context.round.number(), 1);
    }
}
