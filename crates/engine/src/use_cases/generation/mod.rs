//! Option generation via LLM.
//!
//! Asks the model for the boss's next line and six reply options. The
//! generator is stateless: every call carries the whole transcript, the
//! scenario, the current score and the round being generated for.
//!
//! Validation is deliberately shallow. The content must be JSON (optionally
//! inside a markdown code fence) with a non-empty `bossMessage` and a
//! non-empty `options` array; score ranges and option counts are taken as
//! given. Callers decide what to do on failure, usually substituting one of
//! the fixed replies in [`bosscoax_domain::fallback`].

mod prompt;

use std::sync::Arc;

use serde::Deserialize;

use bosscoax_domain::{BossReply, ContextRole, GenerationContext, ReplyOption};

use crate::infrastructure::ports::{
    ChatMessage, FinishReason, LlmError, LlmPort, LlmRequest, ResponseFormat,
};

pub use prompt::build_system_prompt;

/// Sampling temperature for boss replies.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token cap for one reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The model could not be reached or refused the request.
    #[error(transparent)]
    Llm(#[from] LlmError),
    /// The model answered, but not with the required JSON shape.
    #[error("Malformed boss reply: {0}")]
    MalformedPayload(String),
}

impl GenerationError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, GenerationError::MalformedPayload(_))
    }
}

/// Produces boss replies through the LLM port.
pub struct OptionGenerator {
    llm: Arc<dyn LlmPort>,
    temperature: f32,
    max_tokens: u32,
}

impl OptionGenerator {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self {
            llm,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Generate the boss's next line and reply options for `context`.
    pub async fn generate(&self, context: &GenerationContext) -> Result<BossReply, GenerationError> {
        let messages = context
            .lines
            .iter()
            .map(|line| match line.role {
                ContextRole::System => ChatMessage::system(line.content.clone()),
                ContextRole::User => ChatMessage::user(line.content.clone()),
                ContextRole::Assistant => ChatMessage::assistant(line.content.clone()),
            })
            .collect();

        let request = LlmRequest::new(messages)
            .with_system_prompt(build_system_prompt(context))
            .with_temperature(self.temperature)
            .with_max_tokens(Some(self.max_tokens))
            .with_response_format(ResponseFormat::JsonObject);

        tracing::debug!(
            round = context.round.number(),
            score = context.score.value(),
            lines = context.lines.len(),
            "Requesting boss reply"
        );

        let response = self.llm.generate(request).await?;
        let truncated = response.finish_reason == FinishReason::Length;
        if truncated {
            tracing::warn!(
                round = context.round.number(),
                max_tokens = self.max_tokens,
                "Boss reply hit the token cap"
            );
        }

        let reply = parse_reply(&response.content)
            .map_err(|e| match e {
                GenerationError::MalformedPayload(reason) if truncated => {
                    GenerationError::MalformedPayload(format!(
                        "Reply truncated at max_tokens: {reason}"
                    ))
                }
                other => other,
            })
            .inspect_err(|e| {
                tracing::warn!(
                    error = %e,
                    content = %response.content,
                    "Boss reply was not usable JSON"
                );
            })?;

        tracing::info!(
            round = context.round.number(),
            options = reply.options.len(),
            "Boss reply generated"
        );

        Ok(reply)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReply {
    boss_message: Option<String>,
    options: Option<Vec<RawOption>>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    text: String,
    score: f64,
}

fn parse_reply(content: &str) -> Result<BossReply, GenerationError> {
    let raw: RawReply = serde_json::from_str(extract_json(content))
        .map_err(|e| GenerationError::MalformedPayload(format!("Invalid JSON in response: {e}")))?;

    let boss_message = raw
        .boss_message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| {
            GenerationError::MalformedPayload("Missing 'bossMessage' field".to_string())
        })?;

    let options = raw
        .options
        .filter(|o| !o.is_empty())
        .ok_or_else(|| GenerationError::MalformedPayload("Missing 'options' field".to_string()))?;

    Ok(BossReply::new(
        boss_message,
        options
            .into_iter()
            .map(|o| ReplyOption::new(o.text, o.score.round() as i32))
            .collect(),
    ))
}

/// Extract JSON from a response that might have markdown code blocks or extra text.
fn extract_json(response: &str) -> &str {
    // Try to find JSON in markdown code block
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim();
        }
    }

    // Try to find JSON in plain code block
    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            let content = response[start + 3..start + 3 + end].trim();
            // Skip language identifier if present
            if let Some(newline_pos) = content.find('\n') {
                if !content[..newline_pos].starts_with('{') {
                    return content[newline_pos + 1..].trim();
                }
            }
            return content;
        }
    }

    // Try to find raw JSON object
    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            return &response[start..=end];
        }
    }

    response.trim()
}
