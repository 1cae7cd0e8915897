//! Stateless boss reply use case.
//!
//! Backs `POST /api/chat`: the caller owns the game state and sends the whole
//! transcript each time. Content the model returns in the wrong shape is
//! papered over with a fixed reply; a model that cannot be reached is an error.

use std::sync::Arc;

use bosscoax_domain::{fallback, BossReply, GenerationContext};

use crate::infrastructure::ports::LlmError;
use crate::use_cases::generation::{GenerationError, OptionGenerator};

pub struct BossReplyUseCase {
    generator: Arc<OptionGenerator>,
}

impl BossReplyUseCase {
    pub fn new(generator: Arc<OptionGenerator>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self, context: GenerationContext) -> Result<BossReply, LlmError> {
        match self.generator.generate(&context).await {
            Ok(reply) => Ok(reply),
            Err(GenerationError::MalformedPayload(reason)) => {
                tracing::warn!(
                    round = context.round.number(),
                    reason = %reason,
                    "Unparsable boss reply, using fallback"
                );
                Ok(fallback::unparsable_reply())
            }
            Err(GenerationError::Llm(e)) => {
                tracing::error!(error = %e, "Boss reply generation failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmResponse, MockLlmPort};
    use bosscoax_domain::{Round, Satisfaction};

    fn use_case(result: Result<LlmResponse, LlmError>) -> BossReplyUseCase {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(1).return_once(move |_| result);
        BossReplyUseCase::new(Arc::new(OptionGenerator::new(Arc::new(llm))))
    }

    fn context() -> GenerationContext {
        GenerationContext {
            scenario: "你在会议上睡着了。".to_string(),
            lines: vec![],
            score: Satisfaction::new(40),
            round: Round::new(3),
        }
    }

    #[tokio::test]
    async fn unparsable_content_becomes_fallback() {
        let reply = use_case(Ok(LlmResponse::text("not json at all")))
            .execute(context())
            .await
            .unwrap();

        assert_eq!(reply, fallback::unparsable_reply());
    }

    #[tokio::test]
    async fn transport_failure_is_returned() {
        let err = use_case(Err(LlmError::Status {
            status: 401,
            body: "unauthorized".into(),
        }))
        .execute(context())
        .await
        .unwrap_err();

        assert!(matches!(err, LlmError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn good_content_passes_through() {
        let reply = use_case(Ok(LlmResponse::text(
            r#"{"bossMessage": "醒了？", "options": [{"text": "醒了", "score": 8}]}"#,
        )))
        .execute(context())
        .await
        .unwrap();

        assert_eq!(reply.boss_message, "醒了？");
        assert_eq!(reply.options.len(), 1);
    }
}
