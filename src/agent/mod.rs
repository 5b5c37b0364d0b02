pub mod providers;

use tracing::{info, warn};

use crate::error::EngineError;
use crate::length::length_instruction;
use crate::memory::analysis;
use crate::prompt::INTRO_PROMPT;
use crate::session::SessionState;
use crate::types::{ChatMessage, LastRequest, WallReply};
use providers::{GenerationRequest, GenerationService, OutputSchema};

const DIALOGUE_TEMPERATURE: f32 = 0.9;

/// Runs one exchange at a time against the generation service.
///
/// A turn is: system prompt -> rolling summary (if any) -> user message ->
/// length instruction, answered with a `WallReply`. Session state changes only
/// after the reply has been received and parsed, so a failed call leaves the
/// turn count, summary and history untouched. Nothing is retried.
pub struct TurnExecutor {
    service: Box<dyn GenerationService>,
}

impl TurnExecutor {
    pub fn new(service: Box<dyn GenerationService>) -> Self {
        Self { service }
    }

    /// Outbound messages for a conversational turn.
    pub fn build_messages(
        system_prompt: String,
        summary: &str,
        user_message: &str,
        length_instruction: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(system_prompt)];
        if !summary.is_empty() {
            messages.push(ChatMessage::assistant(format!(
                "[Conversation summary: {summary}]"
            )));
        }
        messages.push(ChatMessage::user(user_message));
        messages.push(ChatMessage::system(length_instruction));
        messages
    }

    /// Run a conversational turn and return the reply for display.
    pub async fn run_turn(
        &self,
        session: &mut SessionState,
        user_message: &str,
    ) -> Result<String, EngineError> {
        let length = length_instruction(session.turn_count(), session.speed());
        let messages = Self::build_messages(
            session.system_prompt(),
            session.memory().current_summary(),
            user_message,
            &length,
        );

        let reply = match self.call(session, &messages).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session = %session.id(), turn = session.turn_count(), "turn failed: {e}");
                return Err(e);
            }
        };

        session.set_last_request(LastRequest {
            messages,
            length_instruction: length,
        });
        session.complete_turn(reply.summary);

        info!(
            session = %session.id(),
            turn = session.turn_count(),
            personality = %session.active_personality(),
            "turn completed"
        );
        Ok(reply.reply)
    }

    /// Ask for the wall's opening line. The summary is discarded and the turn
    /// count does not move.
    pub async fn opening(&self, session: &mut SessionState) -> Result<String, EngineError> {
        let length = length_instruction(0, session.speed());
        let messages = vec![
            ChatMessage::system(session.system_prompt()),
            ChatMessage::user(format!("{INTRO_PROMPT}\n\n{length}")),
        ];

        let reply = self.call(session, &messages).await?;
        session.set_last_request(LastRequest {
            messages,
            length_instruction: length,
        });
        Ok(reply.reply)
    }

    /// Meta-analysis of the summary history.
    pub async fn analyze_memory(&self, session: &SessionState) -> Result<String, EngineError> {
        analysis::analyze(self.service.as_ref(), session.model(), session.memory()).await
    }

    async fn call(
        &self,
        session: &SessionState,
        messages: &[ChatMessage],
    ) -> Result<WallReply, EngineError> {
        let content = self
            .service
            .generate(&GenerationRequest {
                model: session.model(),
                messages,
                temperature: DIALOGUE_TEMPERATURE,
                output_schema: Some(OutputSchema {
                    name: WallReply::SCHEMA_NAME,
                    schema: WallReply::schema(),
                }),
            })
            .await?;
        Ok(WallReply::from_content(&content)?)
    }
}
