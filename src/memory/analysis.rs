use tracing::info;

use super::MemoryManager;
use crate::agent::providers::{GenerationRequest, GenerationService};
use crate::error::EngineError;
use crate::models::ModelInfo;
use crate::types::ChatMessage;

pub const NOT_ENOUGH_HISTORY: &str = "Not enough history yet (need at least 2 turns).";

const ANALYST_ROLE: &str = "You are a helpful analyst examining conversation summaries.";

const ANALYSIS_TEMPERATURE: f32 = 0.5;

/// Build the analytical prompt over the summary history, oldest first.
///
/// Returns `None` with fewer than two summaries.
pub fn analysis_prompt(memory: &MemoryManager) -> Option<String> {
    if memory.history_len() < 2 {
        return None;
    }

    let summaries: String = memory
        .history()
        .enumerate()
        .map(|(i, record)| format!("--- SUMMARY {} ---\n{}\n\n", i + 1, record.text))
        .collect();

    Some(format!(
        "You are analyzing how a conversation summary has evolved over time.
Below are the last {count} summaries in chronological order (oldest to newest).

{summaries}
Please provide an analytical comparison focusing on:

1. STABLE ELEMENTS: What facts about the player (background, interests, views) and topics discussed remain consistent across all summaries?

2. CHANGES & ADDITIONS: What new information has been revealed? What topics were introduced? What questions were asked or answered?

3. CONVERSATION TRAJECTORY: What is the general direction of the dialogue? Are topics becoming more specific or broader? Is the conversation deepening on certain themes?

Be objective and analytical. Focus on factual content rather than emotional interpretation. You may note observable emotional states (e.g., \"wall became upset\") but avoid deeper psychological analysis. Be concise but specific.",
        count = memory.history_len(),
    ))
}

/// Ask the service how the summaries evolved; the answer is returned verbatim.
///
/// With fewer than two summaries the fixed `NOT_ENOUGH_HISTORY` message is
/// returned and the service is not called.
pub async fn analyze(
    service: &dyn GenerationService,
    model: &'static ModelInfo,
    memory: &MemoryManager,
) -> Result<String, EngineError> {
    let Some(prompt) = analysis_prompt(memory) else {
        return Ok(NOT_ENOUGH_HISTORY.to_string());
    };

    let messages = [ChatMessage::system(ANALYST_ROLE), ChatMessage::user(prompt)];
    info!(
        model = model.id,
        summaries = memory.history_len(),
        "running memory analysis"
    );

    let text = service
        .generate(&GenerationRequest {
            model,
            messages: &messages,
            temperature: ANALYSIS_TEMPERATURE,
            output_schema: None,
        })
        .await?;
    Ok(text)
}
