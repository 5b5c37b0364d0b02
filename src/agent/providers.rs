use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::ModelInfo;
use crate::types::ChatMessage;

/// Strict JSON schema the reply must conform to.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub name: &'static str,
    pub schema: serde_json::Value,
}

/// One call to the generation service.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub model: &'static ModelInfo,
    pub messages: &'a [ChatMessage],
    /// Ignored by models that only accept the default temperature.
    pub temperature: f32,
    /// Free text when `None`.
    pub output_schema: Option<OutputSchema>,
}

/// Trait for generation service implementations.
///
/// Returns the raw message content; structured content is parsed by the
/// caller so that schema violations surface as engine failures.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError>;
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat completions, non-streaming.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the request body, shaped by what the model accepts.
    pub fn build_body(request: &GenerationRequest<'_>) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(ChatMessage::as_provider_message)
            .collect();

        let mut body = serde_json::json!({
            "model": request.model.id,
            "messages": messages,
        });

        if let Some(schema) = &request.output_schema {
            body["response_format"] = serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "strict": true,
                    "schema": schema.schema,
                }
            });
        }

        if request.model.supports_temperature {
            body["temperature"] = serde_json::json!(request.temperature);
        }

        if let Some(effort) = request.model.reasoning_effort {
            body["reasoning_effort"] = serde_json::json!(effort);
        }

        body
    }
}

#[async_trait]
impl GenerationService for OpenAiProvider {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        let body = Self::build_body(request);
        debug!(
            model = request.model.id,
            messages = request.messages.len(),
            structured = request.output_schema.is_some(),
            "calling chat completions"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let parsed: serde_json::Value = response.json().await?;
        extract_content(&parsed)
    }
}

/// Pull the first choice's message content out of a completion response.
pub fn extract_content(parsed: &serde_json::Value) -> Result<String, ProviderError> {
    let message = parsed
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("message"))
        .ok_or(ProviderError::EmptyResponse)?;

    if let Some(refusal) = message.get("refusal").and_then(|r| r.as_str()) {
        return Err(ProviderError::Refusal(refusal.to_string()));
    }

    message
        .get("content")
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or(ProviderError::EmptyResponse)
}

/// Create a provider from config.
pub fn from_config(config: &crate::config::OpenAiConfig) -> anyhow::Result<OpenAiProvider> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "no OpenAI API key. Set OPENAI_API_KEY or run `eastwing key openai`."
        )
    })?;
    Ok(OpenAiProvider::new(api_key, config.base_url.clone()))
}
