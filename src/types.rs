use serde::{Deserialize, Serialize};

/// Role tag of a block sent to the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One role-tagged text block of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Convert to a provider-facing message.
    pub fn as_provider_message(&self) -> serde_json::Value {
        serde_json::json!({
            "role": self.role.as_str(),
            "content": self.content,
        })
    }
}

/// Structured result of a dialogue call.
///
/// Both fields are required and nothing else is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallReply {
    pub reply: String,
    pub summary: String,
}

impl WallReply {
    pub const SCHEMA_NAME: &'static str = "wall_response";

    /// JSON schema handed to the service as the strict output contract.
    pub fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "reply": {
                    "type": "string",
                    "description": "The wall's dialogue to the player"
                },
                "summary": {
                    "type": "string",
                    "description": "Summary of the entire conversation so far, including this exchange"
                }
            },
            "required": ["reply", "summary"],
            "additionalProperties": false
        })
    }

    /// Parse the raw content returned by the service.
    pub fn from_content(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// The request most recently sent, kept for the `api` commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastRequest {
    pub messages: Vec<ChatMessage>,
    pub length_instruction: String,
}
