use thiserror::Error;

/// Failure talking to the external generation service.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response contained no message content")]
    EmptyResponse,

    #[error("model refused: {0}")]
    Refusal(String),
}

/// A conversational turn that could not complete. Always fatal to the session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("reply did not match the wall_response schema: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

/// An unknown label for one of the session's closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("'{0}' is not a valid speed")]
    UnknownSpeed(String),

    #[error("'{0}' is not a valid model")]
    UnknownModel(String),

    #[error("'{0}' is not a valid mood")]
    UnknownMood(String),

    #[error("'{0}' is not a valid color theme")]
    UnknownColor(String),
}
