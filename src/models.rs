use crate::error::ConfigError;

/// A generation model the session can switch to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub description: &'static str,
    pub performance: &'static str,
    pub speed: &'static str,
    pub cost: &'static str,
    /// GPT-5 models only accept the default temperature.
    pub supports_temperature: bool,
    /// Set for reasoning models; sent as `reasoning_effort`.
    pub reasoning_effort: Option<&'static str>,
}

pub const DEFAULT_MODEL: &str = "gpt-5-mini";

pub static MODELS: [ModelInfo; 4] = [
    ModelInfo {
        id: "gpt-5-nano",
        description: "Fastest responses, lowest cost, good quality",
        performance: "Good",
        speed: "Very Fast",
        cost: "Cheapest",
        supports_temperature: false,
        reasoning_effort: Some("minimal"),
    },
    ModelInfo {
        id: "gpt-5-mini",
        description: "Excellent quality, fast responses, moderate cost",
        performance: "Excellent",
        speed: "Fast",
        cost: "Moderate",
        supports_temperature: false,
        reasoning_effort: Some("minimal"),
    },
    ModelInfo {
        id: "gpt-5",
        description: "Best quality and accuracy, slower, higher cost",
        performance: "Best",
        speed: "Moderate",
        cost: "Most Expensive",
        supports_temperature: false,
        reasoning_effort: Some("low"),
    },
    ModelInfo {
        id: "gpt-4o-mini",
        description: "Legacy model, good quality, fast responses",
        performance: "Good",
        speed: "Fast",
        cost: "Low",
        supports_temperature: true,
        reasoning_effort: None,
    },
];

/// Look up a model by id.
pub fn find(id: &str) -> Result<&'static ModelInfo, ConfigError> {
    let id = id.trim();
    MODELS
        .iter()
        .find(|m| m.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| ConfigError::UnknownModel(id.to_string()))
}

pub fn default_model() -> &'static ModelInfo {
    MODELS
        .iter()
        .find(|m| m.id == DEFAULT_MODEL)
        .unwrap_or(&MODELS[0])
}

/// Validate a model id, substituting the default when it is unknown.
///
/// Returns the model to use and whether the requested id was valid.
pub fn validate(id: &str) -> (&'static ModelInfo, bool) {
    match find(id) {
        Ok(model) => (model, true),
        Err(_) => (default_model(), false),
    }
}

pub fn model_ids() -> Vec<&'static str> {
    MODELS.iter().map(|m| m.id).collect()
}
