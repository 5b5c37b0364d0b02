use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::agent::providers::DEFAULT_BASE_URL;
use crate::models::{self, DEFAULT_MODEL, ModelInfo};
use crate::stage::{Personality, ProgressionSpeed};
use crate::theme::ColorTheme;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EastWingConfig {
    pub session: SessionConfig,
    pub openai: OpenAiConfig,
    pub facts: FactsConfig,
}

/// Session-start choices. Labels are validated by `resolve`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_speed")]
    pub speed: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub mood: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            model: default_model(),
            color: default_color(),
            mood: None,
        }
    }
}

fn default_speed() -> String {
    "slow".into()
}
fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_color() -> String {
    "white-house".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactsConfig {
    #[serde(default = "default_facts_enabled")]
    pub enabled: bool,
    pub tavily_api_key: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            enabled: default_facts_enabled(),
            tavily_api_key: None,
            max_results: default_max_results(),
        }
    }
}

fn default_facts_enabled() -> bool {
    true
}
fn default_max_results() -> u32 {
    3
}

/// Session-start settings after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSession {
    pub speed: ProgressionSpeed,
    pub model: &'static ModelInfo,
    pub color: ColorTheme,
    pub mood: Option<Personality>,
    /// One line per label that was replaced by its default.
    pub notices: Vec<String>,
}

impl SessionConfig {
    /// Validate every label, substituting the documented default for any
    /// that is unknown.
    pub fn resolve(&self) -> ResolvedSession {
        let mut notices = Vec::new();

        let speed = self.speed.parse::<ProgressionSpeed>().unwrap_or_else(|e| {
            notices.push(format!("{e}. Using default speed: slow"));
            ProgressionSpeed::default()
        });

        let (model, valid) = models::validate(&self.model);
        if !valid {
            notices.push(format!(
                "'{}' is not a valid model. Available models: {}. Using default model: {}",
                self.model,
                models::model_ids().join(", "),
                model.id
            ));
        }

        let color = self.color.parse::<ColorTheme>().unwrap_or_else(|e| {
            notices.push(format!("{e}. Using default color theme: white-house"));
            ColorTheme::default()
        });

        let mood = self.mood.as_deref().and_then(|m| match m.parse::<Personality>() {
            Ok(mood) => Some(mood),
            Err(e) => {
                notices.push(format!("{e}. Mood will follow the conversation."));
                None
            }
        });

        for notice in &notices {
            warn!("{notice}");
        }

        ResolvedSession {
            speed,
            model,
            color,
            mood,
            notices,
        }
    }
}

/// Load configuration from file or use defaults.
///
/// Search order:
/// 1. `EASTWING_CONFIG` env var
/// 2. `~/.eastwing/config.toml`
/// 3. Zero-config defaults (no file needed)
pub fn load() -> anyhow::Result<EastWingConfig> {
    let path = config_path();

    let mut config = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: EastWingConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;
        validate(&config)?;
        info!("loaded config from {}", path.display());
        config
    } else {
        info!("no config file found, using zero-config defaults");
        EastWingConfig::default()
    };

    resolve_api_keys(&mut config);
    Ok(config)
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("EASTWING_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".eastwing").join("config.toml")
}

/// Resolve API keys from the environment, then the credential store.
fn resolve_api_keys(config: &mut EastWingConfig) {
    if config.openai.api_key.is_none() {
        config.openai.api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .or_else(|| crate::secrets::load_api_key("openai"));
    }
    if config.facts.tavily_api_key.is_none() {
        config.facts.tavily_api_key = std::env::var("TAVILY_API_KEY")
            .ok()
            .or_else(|| crate::secrets::load_api_key("tavily"));
    }
}

/// Validate the config and return clear error messages.
fn validate(config: &EastWingConfig) -> anyhow::Result<()> {
    if config.facts.max_results == 0 {
        anyhow::bail!("facts.max_results must be > 0");
    }
    if !config.openai.base_url.starts_with("http") {
        anyhow::bail!(
            "openai.base_url must be an http(s) URL, got '{}'",
            config.openai.base_url
        );
    }
    Ok(())
}
