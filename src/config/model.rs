use super::error::ConfigError;
use crate::constants::{
    DEFAULT_ACCESS_TOKEN_ENV, DEFAULT_API_KEY_ENV, DEFAULT_MAX_STEPS, DEFAULT_MODEL,
};
use serde::Deserialize;

/// Which `generateContent` surface the model client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    /// Vertex AI, addressed through the deployment project and location
    Vertex,
    /// Gemini developer API, authenticated with an API key
    Gemini,
}

impl ModelBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "vertex" | "vertexai" | "vertex-ai" => Some(Self::Vertex),
            "gemini" | "google" | "google-ai" => Some(Self::Gemini),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Gemini => "gemini",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub backend: ModelBackend,
    pub name: String,
    /// Base URL override; the backend default is used when absent
    pub endpoint: Option<String>,
    pub api_key_env: String,
    pub access_token_env: String,
    /// Upper bound on model calls within one turn
    pub max_steps: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::Vertex,
            name: DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            access_token_env: DEFAULT_ACCESS_TOKEN_ENV.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct RawModelConfig {
    provider: Option<String>,
    name: Option<String>,
    endpoint: Option<String>,
    api_key_env: Option<String>,
    access_token_env: Option<String>,
    max_steps: Option<usize>,
}

impl RawModelConfig {
    pub(crate) fn build(self) -> Result<ModelConfig, ConfigError> {
        let defaults = ModelConfig::default();
        let backend = match self.provider {
            Some(provider) => ModelBackend::parse(&provider)
                .ok_or(ConfigError::UnknownProvider { provider })?,
            None => defaults.backend,
        };
        let max_steps = self.max_steps.unwrap_or(defaults.max_steps);
        if max_steps == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "model.max_steps",
            });
        }

        Ok(ModelConfig {
            backend,
            name: self.name.unwrap_or(defaults.name),
            endpoint: self.endpoint.filter(|e| !e.trim().is_empty()),
            api_key_env: self.api_key_env.unwrap_or(defaults.api_key_env),
            access_token_env: self.access_token_env.unwrap_or(defaults.access_token_env),
            max_steps,
        })
    }
}
