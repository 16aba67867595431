//! Provider factory - creates clients from config

use super::clients::GeminiClient;
use super::traits::ModelClient;
use crate::config::{DeploymentConfig, ModelConfig};
use std::env;
use std::sync::Arc;
use tracing::warn;

/// Resolve a credential from the environment variable named by `env_var`
pub fn resolve_credential(provider: &str, env_var: &str) -> Option<String> {
    let raw = env_var.trim();
    if raw.is_empty() {
        return None;
    }
    match env::var(raw) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        Ok(_) | Err(_) => {
            warn!(
                provider,
                env_var = raw,
                "Credential environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating the model client from configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(config: &ModelConfig, deployment: &DeploymentConfig) -> Arc<dyn ModelClient> {
        Arc::new(GeminiClient::from_config(config, deployment))
    }
}
