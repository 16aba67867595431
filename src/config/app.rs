use super::agent::AgentConfig;
use super::deployment::DeploymentConfig;
use super::error::ConfigError;
use super::facilitator::FacilitatorConfig;
use super::model::ModelConfig;
use super::server::RestServerConfig;
use std::path::Path;

/// Application configuration assembled from `server.toml` and the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub deployment: DeploymentConfig,
    pub model: ModelConfig,
    pub facilitator: FacilitatorConfig,
    pub agents: Vec<AgentConfig>,
    pub rest_server: RestServerConfig,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Build configuration from TOML text, resolving env vars through `lookup`
    pub fn from_toml_str<F>(content: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        super::loader::parse_config(content, Path::new("<inline>"), lookup)
    }
}
