use super::CONFIG_PATH;
use super::agent::{AgentConfig, default_agents};
use super::app::AppConfig;
use super::deployment::DeploymentConfig;
use super::error::ConfigError;
use super::facilitator::RawFacilitator;
use super::model::RawModelConfig;
use super::server::RawRestServer;
use crate::constants::ENV_PATHS;
use dotenvy::from_filename;
use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    model: RawModelConfig,
    #[serde(default)]
    facilitator: RawFacilitator,
    #[serde(default)]
    agents: Vec<AgentConfig>,
    #[serde(default)]
    rest_server: RawRestServer,
}

/// Ensures environment variables are loaded from the `.env` files
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        for path in ENV_PATHS {
            if from_filename(path).is_ok() {
                debug!(path, "Loaded environment file");
            }
        }
    });
}

/// Load and validate configuration.
///
/// An explicit path must exist; a missing file at the default path falls back
/// to built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let lookup = |key: &str| env::var(key).ok();

    if let Some(path) = path {
        let content = read_file(path)?;
        return parse_config(&content, path, lookup);
    }

    let default_path = Path::new(CONFIG_PATH);
    match read_file(default_path) {
        Ok(content) => parse_config(&content, default_path, lookup),
        Err(ConfigError::NotFound { .. }) => {
            info!(path = CONFIG_PATH, "Configuration file not found; using defaults");
            validate_and_build(RawConfig::default(), lookup)
        }
        Err(other) => Err(other),
    }
}

pub(super) fn parse_config<F>(content: &str, path: &Path, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_and_build(parsed, lookup)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    debug!(path = %path.display(), "Reading server configuration file");
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn validate_and_build<F>(parsed: RawConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let deployment = DeploymentConfig::from_lookup(lookup)?;
    let model = parsed.model.build()?;
    let rest_server = parsed.rest_server.build()?;

    let agents = if parsed.agents.is_empty() {
        default_agents()
    } else {
        parsed.agents
    };
    let mut seen = HashSet::new();
    for agent in &agents {
        if agent.name.trim().is_empty() {
            return Err(ConfigError::BlankAgentName);
        }
        if !seen.insert(agent.name.as_str()) {
            return Err(ConfigError::DuplicateAgent {
                name: agent.name.clone(),
            });
        }
    }

    Ok(AppConfig {
        deployment,
        model,
        facilitator: parsed.facilitator.into(),
        agents,
        rest_server,
    })
}
