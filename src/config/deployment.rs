use super::error::ConfigError;
use crate::constants::{ENV_CLOUD_LOCATION, ENV_CLOUD_PROJECT, ENV_STORAGE_BUCKET};
use std::env;

/// Deployment identifiers that must be present before the server accepts traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub location: String,
    pub project: String,
    pub bucket: String,
}

impl DeploymentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve every identifier through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingEnv { var })
        };

        Ok(Self {
            location: require(ENV_CLOUD_LOCATION)?,
            project: require(ENV_CLOUD_PROJECT)?,
            bucket: require(ENV_STORAGE_BUCKET)?,
        })
    }

    pub fn staging_bucket(&self) -> String {
        format!("gs://{}", self.bucket)
    }
}
