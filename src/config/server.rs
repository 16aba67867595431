use super::error::ConfigError;
use crate::constants::{DEFAULT_BIND, DEFAULT_MAX_SESSIONS, DEFAULT_STATIC_DIR};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestServerConfig {
    pub bind: SocketAddr,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    pub static_dir: PathBuf,
    /// Capacity of the session index before least-recently-used sessions are dropped
    pub max_sessions: usize,
}

impl Default for RestServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origins: Vec::new(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct RawRestServer {
    bind: Option<String>,
    #[serde(default)]
    cors_origins: Vec<String>,
    static_dir: Option<String>,
    max_sessions: Option<usize>,
}

impl RawRestServer {
    pub(crate) fn build(self) -> Result<RestServerConfig, ConfigError> {
        let value = self.bind.unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = value
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: value.clone(),
                source,
            })?;
        let max_sessions = self.max_sessions.unwrap_or(DEFAULT_MAX_SESSIONS);
        if max_sessions == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "rest_server.max_sessions",
            });
        }

        Ok(RestServerConfig {
            bind,
            cors_origins: self
                .cors_origins
                .into_iter()
                .filter(|origin| origin.trim() != "*")
                .collect(),
            static_dir: self
                .static_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            max_sessions,
        })
    }
}
