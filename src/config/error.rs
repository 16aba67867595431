use std::io;
use std::net::AddrParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("required environment variable '{var}' is not set")]
    MissingEnv { var: &'static str },

    #[error("agent entries require a non-empty 'name'")]
    BlankAgentName,

    #[error("agent '{name}' is defined more than once")]
    DuplicateAgent { name: String },

    #[error("unknown model provider '{provider}' (expected 'vertex' or 'gemini')")]
    UnknownProvider { provider: String },

    #[error("'{field}' must be greater than zero")]
    ZeroLimit { field: &'static str },

    #[error("invalid bind address '{value}': {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: AddrParseError,
    },
}
