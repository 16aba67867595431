//! Model types - Request, Response, and Error types

use crate::domain::{Content, FunctionDeclaration};
use thiserror::Error;

/// One stateless generation request
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub contents: Vec<Content>,
    pub tools: Vec<FunctionDeclaration>,
}

impl ModelRequest {
    pub fn new(model: impl Into<String>, contents: Vec<Content>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            contents,
            tools: Vec::new(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        let instruction = instruction.into();
        self.system_instruction = (!instruction.trim().is_empty()).then_some(instruction);
        self
    }

    pub fn with_tools(mut self, tools: Vec<FunctionDeclaration>) -> Self {
        self.tools = tools;
        self
    }
}

/// Model response; `content` is absent when the backend returned an empty candidate
#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

impl ModelResponse {
    pub fn new(content: Content) -> Self {
        Self {
            content: Some(content),
            finish_reason: None,
        }
    }
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' requires credentials in environment variable '{env_var}'")]
    MissingCredentials { provider: String, env_var: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' answered with status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn missing_credentials(provider: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self::MissingCredentials {
            provider: provider.into(),
            env_var: env_var.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            body: body.into().trim().to_string(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}
