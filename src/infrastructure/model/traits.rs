//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Trait for model backends that answer one `generateContent` call
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Get the client ID
    fn id(&self) -> &str;

    /// Send a generation request
    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
