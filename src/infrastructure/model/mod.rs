//! Model infrastructure module
//!
//! Provides the model backend used by the in-process agent runner.
//!
//! # Structure
//! - `types` - Request, Response, and Error types
//! - `traits` - ModelClient trait
//! - `factory` - Client factory driven by configuration
//! - `clients` - `generateContent` HTTP client

pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use clients::GeminiClient;
pub use factory::ProviderFactory;
pub use traits::ModelClient;
pub use types::{ModelError, ModelRequest, ModelResponse};
