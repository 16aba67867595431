pub mod agent;
pub mod app;
pub mod deployment;
pub mod error;
pub mod facilitator;
pub mod loader;
pub mod model;
pub mod server;

pub use crate::constants::CONFIG_PATH;

pub use agent::AgentConfig;
pub use app::AppConfig;
pub use deployment::DeploymentConfig;
pub use error::ConfigError;
pub use facilitator::FacilitatorConfig;
pub use model::{ModelBackend, ModelConfig};
pub use server::RestServerConfig;
