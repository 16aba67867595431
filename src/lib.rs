pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, cache, catalog};
pub use config::AppConfig;
pub use domain::types;
pub use infrastructure::{model, server};

use application::agent::ModelLauncher;
use application::{AgentCatalog, AgentInstanceCache, FacilitatorFactory};
use infrastructure::model::ProviderFactory;
use std::error::Error;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::info;

/// Wire the agent stack described by `config` into a ready cache.
pub fn build_cache(config: &AppConfig) -> Result<Arc<AgentInstanceCache>, Box<dyn Error>> {
    let model = ProviderFactory::create(&config.model, &config.deployment);
    let catalog = Arc::new(AgentCatalog::from_configs(&config.agents, &config.model.name));
    info!(
        provider = model.id(),
        model = config.model.name.as_str(),
        tools = ?catalog.names(),
        "Agent catalog ready"
    );

    let capacity = NonZeroUsize::new(config.rest_server.max_sessions)
        .ok_or("rest_server.max_sessions must be greater than zero")?;
    let factory = FacilitatorFactory::new(
        catalog,
        config.facilitator.clone(),
        config.model.name.clone(),
    );
    let launcher = Arc::new(ModelLauncher::new(model, capacity, config.model.max_steps));
    Ok(Arc::new(AgentInstanceCache::new(factory, launcher, capacity)))
}
