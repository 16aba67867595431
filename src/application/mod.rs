pub mod agent;
pub mod cache;
pub mod catalog;
pub mod facilitator;
pub mod flatten;
pub mod runtime;

pub use cache::{AgentInstanceCache, CacheKey};
pub use catalog::{AgentCatalog, ToolDescriptor};
pub use facilitator::{FacilitatorBuild, FacilitatorFactory};
pub use flatten::{collect_response, flatten};
pub use runtime::SessionRuntime;
