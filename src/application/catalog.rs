//! Registry of the agents a facilitator may call as tools.

use super::agent::LlmAgent;
use crate::config::AgentConfig;
use std::sync::Arc;
use tracing::warn;

/// A registered tool: a stable name, a human description and the agent behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub capability: Arc<LlmAgent>,
}

impl ToolDescriptor {
    pub fn new(agent: LlmAgent) -> Self {
        Self {
            name: agent.name.clone(),
            description: agent.description.clone(),
            capability: Arc::new(agent),
        }
    }
}

/// Tools in registration order. Built once at startup and never mutated.
#[derive(Debug, Default)]
pub struct AgentCatalog {
    tools: Vec<ToolDescriptor>,
}

impl AgentCatalog {
    /// Later entries reusing an already registered name are ignored.
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        let mut registered: Vec<ToolDescriptor> = Vec::with_capacity(tools.len());
        for tool in tools {
            if registered.iter().any(|existing| existing.name == tool.name) {
                warn!(tool = tool.name.as_str(), "Ignoring duplicate tool registration");
                continue;
            }
            registered.push(tool);
        }
        Self { tools: registered }
    }

    pub fn from_configs(agents: &[AgentConfig], default_model: &str) -> Self {
        let tools = agents
            .iter()
            .map(|config| {
                let model = config.model.as_deref().unwrap_or(default_model);
                ToolDescriptor::new(
                    LlmAgent::new(&config.name, model)
                        .with_description(&config.description)
                        .with_instruction(&config.instruction),
                )
            })
            .collect();
        Self::new(tools)
    }

    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Unknown names resolve to `None`; callers filter them out.
    pub fn resolve(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
