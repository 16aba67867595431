//! Builds the facilitator agent from a runtime-selected subset of the catalog.

use super::agent::LlmAgent;
use super::catalog::{AgentCatalog, ToolDescriptor};
use crate::config::FacilitatorConfig;
use crate::constants::TOOLS_PLACEHOLDER;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// A configured facilitator together with the tools it was given.
#[derive(Debug, Clone)]
pub struct FacilitatorBuild {
    pub agent: Arc<LlmAgent>,
    pub tools: Vec<ToolDescriptor>,
}

pub struct FacilitatorFactory {
    catalog: Arc<AgentCatalog>,
    config: FacilitatorConfig,
    model: String,
}

impl FacilitatorFactory {
    pub fn new(catalog: Arc<AgentCatalog>, config: FacilitatorConfig, model: impl Into<String>) -> Self {
        Self {
            catalog,
            config,
            model: model.into(),
        }
    }

    pub fn catalog(&self) -> &Arc<AgentCatalog> {
        &self.catalog
    }

    /// Catalog entries named in `names`, in registration order. Unknown names are dropped.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Vec<ToolDescriptor> {
        let selected: HashSet<&str> = names.iter().map(|name| name.as_ref()).collect();
        for name in &selected {
            if self.catalog.resolve(name).is_none() {
                warn!(tool = *name, "Dropping unknown tool name");
            }
        }
        self.catalog
            .list_tools()
            .iter()
            .filter(|tool| selected.contains(tool.name.as_str()))
            .cloned()
            .collect()
    }

    pub fn build<S: AsRef<str>>(&self, names: &[S]) -> FacilitatorBuild {
        self.assemble(self.resolve(names))
    }

    /// Configure a facilitator with already resolved tools.
    pub fn assemble(&self, tools: Vec<ToolDescriptor>) -> FacilitatorBuild {
        let instruction = render_instruction(&self.config.instruction_template, &tools);
        let agent = LlmAgent::new(&self.config.name, &self.model)
            .with_description(&self.config.description)
            .with_instruction(instruction)
            .with_tools(tools.iter().map(|tool| Arc::clone(&tool.capability)).collect());
        FacilitatorBuild {
            agent: Arc::new(agent),
            tools,
        }
    }
}

/// Substitute a `- name: description` line per tool into the template.
pub fn render_instruction(template: &str, tools: &[ToolDescriptor]) -> String {
    let tool_list = tools
        .iter()
        .map(|tool| format!("- {}: {}", tool.name, tool.description))
        .collect::<Vec<_>>()
        .join("\n");
    template.replace(TOOLS_PLACEHOLDER, &tool_list).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::agent::default_agents;

    fn factory(template: &str) -> FacilitatorFactory {
        let catalog = Arc::new(AgentCatalog::from_configs(&default_agents(), "gemini-2.5-flash"));
        let config = FacilitatorConfig {
            instruction_template: template.to_string(),
            ..FacilitatorConfig::default()
        };
        FacilitatorFactory::new(catalog, config, "gemini-2.5-flash")
    }

    #[test]
    fn renders_selected_tools_into_instruction() {
        let build = factory("Tools:\n{{tools}}").build(&["CriticAgent", "IdeaAgent"]);

        assert_eq!(
            build.agent.instruction,
            "Tools:\n- IdeaAgent: Generates creative ideas.\n- CriticAgent: Evaluates and critiques ideas."
        );
        assert_eq!(build.agent.name, "Facilitator");
        assert_eq!(build.agent.model, "gemini-2.5-flash");
        let tool_names: Vec<_> = build.agent.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tool_names, ["IdeaAgent", "CriticAgent"]);
    }

    #[test]
    fn unknown_names_are_dropped() {
        let build = factory("{{tools}}").build(&["IdeaAgent", "Oracle"]);

        assert_eq!(build.tools.len(), 1);
        assert_eq!(build.agent.instruction, "- IdeaAgent: Generates creative ideas.");
    }

    #[test]
    fn no_tools_leaves_placeholder_empty() {
        let build = factory("Before\n{{tools}}\nAfter").build::<&str>(&[]);

        assert!(build.agent.tools.is_empty());
        assert_eq!(build.agent.instruction, "Before\n\nAfter");
    }

    #[test]
    fn build_is_deterministic_for_the_same_set() {
        let factory = factory("{{tools}}");

        let first = factory.build(&["IdeaAgent", "CriticAgent"]);
        let second = factory.build(&["CriticAgent", "IdeaAgent", "CriticAgent"]);

        assert_eq!(first.agent, second.agent);
    }
}
