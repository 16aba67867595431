use crate::domain::FunctionDeclaration;
use serde_json::json;
use std::sync::Arc;

/// Immutable description of a model-backed agent.
///
/// Sub-agents listed in `tools` are offered to the model as functions taking a
/// single `request` string; calling one runs that agent for a single exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmAgent {
    pub name: String,
    pub description: String,
    pub model: String,
    pub instruction: String,
    pub tools: Vec<Arc<LlmAgent>>,
}

impl LlmAgent {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            model: model.into(),
            instruction: String::new(),
            tools: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_tools(mut self, tools: Vec<Arc<LlmAgent>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn find_tool(&self, name: &str) -> Option<&Arc<LlmAgent>> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn tool_declarations(&self) -> Vec<FunctionDeclaration> {
        self.tools.iter().map(|tool| tool.as_declaration()).collect()
    }

    fn as_declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: json!({
                "type": "OBJECT",
                "properties": {
                    "request": { "type": "STRING" }
                },
                "required": ["request"]
            }),
        }
    }
}
