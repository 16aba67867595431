use serde::Deserialize;

/// A sub-agent offered to the facilitator as a selectable tool.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instruction: String,
    /// Overrides the default model for this agent only
    #[serde(default)]
    pub model: Option<String>,
}

impl AgentConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            instruction: instruction.into(),
            model: None,
        }
    }
}

/// Agents registered when the configuration file defines none.
pub fn default_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig::new(
            "IdeaAgent",
            "Generates creative ideas.",
            "Come up with one idea about the given topic that will genuinely surprise everyone.",
        ),
        AgentConfig::new(
            "CriticAgent",
            "Evaluates and critiques ideas.",
            "Give constructive criticism of the idea and briefly list concrete improvements.",
        ),
    ]
}
