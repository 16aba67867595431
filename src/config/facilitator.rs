use crate::constants::{
    DEFAULT_FACILITATOR_DESCRIPTION, DEFAULT_FACILITATOR_INSTRUCTIONS, DEFAULT_FACILITATOR_NAME,
};
use serde::Deserialize;

/// Identity and instruction template of the composite facilitator agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilitatorConfig {
    pub name: String,
    pub description: String,
    /// Instruction text; `{{tools}}` is replaced with the selected tool list
    pub instruction_template: String,
}

impl Default for FacilitatorConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_FACILITATOR_NAME.to_string(),
            description: DEFAULT_FACILITATOR_DESCRIPTION.to_string(),
            instruction_template: DEFAULT_FACILITATOR_INSTRUCTIONS.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct RawFacilitator {
    name: Option<String>,
    description: Option<String>,
    instruction_template: Option<String>,
}

impl From<RawFacilitator> for FacilitatorConfig {
    fn from(raw: RawFacilitator) -> Self {
        let defaults = FacilitatorConfig::default();
        Self {
            name: raw.name.unwrap_or(defaults.name),
            description: raw.description.unwrap_or(defaults.description),
            instruction_template: raw
                .instruction_template
                .unwrap_or(defaults.instruction_template),
        }
    }
}
