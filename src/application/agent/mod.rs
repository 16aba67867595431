//! In-process agent runtime.
//!
//! `LlmAgent` describes an agent, `Runner` executes turns for it against a
//! `ModelClient`, and the `AgentRunner`/`AgentLauncher` traits are the seam the
//! rest of the application depends on.

mod errors;
mod llm;
mod runner;
mod session;

#[cfg(test)]
mod tests;

pub use errors::AgentError;
pub use llm::LlmAgent;
pub use runner::{AgentLauncher, AgentRunner, EventStream, ModelLauncher, Runner};
pub use session::InMemorySessionService;
