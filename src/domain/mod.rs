pub mod event;
pub mod types;

pub use event::AgentEvent;
pub use types::{Content, FunctionCall, FunctionDeclaration, FunctionResponse, Part, Role};
