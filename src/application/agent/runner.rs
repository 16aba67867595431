use super::errors::AgentError;
use super::llm::LlmAgent;
use super::session::InMemorySessionService;
use crate::domain::{AgentEvent, Content, FunctionCall, FunctionResponse, Part, Role};
use crate::infrastructure::model::{ModelClient, ModelRequest};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::stream::{BoxStream, Stream, StreamExt};
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Lazy, single-use sequence of events answering one query.
pub type EventStream = BoxStream<'static, Result<AgentEvent, AgentError>>;

/// A running agent: allocates isolated sessions and streams turns through them.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    fn app_name(&self) -> &str;

    async fn create_session(&self, user_id: &str, session_id: &str) -> Result<(), AgentError>;

    async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        message: Content,
    ) -> Result<EventStream, AgentError>;
}

/// Turns an agent description into a running `AgentRunner`.
pub trait AgentLauncher: Send + Sync {
    fn launch(&self, agent: Arc<LlmAgent>) -> Arc<dyn AgentRunner>;
}

/// Launches `Runner`s that share one model client.
pub struct ModelLauncher {
    model: Arc<dyn ModelClient>,
    session_capacity: NonZeroUsize,
    max_steps: usize,
}

impl ModelLauncher {
    pub fn new(model: Arc<dyn ModelClient>, session_capacity: NonZeroUsize, max_steps: usize) -> Self {
        Self {
            model,
            session_capacity,
            max_steps,
        }
    }
}

impl AgentLauncher for ModelLauncher {
    fn launch(&self, agent: Arc<LlmAgent>) -> Arc<dyn AgentRunner> {
        info!(
            agent = agent.name.as_str(),
            model = agent.model.as_str(),
            provider = self.model.id(),
            tools = agent.tools.len(),
            "Launching agent runner"
        );
        Arc::new(Runner::new(
            agent,
            Arc::clone(&self.model),
            self.session_capacity,
            self.max_steps,
        ))
    }
}

pub struct Runner {
    agent: Arc<LlmAgent>,
    model: Arc<dyn ModelClient>,
    sessions: Arc<InMemorySessionService>,
    max_steps: usize,
}

impl Runner {
    pub fn new(
        agent: Arc<LlmAgent>,
        model: Arc<dyn ModelClient>,
        session_capacity: NonZeroUsize,
        max_steps: usize,
    ) -> Self {
        Self {
            agent,
            model,
            sessions: Arc::new(InMemorySessionService::new(session_capacity)),
            max_steps: max_steps.max(1),
        }
    }

    pub fn sessions(&self) -> &InMemorySessionService {
        &self.sessions
    }
}

#[async_trait]
impl AgentRunner for Runner {
    fn app_name(&self) -> &str {
        &self.agent.name
    }

    async fn create_session(&self, user_id: &str, session_id: &str) -> Result<(), AgentError> {
        self.sessions.create(user_id, session_id).await
    }

    async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        message: Content,
    ) -> Result<EventStream, AgentError> {
        self.sessions.append(user_id, session_id, message).await?;

        let turn = Turn {
            agent: Arc::clone(&self.agent),
            model: Arc::clone(&self.model),
            sessions: Arc::clone(&self.sessions),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            invocation_id: format!("e-{}", Uuid::new_v4()),
            max_steps: self.max_steps,
        };
        debug!(
            agent = self.agent.name.as_str(),
            session_id,
            invocation_id = turn.invocation_id.as_str(),
            "Starting agent turn"
        );
        Ok(turn.into_stream().boxed())
    }
}

/// State owned by one in-flight turn.
struct Turn {
    agent: Arc<LlmAgent>,
    model: Arc<dyn ModelClient>,
    sessions: Arc<InMemorySessionService>,
    user_id: String,
    session_id: String,
    invocation_id: String,
    max_steps: usize,
}

impl Turn {
    fn into_stream(self) -> impl Stream<Item = Result<AgentEvent, AgentError>> + Send + 'static {
        let Turn {
            agent,
            model,
            sessions,
            user_id,
            session_id,
            invocation_id,
            max_steps,
        } = self;

        try_stream! {
            for step in 1..=max_steps {
                let history = sessions.history(&user_id, &session_id).await?;
                let request = ModelRequest::new(agent.model.clone(), history)
                    .with_system_instruction(agent.instruction.clone())
                    .with_tools(agent.tool_declarations());
                let response = model.generate(request).await.map_err(AgentError::from)?;

                let calls: Vec<FunctionCall> = response
                    .content
                    .iter()
                    .flat_map(|content| content.function_calls().cloned())
                    .collect();
                let recorded = response.content.clone().map(|mut content| {
                    content.role.get_or_insert(Role::Model);
                    content
                });
                yield AgentEvent::new(&invocation_id, &agent.name, response.content);

                if calls.is_empty() {
                    if let Some(content) = recorded {
                        sessions.append(&user_id, &session_id, content).await?;
                    }
                    debug!(step, invocation_id = invocation_id.as_str(), "Agent turn completed");
                    return;
                }

                debug!(step, calls = calls.len(), "Invoking agent tools");
                let (parts, failure) = answer_calls(model.as_ref(), &agent, &calls).await;
                let content = Content::new(Role::User, parts);
                // calls and their answers land in history together
                if let Some(recorded) = recorded {
                    sessions.append(&user_id, &session_id, recorded).await?;
                }
                sessions.append(&user_id, &session_id, content.clone()).await?;
                if let Some(error) = failure {
                    Err::<(), AgentError>(error)?;
                }
                yield AgentEvent::new(&invocation_id, &agent.name, Some(content));
            }

            warn!(
                max_steps,
                invocation_id = invocation_id.as_str(),
                "Agent turn stopped at the step limit"
            );
        }
    }
}

/// Answers every call in order. After the first failure the remaining calls are
/// answered with error responses and the failure is returned alongside.
async fn answer_calls(
    model: &dyn ModelClient,
    agent: &LlmAgent,
    calls: &[FunctionCall],
) -> (Vec<Part>, Option<AgentError>) {
    let mut parts = Vec::with_capacity(calls.len());
    let mut failure: Option<AgentError> = None;
    for call in calls {
        let response = if failure.is_some() {
            FunctionResponse::error(&call.name, "skipped after an earlier tool failure")
        } else {
            match invoke_tool(model, agent, call).await {
                Ok(response) => response,
                Err(error) => {
                    warn!(tool = call.name.as_str(), %error, "Agent tool failed");
                    let response = FunctionResponse::error(&call.name, error.to_string());
                    failure = Some(error);
                    response
                }
            }
        };
        parts.push(Part::function_response(response));
    }
    (parts, failure)
}

/// Runs the sub-agent named by `call` for a single exchange.
async fn invoke_tool(
    model: &dyn ModelClient,
    agent: &LlmAgent,
    call: &FunctionCall,
) -> Result<FunctionResponse, AgentError> {
    let Some(tool) = agent.find_tool(&call.name) else {
        warn!(tool = call.name.as_str(), "Model called an undeclared tool");
        return Ok(FunctionResponse::error(
            &call.name,
            format!("tool '{}' is not available", call.name),
        ));
    };

    let request_text = match call.args.get("request") {
        Some(Value::String(text)) => text.clone(),
        _ => call.args.to_string(),
    };
    info!(tool = tool.name.as_str(), "Calling agent tool");

    let request = ModelRequest::new(tool.model.clone(), vec![Content::user_text(request_text)])
        .with_system_instruction(tool.instruction.clone());
    let response = model.generate(request).await?;
    let result = response
        .content
        .map(|content| content.joined_text())
        .unwrap_or_default();

    Ok(FunctionResponse::result(&tool.name, result))
}
