use super::*;
use crate::application::flatten::flatten;
use crate::domain::{AgentEvent, Content, FunctionCall, Part, Role};
use crate::infrastructure::model::{ModelClient, ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct ScriptedModel {
    responses: Arc<Mutex<VecDeque<ModelResponse>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedModel {
    fn new(responses: Vec<Content>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(ModelResponse::new).collect(),
            )),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request);
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| ModelError::invalid_response("scripted", "no scripted response left"))
    }
}

fn call(name: &str, request: &str) -> Content {
    Content::new(
        Role::Model,
        vec![Part::function_call(FunctionCall::new(
            name,
            json!({ "request": request }),
        ))],
    )
}

fn facilitator() -> Arc<LlmAgent> {
    let idea = LlmAgent::new("IdeaAgent", "gemini-2.5-flash")
        .with_description("Generates creative ideas.")
        .with_instruction("Propose one surprising idea.");
    Arc::new(
        LlmAgent::new("Facilitator", "gemini-2.5-flash")
            .with_instruction("Lead the meeting.")
            .with_tools(vec![Arc::new(idea)]),
    )
}

fn runner(model: &ScriptedModel, max_steps: usize) -> Runner {
    Runner::new(
        facilitator(),
        Arc::new(model.clone()),
        NonZeroUsize::new(8).expect("non-zero"),
        max_steps,
    )
}

async fn run_turn(runner: &Runner, query: &str) -> Vec<Result<AgentEvent, AgentError>> {
    runner
        .run("u1", "s1", Content::user_text(query))
        .await
        .expect("session exists")
        .collect()
        .await
}

#[tokio::test]
async fn plain_answer_yields_single_event() {
    let model = ScriptedModel::new(vec![Content::model_text("Welcome to the meeting.")]);
    let runner = runner(&model, 4);
    runner.create_session("u1", "s1").await.expect("created");

    let events = run_turn(&runner, "hello").await;

    assert_eq!(events.len(), 1);
    let event = events[0].as_ref().expect("event ok");
    assert_eq!(event.author, "Facilitator");
    assert_eq!(flatten(event), "Welcome to the meeting.");

    let history = runner.sessions().history("u1", "s1").await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Some(Role::User));
    assert_eq!(history[1].role, Some(Role::Model));

    let requests = model.requests().await;
    assert_eq!(requests[0].system_instruction.as_deref(), Some("Lead the meeting."));
    assert_eq!(requests[0].tools.len(), 1);
    assert_eq!(requests[0].tools[0].name, "IdeaAgent");
}

#[tokio::test]
async fn tool_call_runs_sub_agent_and_reports_result() {
    let model = ScriptedModel::new(vec![
        call("IdeaAgent", "office plants"),
        Content::model_text("Plants that vote on meeting agendas."),
        Content::model_text("The idea agent suggests voting plants."),
    ]);
    let runner = runner(&model, 4);
    runner.create_session("u1", "s1").await.expect("created");

    let events = run_turn(&runner, "give me an idea").await;

    let rendered: Vec<String> = events
        .iter()
        .map(|event| flatten(event.as_ref().expect("event ok")))
        .collect();
    assert_eq!(
        rendered,
        [
            "",
            "IdeaAgent: Plants that vote on meeting agendas.",
            "The idea agent suggests voting plants.",
        ]
    );

    let requests = model.requests().await;
    assert_eq!(requests.len(), 3);
    let sub_request = &requests[1];
    assert_eq!(
        sub_request.system_instruction.as_deref(),
        Some("Propose one surprising idea.")
    );
    assert!(sub_request.tools.is_empty());
    assert_eq!(sub_request.contents, vec![Content::user_text("office plants")]);
    // user turn, call, function response
    assert_eq!(requests[2].contents.len(), 3);

    let invocation = &events[0].as_ref().expect("event ok").invocation_id;
    assert!(
        events
            .iter()
            .all(|event| &event.as_ref().expect("event ok").invocation_id == invocation)
    );
}

#[tokio::test]
async fn undeclared_tool_gets_error_response() {
    let model = ScriptedModel::new(vec![
        call("Oracle", "anything"),
        Content::model_text("That tool is unavailable."),
    ]);
    let runner = runner(&model, 4);
    runner.create_session("u1", "s1").await.expect("created");

    let events = run_turn(&runner, "ask the oracle").await;

    assert_eq!(events.len(), 3);
    let response_event = events[1].as_ref().expect("event ok");
    let content = response_event.content.as_ref().expect("content");
    let response = content.parts[0]
        .function_response
        .as_ref()
        .expect("function response");
    assert_eq!(response.name, "Oracle");
    assert!(response.response.get("error").is_some());
    assert_eq!(flatten(response_event), "");
    assert_eq!(model.requests().await.len(), 2);
}

#[tokio::test]
async fn step_limit_ends_turn() {
    let model = ScriptedModel::new(vec![
        call("IdeaAgent", "one"),
        Content::model_text("first"),
        call("IdeaAgent", "two"),
        Content::model_text("second"),
    ]);
    let runner = runner(&model, 2);
    runner.create_session("u1", "s1").await.expect("created");

    let events = run_turn(&runner, "loop").await;

    assert_eq!(events.len(), 4);
    assert!(events.iter().all(Result::is_ok));
    assert_eq!(model.requests().await.len(), 4);
}

#[tokio::test]
async fn backend_failure_ends_stream_with_error() {
    let model = ScriptedModel::new(vec![]);
    let runner = runner(&model, 4);
    runner.create_session("u1", "s1").await.expect("created");

    let events = run_turn(&runner, "hello").await;

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(AgentError::Model(_))));
}

#[tokio::test]
async fn failed_tool_call_is_answered_in_history() {
    // only the facilitator's call is scripted, so the sub-agent's model call fails
    let model = ScriptedModel::new(vec![call("IdeaAgent", "x")]);
    let runner = runner(&model, 4);
    runner.create_session("u1", "s1").await.expect("created");

    let events = run_turn(&runner, "brainstorm").await;

    assert_eq!(events.len(), 2);
    assert!(events[0].is_ok());
    assert!(matches!(events[1], Err(AgentError::Model(_))));

    let history = runner.sessions().history("u1", "s1").await.expect("history");
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].function_calls().count(), 1);
    let answer = history[2].parts[0]
        .function_response
        .as_ref()
        .expect("function response");
    assert_eq!(answer.name, "IdeaAgent");
    assert!(answer.response.get("error").is_some());

    model
        .responses
        .lock()
        .await
        .push_back(ModelResponse::new(Content::model_text("Let's try again.")));
    let events = run_turn(&runner, "retry").await;

    assert_eq!(events.len(), 1);
    assert_eq!(flatten(events[0].as_ref().expect("event ok")), "Let's try again.");
}

#[tokio::test]
async fn unknown_session_is_rejected_before_streaming() {
    let model = ScriptedModel::new(vec![]);
    let runner = runner(&model, 4);

    let error = match runner.run("u1", "missing", Content::user_text("hi")).await {
        Ok(_) => panic!("session should not exist"),
        Err(error) => error,
    };

    assert!(error.is_not_found());
    assert!(model.requests().await.is_empty());
}

#[tokio::test]
async fn sessions_are_scoped_per_user() {
    let model = ScriptedModel::new(vec![]);
    let runner = runner(&model, 4);
    runner.create_session("u1", "s1").await.expect("created");

    let result = runner.run("u2", "s1", Content::user_text("hi")).await;

    assert!(matches!(result, Err(AgentError::SessionNotFound { .. })));
}

#[tokio::test]
async fn session_ids_are_never_reused() {
    let model = ScriptedModel::new(vec![]);
    let runner = runner(&model, 4);
    runner.create_session("u1", "s1").await.expect("created");

    let error = runner
        .create_session("u1", "s1")
        .await
        .expect_err("duplicate session");

    assert!(matches!(error, AgentError::SessionExists { .. }));
}

#[tokio::test]
async fn session_history_is_bounded() {
    let service = InMemorySessionService::new(NonZeroUsize::new(2).expect("non-zero"));
    service.create("u1", "a").await.expect("a");
    service.create("u1", "b").await.expect("b");
    service.create("u1", "c").await.expect("c");

    assert_eq!(service.len().await, 2);
    assert!(service.history("u1", "a").await.is_err());
    assert!(service.history("u1", "c").await.is_ok());
}
