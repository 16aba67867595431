//! `generateContent` client for the Gemini developer API and Vertex AI

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::{DeploymentConfig, ModelBackend, ModelConfig};
use crate::constants::{DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_ENDPOINT};
use crate::domain::{Content, FunctionDeclaration, Part};
use crate::infrastructure::model::factory::resolve_credential;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

/// Where requests are sent and how they authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeminiEndpoint {
    Developer {
        base_url: String,
        api_path: String,
    },
    Vertex {
        base_url: String,
        project: String,
        location: String,
    },
}

/// Gemini client; the credential is an API key or a bearer token depending on the endpoint
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
    endpoint: GeminiEndpoint,
    credential: Option<String>,
    credential_env: String,
}

impl GeminiClient {
    pub fn from_config(config: &ModelConfig, deployment: &DeploymentConfig) -> Self {
        let id = config.backend.as_str();
        match config.backend {
            ModelBackend::Gemini => Self::new(
                id,
                GeminiEndpoint::Developer {
                    base_url: config
                        .endpoint
                        .clone()
                        .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
                    api_path: DEFAULT_GEMINI_API_PATH.to_string(),
                },
                resolve_credential(id, &config.api_key_env),
                &config.api_key_env,
            ),
            ModelBackend::Vertex => Self::new(
                id,
                GeminiEndpoint::Vertex {
                    base_url: config.endpoint.clone().unwrap_or_else(|| {
                        format!("https://{}-aiplatform.googleapis.com", deployment.location)
                    }),
                    project: deployment.project.clone(),
                    location: deployment.location.clone(),
                },
                resolve_credential(id, &config.access_token_env),
                &config.access_token_env,
            ),
        }
    }

    pub fn new(
        id: impl Into<String>,
        endpoint: GeminiEndpoint,
        credential: Option<String>,
        credential_env: impl Into<String>,
    ) -> Self {
        Self {
            base: HttpClientBase::new(id),
            endpoint,
            credential,
            credential_env: credential_env.into(),
        }
    }

    fn build_model_url(&self, model: &str) -> String {
        match &self.endpoint {
            GeminiEndpoint::Developer { base_url, api_path } => {
                let base = base_url.trim_end_matches('/');
                format!("{base}/{api_path}/{model}:generateContent")
            }
            GeminiEndpoint::Vertex {
                base_url,
                project,
                location,
            } => {
                let base = base_url.trim_end_matches('/');
                format!(
                    "{base}/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent"
                )
            }
        }
    }

    fn require_credential(&self) -> Result<&str, ModelError> {
        self.credential
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ModelError::missing_credentials(&self.base.id, &self.credential_env))
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let credential = self.require_credential()?;
        let url = self.build_model_url(&request.model);
        let payload = GenerateContentRequest::from(&request);

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            contents = request.contents.len(),
            tools = request.tools.len(),
            "Sending request to Gemini"
        );

        let response: GenerateContentResponse = match self.endpoint {
            GeminiEndpoint::Developer { .. } => {
                self.base
                    .post_with_api_key(&url, credential, &payload)
                    .await?
            }
            GeminiEndpoint::Vertex { .. } => {
                self.base.post_with_bearer(&url, credential, &payload).await?
            }
        };

        let candidate = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing candidates"))?;
        debug!(
            finish_reason = candidate.finish_reason.as_deref(),
            "Received response from Gemini"
        );

        Ok(ModelResponse {
            content: candidate.content.filter(|c| !c.parts.is_empty()),
            finish_reason: candidate.finish_reason,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolBlock<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolBlock<'a> {
    function_declarations: &'a [FunctionDeclaration],
}

impl<'a> From<&'a ModelRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a ModelRequest) -> Self {
        let system_instruction = request.system_instruction.as_ref().map(|text| Content {
            role: None,
            parts: vec![Part::text(text.clone())],
        });
        let tools = if request.tools.is_empty() {
            Vec::new()
        } else {
            vec![ToolBlock {
                function_declarations: &request.tools,
            }]
        };
        Self {
            contents: &request.contents,
            system_instruction,
            tools,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use mockito::Matcher;
    use serde_json::json;

    fn developer_client(base_url: String, key: Option<&str>) -> GeminiClient {
        GeminiClient::new(
            "gemini",
            GeminiEndpoint::Developer {
                base_url,
                api_path: DEFAULT_GEMINI_API_PATH.to_string(),
            },
            key.map(String::from),
            "GOOGLE_API_KEY",
        )
    }

    #[test]
    fn builds_vertex_url_from_deployment() {
        let client = GeminiClient::new(
            "vertex",
            GeminiEndpoint::Vertex {
                base_url: "https://us-central1-aiplatform.googleapis.com/".to_string(),
                project: "demo".to_string(),
                location: "us-central1".to_string(),
            },
            Some("token".to_string()),
            "GOOGLE_OAUTH_ACCESS_TOKEN",
        );

        assert_eq!(
            client.build_model_url("gemini-2.5-flash"),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/demo/locations/us-central1/publishers/google/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = developer_client("http://127.0.0.1:9".to_string(), None);

        let error = client
            .generate(ModelRequest::new("gemini-2.5-flash", vec![]))
            .await
            .expect_err("no credential");

        assert!(matches!(error, ModelError::MissingCredentials { env_var, .. } if env_var == "GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn sends_instruction_and_tools_and_parses_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "systemInstruction": {"parts": [{"text": "be brief"}]},
                "tools": [{"functionDeclarations": [{
                    "name": "IdeaAgent",
                    "description": "ideas",
                    "parameters": {"type": "OBJECT"}
                }]}],
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "hi there"}]},
                        "finishReason": "STOP"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = developer_client(server.url(), Some("test-key"));
        let request = ModelRequest::new("gemini-2.5-flash", vec![Content::user_text("hello")])
            .with_system_instruction("be brief")
            .with_tools(vec![FunctionDeclaration {
                name: "IdeaAgent".to_string(),
                description: "ideas".to_string(),
                parameters: json!({"type": "OBJECT"}),
            }]);

        let response = client.generate(request).await.expect("generation succeeds");

        mock.assert_async().await;
        let content = response.content.expect("content present");
        assert_eq!(content.role, Some(Role::Model));
        assert_eq!(content.joined_text(), "hi there");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    }

    #[tokio::test]
    async fn empty_candidate_list_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let client = developer_client(server.url(), Some("test-key"));
        let error = client
            .generate(ModelRequest::new("gemini-2.5-flash", vec![Content::user_text("hi")]))
            .await
            .expect_err("no candidates");

        assert!(matches!(error, ModelError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body("<html>upstream proxy</html>")
            .create_async()
            .await;

        let client = developer_client(server.url(), Some("test-key"));
        let error = client
            .generate(ModelRequest::new("gemini-2.5-flash", vec![Content::user_text("hi")]))
            .await
            .expect_err("not json");

        assert!(matches!(error, ModelError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn error_status_carries_backend_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(503)
            .with_body(r#"{"error": {"message": "model overloaded"}}"#)
            .create_async()
            .await;

        let client = developer_client(server.url(), Some("test-key"));
        let error = client
            .generate(ModelRequest::new("gemini-2.5-flash", vec![Content::user_text("hi")]))
            .await
            .expect_err("backend unavailable");

        assert!(matches!(error, ModelError::Status { status: 503, .. }));
        assert!(error.to_string().contains("model overloaded"));
    }

    #[tokio::test]
    async fn failures_never_reveal_the_api_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "SECRET-KEY-123")
            .with_status(400)
            .with_body("bad request")
            .create_async()
            .await;

        let client = developer_client(server.url(), Some("SECRET-KEY-123"));
        let error = client
            .generate(ModelRequest::new("gemini-2.5-flash", vec![Content::user_text("hi")]))
            .await
            .expect_err("rejected");

        assert!(matches!(error, ModelError::Status { status: 400, .. }));
        assert!(!error.to_string().contains("SECRET-KEY-123"));
    }

    #[tokio::test]
    async fn connection_failure_hides_request_url() {
        let client = developer_client("http://127.0.0.1:9".to_string(), Some("SECRET-KEY-123"));

        let error = client
            .generate(ModelRequest::new("gemini-2.5-flash", vec![Content::user_text("hi")]))
            .await
            .expect_err("nothing listening");

        assert!(matches!(error, ModelError::Network { .. }));
        assert!(!error.to_string().contains("127.0.0.1"));
    }
}
