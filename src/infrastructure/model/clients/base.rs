//! Base HTTP client with shared logic

use crate::infrastructure::model::types::ModelError;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            http: Client::new(),
        }
    }

    /// Post JSON with bearer auth (for Vertex AI)
    pub async fn post_with_bearer<Req, Res>(
        &self,
        url: &str,
        token: &str,
        body: &Req,
    ) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e.without_url()))?;
        self.decode(response).await
    }

    /// Post JSON with the `x-goog-api-key` header (for the Gemini developer API)
    pub async fn post_with_api_key<Req, Res>(
        &self,
        url: &str,
        key: &str,
        body: &Req,
    ) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, key)
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e.without_url()))?;
        self.decode(response).await
    }

    /// Non-2xx answers carry the backend's body; a 2xx body that does not parse is an invalid response
    async fn decode<Res: DeserializeOwned>(&self, response: Response) -> Result<Res, ModelError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::network(&self.id, e.without_url()))?;
        if !status.is_success() {
            return Err(ModelError::status(&self.id, status.as_u16(), body));
        }
        serde_json::from_str(&body)
            .map_err(|e| ModelError::invalid_response(&self.id, e.to_string()))
    }
}
