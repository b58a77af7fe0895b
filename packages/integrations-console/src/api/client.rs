//! Platform HTTP client implementation

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use integrations_core::{
    AgentsApi, AgentsListing, DeleteOutcome, ExecuteGraphRequest, ExecutionRecord,
};

use super::types::*;

/// Non-success responses from the platform API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authorized ({0}); check AUTOGPT_API_KEY")]
    Unauthorized(StatusCode),

    #[error("Request failed: {0} {1}")]
    Status(StatusCode, String),
}

/// Whether `err` is the platform rejecting the API key
pub fn is_unauthorized(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized(_)))
}

/// HTTP client for the platform API
#[derive(Debug, Clone)]
pub struct PlatformClient {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl PlatformClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            api_key: None,
        }
    }

    /// Authenticate requests with an API key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match self.api_key {
            Some(ref key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ApiError::Unauthorized(status).into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status, body).into());
        }
        Ok(response)
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Make a POST request
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Make a DELETE request
    async fn delete<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let request = self.authorize(self.client.delete(self.url(path)).query(query));
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    // ========================================================================
    // Integrations API
    // ========================================================================

    /// List credential metadata across all providers
    pub async fn list_credentials(&self) -> Result<Vec<CredentialsMeta>> {
        self.get("/api/integrations/credentials").await
    }

    /// Delete a credential; `force` skips the in-use check
    pub async fn delete_credentials(
        &self,
        provider: &str,
        id: &str,
        force: bool,
    ) -> Result<DeleteOutcome> {
        let path = format!("/api/integrations/{}/credentials/{}", provider, id);
        let query: &[(&str, &str)] = if force { &[("force", "true")] } else { &[] };
        self.delete(&path, query).await
    }

    // ========================================================================
    // Store API
    // ========================================================================

    /// List the caller's agents, keeping the status code of non-success responses
    pub async fn my_agents(&self) -> Result<(u16, MyAgentsResponse)> {
        let request = self.authorize(self.client.get(self.url("/api/store/myagents")));
        let response = request.send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            tracing::debug!(status, "My agents request failed");
            return Ok((status, MyAgentsResponse::default()));
        }
        Ok((status, response.json().await?))
    }

    // ========================================================================
    // Graphs API
    // ========================================================================

    /// Start a graph execution
    pub async fn execute_graph(
        &self,
        graph_id: &str,
        graph_version: u32,
        request: &ExecuteGraphRequest,
    ) -> Result<ExecutionRecord> {
        self.post(
            &format!("/api/graphs/{}/execute/{}", graph_id, graph_version),
            request,
        )
        .await
    }
}

#[async_trait]
impl AgentsApi for PlatformClient {
    async fn list_my_agents(&self) -> integrations_core::Result<AgentsListing> {
        let (status, response) = self
            .my_agents()
            .await
            .map_err(|e| integrations_core::Error::AgentListing(e.to_string()))?;
        Ok(AgentsListing {
            status,
            agents: response.agents,
        })
    }

    async fn execute_graph(
        &self,
        graph_id: &str,
        graph_version: u32,
        request: &ExecuteGraphRequest,
    ) -> integrations_core::Result<ExecutionRecord> {
        PlatformClient::execute_graph(self, graph_id, graph_version, request)
            .await
            .map_err(|e| integrations_core::Error::Execution(e.to_string()))
    }
}
