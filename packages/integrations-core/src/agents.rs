//! Agent execution trigger: pick one of your agents and start it with a prompt.
//!
//! Execution progress is not tracked here; callers link to the monitoring
//! view with the returned execution identifier.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{AgentSummary, ExecutionRecord};
use crate::{Error, Result};

/// Shown when the agent list could not be loaded.
pub const AGENT_LISTING_ERROR: &str = "Error loading agents. Make sure you are logged in.";

/// Agent record as returned by the "my agents" endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MyAgent {
    pub agent_id: String,
    pub agent_version: u32,
    pub agent_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub agent_image: Option<String>,
    pub last_edited: DateTime<Utc>,
}

impl From<MyAgent> for AgentSummary {
    fn from(agent: MyAgent) -> Self {
        Self {
            id: agent.agent_id,
            version: agent.agent_version,
            name: agent.agent_name,
            description: agent.description.unwrap_or_default(),
            image: agent.agent_image,
            last_edited: agent.last_edited,
        }
    }
}

/// Raw listing response: HTTP status plus whatever agents came back.
#[derive(Debug, Clone, Default)]
pub struct AgentsListing {
    pub status: u16,
    pub agents: Vec<MyAgent>,
}

impl AgentsListing {
    /// The API key was missing, expired or revoked.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Agents to show, most recently edited first; empty unless the status is 200.
    pub fn into_agents(self) -> Vec<AgentSummary> {
        if self.status != 200 {
            tracing::warn!(status = self.status, "Agent listing returned non-success status");
            return Vec::new();
        }

        let mut agents: Vec<AgentSummary> = self.agents.into_iter().map(Into::into).collect();
        agents.sort_by(|a, b| b.last_edited.cmp(&a.last_edited));
        tracing::debug!(count = agents.len(), "Loaded agents");
        agents
    }
}

/// Body of an execution request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecuteGraphRequest {
    pub inputs: Map<String, Value>,
    pub credentials_inputs: Map<String, Value>,
}

impl ExecuteGraphRequest {
    /// A request with a single `prompt` input and no credential inputs.
    pub fn prompt(prompt: &str) -> Self {
        let mut inputs = Map::new();
        inputs.insert("prompt".to_string(), Value::String(prompt.to_string()));
        Self {
            inputs,
            credentials_inputs: Map::new(),
        }
    }
}

/// Platform endpoints used by the trigger.
#[async_trait]
pub trait AgentsApi: Send + Sync {
    async fn list_my_agents(&self) -> Result<AgentsListing>;

    async fn execute_graph(
        &self,
        graph_id: &str,
        graph_version: u32,
        request: &ExecuteGraphRequest,
    ) -> Result<ExecutionRecord>;
}

/// Fetch the caller's agents, most recently edited first.
///
/// A non-200 status yields an empty list.
pub async fn list_my_agents(api: &dyn AgentsApi) -> Result<Vec<AgentSummary>> {
    Ok(api.list_my_agents().await?.into_agents())
}

/// Path of the agent detail / execution history view.
pub fn agent_detail_link(agent_id: &str) -> String {
    format!("/platform/library/agents/{}", agent_id)
}

/// Path of the monitoring view filtered to one execution.
pub fn monitoring_link(execution_id: &str) -> String {
    format!("/monitoring?executionId={}", execution_id)
}

/// Absolute link to an execution inside the agent view.
pub fn execution_view_link(frontend_url: &str, graph_id: &str, execution_id: &str) -> String {
    format!(
        "{}{}?flowExecutionID={}",
        frontend_url.trim_end_matches('/'),
        agent_detail_link(graph_id),
        execution_id
    )
}

/// Why a run was not submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotReady {
    NoAgentSelected,
    UnknownVersion,
    BlankPrompt,
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Preconditions not met; no request was sent
    NotReady(NotReady),
    Started { execution_id: String },
}

/// State of the agent picker and prompt box.
#[derive(Debug, Clone, Default)]
pub struct AgentRunner {
    agents: Vec<AgentSummary>,
    selected_id: Option<String>,
    selected_version: Option<u32>,
    prompt: String,
    pending: bool,
    last_execution_id: Option<String>,
    last_error: Option<String>,
}

impl AgentRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the agent list, re-resolving the selected version.
    pub fn set_agents(&mut self, agents: Vec<AgentSummary>) {
        self.agents = agents;
        if let Some(id) = self.selected_id.clone() {
            self.select(Some(id.as_str()));
        }
    }

    pub fn agents(&self) -> &[AgentSummary] {
        &self.agents
    }

    /// Select an agent by id; `None` or an unknown id leaves no version resolved.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected_id = id.filter(|id| !id.is_empty()).map(str::to_string);
        self.selected_version = self
            .selected_id
            .as_deref()
            .and_then(|id| self.agents.iter().find(|a| a.id == id))
            .map(|a| a.version);
    }

    pub fn selected_agent(&self) -> Option<&AgentSummary> {
        let id = self.selected_id.as_deref()?;
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_version(&self) -> Option<u32> {
        self.selected_version
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_execution_id(&self) -> Option<&str> {
        self.last_execution_id.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn readiness(&self) -> std::result::Result<(String, u32), NotReady> {
        let id = self.selected_id.clone().ok_or(NotReady::NoAgentSelected)?;
        let version = self.selected_version.ok_or(NotReady::UnknownVersion)?;
        if self.prompt.trim().is_empty() {
            return Err(NotReady::BlankPrompt);
        }
        if self.pending {
            return Err(NotReady::AlreadyRunning);
        }
        Ok((id, version))
    }

    pub fn can_run(&self) -> bool {
        self.readiness().is_ok()
    }

    /// Submit the prompt to the selected agent.
    ///
    /// The prompt is sent as typed; trimming only decides whether it is blank.
    pub async fn run(&mut self, api: &dyn AgentsApi) -> Result<RunOutcome> {
        let (graph_id, graph_version) = match self.readiness() {
            Ok(target) => target,
            Err(reason) => return Ok(RunOutcome::NotReady(reason)),
        };

        tracing::info!(graph_id = %graph_id, graph_version, "Submitting agent execution");
        self.pending = true;
        self.last_error = None;
        let request = ExecuteGraphRequest::prompt(&self.prompt);
        let result = api.execute_graph(&graph_id, graph_version, &request).await;
        self.pending = false;

        match result {
            Ok(record) => {
                tracing::info!(execution_id = %record.id, "Execution started");
                self.last_execution_id = Some(record.id.clone());
                Ok(RunOutcome::Started {
                    execution_id: record.id,
                })
            }
            Err(e) => {
                tracing::warn!("Execution request failed: {}", e);
                let message = e.to_string();
                self.last_error = Some(message.clone());
                Err(match e {
                    Error::Execution(_) => e,
                    _ => Error::Execution(message),
                })
            }
        }
    }
}
