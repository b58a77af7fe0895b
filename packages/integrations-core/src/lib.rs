//! Integrations Core - credential management and agent execution logic.
//!
//! This crate holds everything the integrations console needs that does not
//! depend on a particular front end:
//!
//! - **Credentials aggregation**: flatten a provider map into displayable rows
//! - **Hidden credentials**: resolve which system credential IDs are suppressed
//! - **Deletion workflow**: two-step deletion with an optional forced retry
//! - **Agent trigger**: list the caller's agents and start an execution
//!
//! # Example
//!
//! ```rust,no_run
//! use integrations_core::{
//!     resolve_hidden_ids, CredentialsAggregator, HiddenCredentialsConfig, ProviderMap,
//! };
//!
//! let hidden = resolve_hidden_ids(&HiddenCredentialsConfig::from_env());
//! let aggregator = CredentialsAggregator::new(hidden);
//!
//! let providers = ProviderMap::new();
//! for row in aggregator.aggregate(&providers) {
//!     println!("{} - {}", row.provider_name, row.display_name());
//! }
//! ```

pub mod agents;
pub mod aggregator;
pub mod config;
pub mod deletion;
pub mod dialog;
pub mod hidden;
pub mod notify;
pub mod provider;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use types::{
    AgentSummary, ApiResponse, Credential, CredentialType, DeleteOutcome, DeleteResult,
    ExecutionRecord,
};

// Re-export main functionality
pub use agents::{
    agent_detail_link, execution_view_link, list_my_agents, monitoring_link, AgentRunner,
    AgentsApi, AgentsListing, ExecuteGraphRequest, MyAgent, NotReady, RunOutcome,
    AGENT_LISTING_ERROR,
};
pub use aggregator::{
    table_columns, CredentialRow, CredentialsAggregator, ProviderIcon, TypeIcon,
    DEFAULT_CREDENTIAL_SUFFIX,
};
pub use config::ConsoleConfig;
pub use deletion::{DeletionStatus, DeletionWorkflow};
pub use dialog::{ConfirmAction, ConfirmationDialog, RejectAction};
pub use hidden::{
    resolve_hidden_ids, HiddenCredentialKey, HiddenCredentialsConfig, HiddenIds, HiddenIdsCache,
    HiddenIdsSource, IntegrationCategory, FALLBACK_HIDDEN_CREDENTIAL_IDS,
};
pub use notify::{Toast, ToastVariant, Toaster};
pub use provider::{CredentialsProvider, ProviderMap};
pub use session::{PageGate, SessionState, User, API_KEY_USER_ID, LOGIN_ROUTE};

/// Error types for integrations-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Agent listing failed: {0}")]
    AgentListing(String),

    #[error("Execution request failed: {0}")]
    Execution(String),
}

/// Result type for integrations-core operations.
pub type Result<T> = std::result::Result<T, Error>;
