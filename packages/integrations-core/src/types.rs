//! Core data types shared by the aggregator, the deletion workflow and the agent trigger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of stored authorization artifact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    #[serde(rename = "oauth2")]
    OAuth2,
    ApiKey,
    UserPassword,
    HostScoped,
}

impl CredentialType {
    /// Human-readable label shown under the credential name.
    pub fn label(&self) -> &'static str {
        match self {
            CredentialType::OAuth2 => "OAuth2 credentials",
            CredentialType::ApiKey => "API key",
            CredentialType::UserPassword => "Username & password",
            CredentialType::HostScoped => "Host-scoped credentials",
        }
    }
}

/// A saved credential belonging to one provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    /// Identifier, unique within its provider
    pub id: String,
    /// Optional display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Username for password-style credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Credential kind
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    /// Owning provider key
    pub provider: String,
}

impl Credential {
    /// Create a credential with no title or username.
    pub fn new(id: &str, provider: &str, credential_type: CredentialType) -> Self {
        Self {
            id: id.to_string(),
            title: None,
            username: None,
            credential_type,
            provider: provider.to_string(),
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    /// Title if present and non-empty, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.username.as_deref())
            .unwrap_or("")
    }
}

/// Raw result of a provider deletion call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_confirmation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Interpretation of a [`DeleteOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteResult {
    /// The credential is gone; `revoked` tells whether the provider side was revoked too.
    Deleted { revoked: bool },
    /// The server wants an explicit, forced retry.
    NeedsConfirmation { message: String },
    /// Neither deleted nor asking for confirmation.
    Unrecognized,
}

impl DeleteOutcome {
    /// Outcome for a deletion that also revoked the credential at the provider.
    pub fn revoked() -> Self {
        Self {
            deleted: true,
            revoked: Some(true),
            ..Default::default()
        }
    }

    /// Outcome for a deletion that only removed the local record.
    pub fn deleted_locally() -> Self {
        Self {
            deleted: true,
            revoked: Some(false),
            ..Default::default()
        }
    }

    /// Outcome asking the caller to confirm with a forced retry.
    pub fn needs_confirmation(message: impl Into<String>) -> Self {
        Self {
            deleted: false,
            revoked: None,
            need_confirmation: Some(true),
            message: Some(message.into()),
        }
    }

    pub fn classify(&self) -> DeleteResult {
        if self.deleted {
            return DeleteResult::Deleted {
                revoked: self.revoked.unwrap_or(false),
            };
        }
        if self.need_confirmation.unwrap_or(false) {
            return DeleteResult::NeedsConfirmation {
                message: self.message.clone().unwrap_or_default(),
            };
        }
        DeleteResult::Unrecognized
    }
}

/// Agent as presented in the picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSummary {
    pub id: String,
    pub version: u32,
    pub name: String,
    /// Empty when the agent has no description
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub last_edited: DateTime<Utc>,
}

/// Execution record returned when a graph run is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// API response wrapper used for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
