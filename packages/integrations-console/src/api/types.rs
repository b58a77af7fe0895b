//! Wire types for the platform API

use integrations_core::{Credential, CredentialType, MyAgent};
use serde::{Deserialize, Serialize};

// ============================================================================
// Integrations Types
// ============================================================================

/// Credential metadata as listed by `/api/integrations/credentials`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsMeta {
    pub id: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl From<CredentialsMeta> for Credential {
    fn from(meta: CredentialsMeta) -> Self {
        Credential {
            id: meta.id,
            // Host-scoped credentials have no title; show the host instead
            title: meta.title.or(meta.host),
            username: meta.username,
            credential_type: meta.credential_type,
            provider: meta.provider,
        }
    }
}

// ============================================================================
// Store Types
// ============================================================================

/// Response of `/api/store/myagents`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MyAgentsResponse {
    #[serde(default)]
    pub agents: Vec<MyAgent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_scoped_meta_uses_host_as_title() {
        let meta: CredentialsMeta = serde_json::from_str(
            r#"{"id": "h1", "provider": "http", "type": "host_scoped", "host": "api.example.com"}"#,
        )
        .unwrap();
        let credential = Credential::from(meta);
        assert_eq!(credential.display_name(), "api.example.com");
        assert_eq!(credential.credential_type, CredentialType::HostScoped);
    }

    #[test]
    fn test_my_agents_response_tolerates_extra_fields() {
        let response: MyAgentsResponse = serde_json::from_str(
            r#"{
                "agents": [{
                    "agent_id": "g1",
                    "agent_version": 1,
                    "agent_name": "Writer",
                    "last_edited": "2025-01-01T00:00:00Z"
                }],
                "pagination": {"current_page": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(response.agents.len(), 1);
        assert_eq!(response.agents[0].agent_name, "Writer");
    }
}
