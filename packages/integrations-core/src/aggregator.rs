//! Flattening of the provider map into the rows of the credentials table.

use serde::Serialize;

use crate::hidden::HiddenIds;
use crate::provider::ProviderMap;
use crate::types::{Credential, CredentialType};

/// Identifiers ending with this suffix are defaults registered by integrations themselves.
pub const DEFAULT_CREDENTIAL_SUFFIX: &str = "-default";

/// Icon shown next to the provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderIcon {
    Github,
    Google,
    Notion,
    Discord,
    Linear,
    Twitter,
    Reddit,
    Hubspot,
    Todoist,
    OpenAi,
    Anthropic,
    /// Generic key, used for unmapped providers
    Key,
}

impl ProviderIcon {
    pub fn for_provider(provider: &str) -> Self {
        match provider {
            "github" => ProviderIcon::Github,
            "google" | "google_maps" => ProviderIcon::Google,
            "notion" => ProviderIcon::Notion,
            "discord" => ProviderIcon::Discord,
            "linear" => ProviderIcon::Linear,
            "twitter" => ProviderIcon::Twitter,
            "reddit" => ProviderIcon::Reddit,
            "hubspot" => ProviderIcon::Hubspot,
            "todoist" => ProviderIcon::Todoist,
            "openai" => ProviderIcon::OpenAi,
            "anthropic" => ProviderIcon::Anthropic,
            _ => ProviderIcon::Key,
        }
    }
}

/// Icon shown next to the credential name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeIcon {
    User,
    Key,
}

impl TypeIcon {
    pub fn for_type(credential_type: CredentialType) -> Self {
        match credential_type {
            CredentialType::OAuth2 => TypeIcon::User,
            CredentialType::ApiKey | CredentialType::UserPassword | CredentialType::HostScoped => {
                TypeIcon::Key
            }
        }
    }
}

/// One row of the credentials table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialRow {
    pub credential: Credential,
    pub provider: String,
    pub provider_name: String,
    pub provider_icon: ProviderIcon,
    pub type_icon: TypeIcon,
}

impl CredentialRow {
    pub fn id(&self) -> &str {
        &self.credential.id
    }

    pub fn display_name(&self) -> &str {
        self.credential.display_name()
    }

    pub fn type_label(&self) -> &'static str {
        self.credential.credential_type.label()
    }
}

/// Column headers of the credentials table.
pub fn table_columns() -> [&'static str; 3] {
    ["Provider", "Name", "Actions"]
}

/// Builds displayable credential rows, hiding system credentials.
#[derive(Debug, Clone)]
pub struct CredentialsAggregator {
    hidden: HiddenIds,
}

impl CredentialsAggregator {
    pub fn new(hidden: HiddenIds) -> Self {
        Self { hidden }
    }

    pub fn hidden(&self) -> &HiddenIds {
        &self.hidden
    }

    /// Whether a credential identifier is excluded from display.
    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id) || id.ends_with(DEFAULT_CREDENTIAL_SUFFIX)
    }

    /// Flatten loaded providers in map order, keeping each provider's own ordering.
    pub fn aggregate(&self, providers: &ProviderMap) -> Vec<CredentialRow> {
        providers
            .iter()
            .filter_map(|(_, provider)| provider)
            .flat_map(|provider| {
                let key = provider.provider().to_string();
                let name = provider.provider_name().to_string();
                provider
                    .saved_credentials()
                    .into_iter()
                    .filter(move |cred| !self.is_hidden(&cred.id))
                    .map(move |cred| CredentialRow {
                        type_icon: TypeIcon::for_type(cred.credential_type),
                        provider_icon: ProviderIcon::for_provider(&key),
                        provider: key.clone(),
                        provider_name: name.clone(),
                        credential: cred,
                    })
            })
            .collect()
    }
}
