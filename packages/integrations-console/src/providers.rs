//! Credential providers backed by the platform API

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use integrations_core::{Credential, CredentialsProvider, DeleteOutcome, ProviderMap};

use crate::api::types::CredentialsMeta;
use crate::api::PlatformClient;

/// Display names for provider keys whose title-cased form reads wrong
const PROVIDER_NAMES: &[(&str, &str)] = &[
    ("github", "GitHub"),
    ("openai", "OpenAI"),
    ("aiml_api", "AI/ML API"),
    ("d_id", "D-ID"),
    ("e2b", "E2B"),
    ("hubspot", "HubSpot"),
    ("llama_api", "Llama API"),
    ("open_router", "Open Router"),
    ("smartlead", "SmartLead"),
    ("zerobounce", "ZeroBounce"),
];

/// Human-readable name for a provider key
pub fn provider_display_name(provider: &str) -> String {
    if let Some((_, name)) = PROVIDER_NAMES.iter().find(|(key, _)| *key == provider) {
        return name.to_string();
    }
    provider
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One provider's saved credentials, deleting through the platform API
pub struct HttpCredentialsProvider {
    client: PlatformClient,
    provider: String,
    provider_name: String,
    credentials: Vec<Credential>,
}

impl HttpCredentialsProvider {
    pub fn new(client: PlatformClient, provider: &str, credentials: Vec<Credential>) -> Self {
        Self {
            client,
            provider: provider.to_string(),
            provider_name: provider_display_name(provider),
            credentials,
        }
    }
}

#[async_trait]
impl CredentialsProvider for HttpCredentialsProvider {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn provider_name(&self) -> &str {
        &self.provider_name
    }

    fn saved_credentials(&self) -> Vec<Credential> {
        self.credentials.clone()
    }

    async fn delete_credentials(
        &self,
        id: &str,
        force: bool,
    ) -> integrations_core::Result<DeleteOutcome> {
        self.client
            .delete_credentials(&self.provider, id, force)
            .await
            .map_err(|e| integrations_core::Error::Provider(e.to_string()))
    }
}

/// Group a credential listing into a provider map, keeping first-seen provider order
pub fn group_providers(client: &PlatformClient, listing: Vec<CredentialsMeta>) -> ProviderMap {
    let mut grouped: Vec<(String, Vec<Credential>)> = Vec::new();
    for meta in listing {
        let credential = Credential::from(meta);
        match grouped.iter_mut().find(|(key, _)| *key == credential.provider) {
            Some((_, credentials)) => credentials.push(credential),
            None => grouped.push((credential.provider.clone(), vec![credential])),
        }
    }

    let mut providers = ProviderMap::new();
    for (key, credentials) in grouped {
        providers.insert(Arc::new(HttpCredentialsProvider::new(
            client.clone(),
            &key,
            credentials,
        )));
    }
    providers
}

/// Fetch all credentials and build the provider map
pub async fn load_providers(client: &PlatformClient) -> Result<ProviderMap> {
    let listing = client.list_credentials().await?;
    tracing::debug!(count = listing.len(), "Loaded credential metadata");
    Ok(group_providers(client, listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use integrations_core::CredentialType;

    fn meta(id: &str, provider: &str) -> CredentialsMeta {
        CredentialsMeta {
            id: id.to_string(),
            provider: provider.to_string(),
            credential_type: CredentialType::ApiKey,
            title: Some(id.to_uppercase()),
            username: None,
            host: None,
        }
    }

    #[test]
    fn test_provider_display_name() {
        assert_eq!(provider_display_name("github"), "GitHub");
        assert_eq!(provider_display_name("google_maps"), "Google Maps");
        assert_eq!(provider_display_name("notion"), "Notion");
    }

    #[test]
    fn test_group_providers_keeps_first_seen_order() {
        let client = PlatformClient::new("http://localhost:8006");
        let providers = group_providers(
            &client,
            vec![
                meta("a", "openai"),
                meta("b", "github"),
                meta("c", "openai"),
            ],
        );

        let keys: Vec<&str> = providers.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["openai", "github"]);

        let openai = providers.get("openai").unwrap();
        assert_eq!(openai.provider_name(), "OpenAI");
        let ids: Vec<String> = openai
            .saved_credentials()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
