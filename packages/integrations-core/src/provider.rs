//! Provider context: the per-integration credential stores the UI reads from.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::types::{Credential, DeleteOutcome};
use crate::Result;

/// An integration that stores credentials and can delete (and revoke) them.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Provider key, e.g. `github`
    fn provider(&self) -> &str;

    /// Human-readable provider name
    fn provider_name(&self) -> &str;

    /// Credentials saved for the current user, in provider order
    fn saved_credentials(&self) -> Vec<Credential>;

    /// Delete a credential. `force` overrides the server-side safety check.
    async fn delete_credentials(&self, id: &str, force: bool) -> Result<DeleteOutcome>;
}

/// Insertion-ordered map from provider key to provider.
///
/// A `None` entry is a provider that has not finished loading yet.
#[derive(Clone, Default)]
pub struct ProviderMap {
    entries: Vec<(String, Option<Arc<dyn CredentialsProvider>>)>,
}

impl ProviderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a loaded provider, keyed by its own provider key.
    pub fn insert(&mut self, provider: Arc<dyn CredentialsProvider>) {
        let key = provider.provider().to_string();
        self.set(key, Some(provider));
    }

    /// Register a provider key whose entry is still loading.
    pub fn insert_loading(&mut self, key: &str) {
        self.set(key.to_string(), None);
    }

    fn set(&mut self, key: String, value: Option<Arc<dyn CredentialsProvider>>) {
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Get a loaded provider. Loading and unknown keys both yield `None`.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn CredentialsProvider>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, p)| p.as_ref())
    }

    /// Iterate entries in insertion order, including loading ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Arc<dyn CredentialsProvider>>)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ProviderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, p)| (k, p.is_some())))
            .finish()
    }
}

/// In-memory provider used by tests across the crate.
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub struct FakeProvider {
        key: String,
        name: String,
        credentials: Vec<Credential>,
        responses: Mutex<VecDeque<Result<DeleteOutcome>>>,
        pub calls: Mutex<Vec<(String, bool)>>,
    }

    impl FakeProvider {
        pub fn new(key: &str, name: &str, credentials: Vec<Credential>) -> Self {
            Self {
                key: key.to_string(),
                name: name.to_string(),
                credentials,
                responses: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue the result of the next deletion call.
        pub fn respond(self, response: Result<DeleteOutcome>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        pub fn calls(&self) -> Vec<(String, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CredentialsProvider for FakeProvider {
        fn provider(&self) -> &str {
            &self.key
        }

        fn provider_name(&self) -> &str {
            &self.name
        }

        fn saved_credentials(&self) -> Vec<Credential> {
            self.credentials.clone()
        }

        async fn delete_credentials(&self, id: &str, force: bool) -> Result<DeleteOutcome> {
            self.calls.lock().unwrap().push((id.to_string(), force));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(DeleteOutcome::revoked()))
        }
    }
}
