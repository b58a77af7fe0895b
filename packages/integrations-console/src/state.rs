//! Centralized application state management
//!
//! This module provides the single source of truth for the console: the
//! session, the provider map, the deletion workflow and the agent picker.

use integrations_core::{
    AgentRunner, AgentSummary, CredentialRow, CredentialsAggregator, DeletionWorkflow,
    HiddenCredentialsConfig, HiddenIds, HiddenIdsCache, ProviderMap, SessionState,
    AGENT_LISTING_ERROR,
};

// ============================================================================
// Application State
// ============================================================================

/// Centralized application state
#[derive(Debug, Default)]
pub struct AppState {
    // Session state
    pub session: SessionState,

    // Providers
    pub providers: ProviderMap,
    hidden_config: HiddenCredentialsConfig,
    hidden_cache: HiddenIdsCache,

    // Credential deletion (dialog + toasts)
    pub deletion: DeletionWorkflow,

    // Agents page
    pub runner: AgentRunner,
    pub agents_loading: bool,
    pub agents_error: Option<String>,
}

// ============================================================================
// State Actions
// ============================================================================

impl AppState {
    pub fn new(hidden_config: HiddenCredentialsConfig) -> Self {
        Self {
            hidden_config,
            ..Default::default()
        }
    }

    /// Resolve the session from the configured API key
    pub fn sign_in_with(&mut self, api_key: Option<&str>) {
        self.session = SessionState::from_api_key(api_key);
    }

    /// The platform rejected the API key
    pub fn sign_out(&mut self) {
        tracing::info!("API key rejected, signing out");
        self.session = SessionState::SignedOut;
    }

    /// Set providers
    pub fn set_providers(&mut self, providers: ProviderMap) {
        self.providers = providers;
    }

    /// Resolved hidden IDs, recomputed only when the configuration changed
    pub fn hidden_ids(&mut self) -> &HiddenIds {
        self.hidden_cache.get(&self.hidden_config)
    }

    /// Rows of the credentials table
    pub fn credential_rows(&mut self) -> Vec<CredentialRow> {
        let aggregator = CredentialsAggregator::new(self.hidden_ids().clone());
        aggregator.aggregate(&self.providers)
    }

    /// Set agents list
    pub fn set_agents(&mut self, agents: Vec<AgentSummary>) {
        self.runner.set_agents(agents);
        self.agents_loading = false;
        self.agents_error = None;
    }

    /// Record an agent listing failure
    pub fn set_agents_failed(&mut self) {
        self.agents_loading = false;
        self.agents_error = Some(AGENT_LISTING_ERROR.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use integrations_core::{HiddenCredentialKey, HiddenIdsSource, PageGate};

    #[test]
    fn test_session_transitions() {
        let mut state = AppState::new(HiddenCredentialsConfig::new());
        assert_eq!(state.session.gate(), PageGate::ShowLoading);

        state.sign_in_with(None);
        assert_eq!(state.session.gate(), PageGate::Redirect("/login"));

        state.sign_in_with(Some("agpt_key"));
        assert!(matches!(state.session.gate(), PageGate::Render(_)));

        state.sign_out();
        assert_eq!(state.session.gate(), PageGate::Redirect("/login"));
    }

    #[test]
    fn test_hidden_ids_from_config() {
        let mut state = AppState::new(HiddenCredentialsConfig::new());
        assert_eq!(state.hidden_ids().source(), HiddenIdsSource::Fallback);

        let mut state =
            AppState::new(HiddenCredentialsConfig::new().with(HiddenCredentialKey::Openai, "sys"));
        assert_eq!(state.hidden_ids().source(), HiddenIdsSource::Configured);
        assert_eq!(state.hidden_ids().ids(), ["sys".to_string()]);
    }

    #[test]
    fn test_agents_failure_message() {
        let mut state = AppState::new(HiddenCredentialsConfig::new());
        state.agents_loading = true;
        state.set_agents_failed();
        assert!(!state.agents_loading);
        assert_eq!(
            state.agents_error.as_deref(),
            Some("Error loading agents. Make sure you are logged in.")
        );
    }

    #[test]
    fn test_empty_providers_have_no_rows() {
        let mut state = AppState::new(HiddenCredentialsConfig::new());
        state.set_providers(ProviderMap::new());
        assert!(state.credential_rows().is_empty());
    }
}
