//! Console application root
//!
//! Owns the client, the state and the message catalogue, and drives each
//! command through the same state transitions the views render.

use anyhow::{anyhow, Result};

use integrations_core::{
    execution_view_link, AgentRunner, AgentsApi, ConsoleConfig, DeletionStatus, PageGate,
    RunOutcome,
};

use crate::api::{is_unauthorized, PlatformClient};
use crate::i18n::I18n;
use crate::prompt::{Prompter, StdinPrompter};
use crate::providers::load_providers;
use crate::state::AppState;
use crate::views;

/// How the user answers the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    /// Ask through the prompter
    Ask,
    /// Continue without asking
    AssumeYes,
}

pub struct App {
    config: ConsoleConfig,
    client: PlatformClient,
    state: AppState,
    i18n: I18n,
    prompter: Box<dyn Prompter>,
}

impl App {
    pub fn new(config: ConsoleConfig) -> Self {
        let client = PlatformClient::new(&config.base_url).with_api_key(config.api_key.clone());
        let state = AppState::new(config.hidden_credentials.clone());
        let i18n = I18n::new();
        tracing::debug!(
            language = i18n.language(),
            base_url = client.base_url(),
            has_api_key = client.has_api_key(),
            "Console initialized"
        );
        Self {
            config,
            client,
            state,
            i18n,
            prompter: Box::new(StdinPrompter),
        }
    }

    /// Gate on the API key; prints the login hint and returns false when signed out
    fn ensure_session(&mut self) -> bool {
        self.state.sign_in_with(self.config.api_key.as_deref());
        self.gate_passes()
    }

    fn gate_passes(&self) -> bool {
        match self.state.session.gate() {
            PageGate::Render(user) => {
                tracing::debug!(user = %user.id, "Session ready");
                true
            }
            PageGate::Redirect(route) => {
                let url = format!("{}{}", self.config.frontend_url.trim_end_matches('/'), route);
                println!("{}", self.i18n.format("session.redirect", &[("url", &url)]));
                false
            }
            PageGate::ShowLoading => false,
        }
    }

    /// Reload the provider map; returns false when the API key was rejected
    async fn refresh_providers(&mut self) -> Result<bool> {
        match load_providers(&self.client).await {
            Ok(providers) => {
                self.state.set_providers(providers);
                Ok(true)
            }
            Err(e) if is_unauthorized(&e) => {
                self.state.sign_out();
                Ok(self.gate_passes())
            }
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Credentials
    // ========================================================================

    pub async fn list_credentials(&mut self) -> Result<()> {
        if !self.ensure_session() || !self.refresh_providers().await? {
            return Ok(());
        }

        let rows = self.state.credential_rows();
        print!("{}", views::integrations::render_credentials_table(&rows, &self.i18n));
        Ok(())
    }

    /// Delete a credential, asking for confirmation when the server requires it
    pub async fn delete_credential(
        &mut self,
        provider: &str,
        id: &str,
        force: bool,
        mode: ConfirmMode,
    ) -> Result<DeletionStatus> {
        if !self.ensure_session() || !self.refresh_providers().await? {
            return Ok(DeletionStatus::Skipped);
        }

        delete_with_confirmation(
            &mut self.state,
            provider,
            id,
            force,
            mode,
            self.prompter.as_mut(),
            &self.i18n,
        )
        .await
    }

    pub fn show_hidden(&mut self) {
        let hidden = self.state.hidden_ids().clone();
        let source = format!("{:?}", hidden.source()).to_lowercase();
        println!("{}", self.i18n.format("hidden.title", &[("source", &source)]));
        for id in hidden.ids() {
            println!("  {}", id);
        }
    }

    // ========================================================================
    // Agents
    // ========================================================================

    /// Load the agent list; returns false when signed out
    async fn load_agents(&mut self) -> Result<bool> {
        if !self.ensure_session() {
            return Ok(false);
        }

        self.state.agents_loading = true;
        match AgentsApi::list_my_agents(&self.client).await {
            Ok(listing) if listing.is_unauthorized() => {
                self.state.agents_loading = false;
                self.state.sign_out();
                return Ok(self.gate_passes());
            }
            Ok(listing) => self.state.set_agents(listing.into_agents()),
            Err(e) => {
                tracing::warn!("Failed to list agents: {}", e);
                self.state.set_agents_failed();
            }
        }
        Ok(true)
    }

    fn print_picker(&self) {
        print!(
            "{}",
            views::agents::render_agent_picker(
                &self.state.runner,
                self.state.agents_loading,
                self.state.agents_error.as_deref(),
                &self.i18n,
            )
        );
    }

    pub async fn list_agents(&mut self) -> Result<()> {
        if self.load_agents().await? {
            self.print_picker();
        }
        Ok(())
    }

    /// Pick an agent (by id or interactively) and submit a prompt to it
    pub async fn run_agent(&mut self, agent: Option<String>, prompt: Option<String>) -> Result<()> {
        if !self.load_agents().await? {
            return Ok(());
        }
        if self.state.agents_error.is_some() || self.state.runner.agents().is_empty() {
            self.print_picker();
            return Ok(());
        }

        match agent {
            Some(id) => self.state.runner.select(Some(&id)),
            None => {
                self.print_picker();
                let runner = &mut self.state.runner;
                if !pick_agent(runner, self.prompter.as_mut(), &self.i18n)? {
                    tracing::info!("No agent chosen before end of input");
                    return Ok(());
                }
            }
        }

        let prompt = match prompt {
            Some(prompt) => prompt,
            None => {
                let question = format!(
                    "{} ({}): ",
                    self.i18n.t("agents.prompt_label"),
                    self.i18n.t("agents.prompt_placeholder")
                );
                self.prompter.ask(&question)?.unwrap_or_default()
            }
        };
        self.state.runner.set_prompt(prompt);

        if self.state.runner.can_run() {
            println!("{}", self.i18n.t("agents.running"));
        }
        match self.state.runner.run(&self.client).await? {
            RunOutcome::NotReady(reason) => {
                println!("{}", views::agents::not_ready_message(reason, &self.i18n));
            }
            RunOutcome::Started { execution_id } => {
                let banner = views::agents::render_execution_banner(&self.state.runner, &self.i18n);
                if let Some(banner) = banner {
                    print!("{}", banner);
                }
                if let Some(graph_id) = self.state.runner.selected_id() {
                    let url =
                        execution_view_link(&self.config.frontend_url, graph_id, &execution_id);
                    println!("{}", self.i18n.format("agents.open", &[("url", &url)]));
                }
            }
        }
        Ok(())
    }
}

fn print_toasts(state: &mut AppState) {
    let toasts = state.deletion.toaster_mut().drain();
    if !toasts.is_empty() {
        print!("{}", views::render_toasts(&toasts));
    }
}

fn is_confirmation(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "c" | "continue" | "s" | "si" | "sí"
    )
}

/// Request a deletion and answer the confirmation dialog until it settles.
///
/// End of input while asking counts as "Cancel".
async fn delete_with_confirmation(
    state: &mut AppState,
    provider: &str,
    id: &str,
    force: bool,
    mode: ConfirmMode,
    prompter: &mut dyn Prompter,
    i18n: &I18n,
) -> Result<DeletionStatus> {
    let mut status = state
        .deletion
        .request_deletion(&state.providers, provider, id, force)
        .await;
    print_toasts(state);

    while status == DeletionStatus::AwaitingConfirmation {
        if let Some(dialog) = views::integrations::render_dialog(state.deletion.dialog()) {
            print!("{}", dialog);
        }
        let confirmed = match mode {
            ConfirmMode::AssumeYes => true,
            ConfirmMode::Ask => prompter
                .ask(&i18n.t("dialog.choice"))?
                .is_some_and(|answer| is_confirmation(&answer)),
        };

        if confirmed {
            status = state.deletion.confirm(&state.providers).await;
        } else {
            state.deletion.reject();
            status = DeletionStatus::Skipped;
        }
        print_toasts(state);
    }

    if status == DeletionStatus::Skipped && state.providers.get(provider).is_none() {
        return Err(anyhow!("No saved credentials for provider '{}'", provider));
    }
    Ok(status)
}

/// Ask for an agent number until a valid one is given; false at end of input
fn pick_agent(runner: &mut AgentRunner, prompter: &mut dyn Prompter, i18n: &I18n) -> Result<bool> {
    let count = runner.agents().len();
    while let Some(choice) = prompter.ask(&i18n.t("agents.choose"))? {
        match choice.trim().parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => {
                let id = runner.agents()[n - 1].id.clone();
                runner.select(Some(&id));
                return Ok(true);
            }
            _ => println!("{}", i18n.t("agents.invalid_choice")),
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::scripted::ScriptedPrompter;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use integrations_core::{
        AgentSummary, Credential, CredentialType, CredentialsProvider, DeleteOutcome,
        HiddenCredentialsConfig, ProviderMap,
    };
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct QueuedProvider {
        outcomes: Mutex<VecDeque<DeleteOutcome>>,
        calls: Mutex<Vec<(String, bool)>>,
    }

    impl QueuedProvider {
        fn new(outcomes: Vec<DeleteOutcome>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CredentialsProvider for QueuedProvider {
        fn provider(&self) -> &str {
            "github"
        }

        fn provider_name(&self) -> &str {
            "GitHub"
        }

        fn saved_credentials(&self) -> Vec<Credential> {
            vec![Credential::new("gh-1", "github", CredentialType::OAuth2)]
        }

        async fn delete_credentials(
            &self,
            id: &str,
            force: bool,
        ) -> integrations_core::Result<DeleteOutcome> {
            self.calls.lock().unwrap().push((id.to_string(), force));
            Ok(self
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(DeleteOutcome::revoked))
        }
    }

    fn state_with(provider: Arc<QueuedProvider>) -> AppState {
        let mut state = AppState::new(HiddenCredentialsConfig::new());
        let mut providers = ProviderMap::new();
        providers.insert(provider);
        state.set_providers(providers);
        state
    }

    fn in_use() -> Vec<DeleteOutcome> {
        vec![
            DeleteOutcome::needs_confirmation("Used by 2 agents."),
            DeleteOutcome::revoked(),
        ]
    }

    fn en() -> I18n {
        I18n::for_locale("en")
    }

    #[tokio::test]
    async fn test_assume_yes_forces_without_asking() {
        let provider = QueuedProvider::new(in_use());
        let mut state = state_with(provider.clone());
        let mut prompter = ScriptedPrompter::default();

        let status = delete_with_confirmation(
            &mut state,
            "github",
            "gh-1",
            false,
            ConfirmMode::AssumeYes,
            &mut prompter,
            &en(),
        )
        .await
        .unwrap();

        assert_eq!(status, DeletionStatus::Deleted { revoked: true });
        assert_eq!(
            provider.calls(),
            vec![("gh-1".to_string(), false), ("gh-1".to_string(), true)]
        );
        assert!(prompter.asked.is_empty());
        assert!(!state.deletion.dialog().is_open());
    }

    #[tokio::test]
    async fn test_confirm_answer_continues() {
        let provider = QueuedProvider::new(in_use());
        let mut state = state_with(provider.clone());
        let mut prompter = ScriptedPrompter::new(&["y"]);

        let status = delete_with_confirmation(
            &mut state,
            "github",
            "gh-1",
            false,
            ConfirmMode::Ask,
            &mut prompter,
            &en(),
        )
        .await
        .unwrap();

        assert_eq!(status, DeletionStatus::Deleted { revoked: true });
        assert_eq!(provider.calls().len(), 2);
        assert_eq!(prompter.asked.len(), 1);
    }

    #[tokio::test]
    async fn test_reject_answer_cancels() {
        let provider = QueuedProvider::new(in_use());
        let mut state = state_with(provider.clone());
        let mut prompter = ScriptedPrompter::new(&["n"]);

        let status = delete_with_confirmation(
            &mut state,
            "github",
            "gh-1",
            false,
            ConfirmMode::Ask,
            &mut prompter,
            &en(),
        )
        .await
        .unwrap();

        assert_eq!(status, DeletionStatus::Skipped);
        assert_eq!(provider.calls(), vec![("gh-1".to_string(), false)]);
        assert!(!state.deletion.dialog().is_open());
    }

    #[tokio::test]
    async fn test_end_of_input_cancels_deletion() {
        let provider = QueuedProvider::new(in_use());
        let mut state = state_with(provider.clone());
        let mut prompter = ScriptedPrompter::default();

        let status = delete_with_confirmation(
            &mut state,
            "github",
            "gh-1",
            false,
            ConfirmMode::Ask,
            &mut prompter,
            &en(),
        )
        .await
        .unwrap();

        assert_eq!(status, DeletionStatus::Skipped);
        assert_eq!(prompter.asked.len(), 1);
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_provider_is_an_error() {
        let mut state = state_with(QueuedProvider::new(Vec::new()));
        let mut prompter = ScriptedPrompter::default();

        let result = delete_with_confirmation(
            &mut state,
            "notion",
            "n-1",
            false,
            ConfirmMode::Ask,
            &mut prompter,
            &en(),
        )
        .await;
        assert!(result.is_err());
    }

    fn runner_with_two_agents() -> AgentRunner {
        let agent = |id: &str| AgentSummary {
            id: id.to_string(),
            version: 1,
            name: format!("Agent {}", id),
            description: String::new(),
            image: None,
            last_edited: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        };
        let mut runner = AgentRunner::new();
        runner.set_agents(vec![agent("a"), agent("b")]);
        runner
    }

    #[test]
    fn test_pick_agent_by_number() {
        let mut runner = runner_with_two_agents();
        let mut prompter = ScriptedPrompter::new(&["0", "2"]);

        assert!(pick_agent(&mut runner, &mut prompter, &en()).unwrap());
        assert_eq!(runner.selected_id(), Some("b"));
        assert_eq!(prompter.asked.len(), 2);
    }

    #[test]
    fn test_pick_agent_stops_at_end_of_input() {
        let mut runner = runner_with_two_agents();
        let mut prompter = ScriptedPrompter::new(&["x", "9"]);

        assert!(!pick_agent(&mut runner, &mut prompter, &en()).unwrap());
        assert_eq!(runner.selected_id(), None);
        assert_eq!(prompter.asked.len(), 3);
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation(" Continue "));
        assert!(is_confirmation("sí"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
    }
}
