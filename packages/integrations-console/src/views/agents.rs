//! Agent picker view

use integrations_core::{agent_detail_link, monitoring_link, AgentRunner, NotReady};

use crate::i18n::I18n;

/// Render the agent picker: header, loading/error line and numbered agent list
pub fn render_agent_picker(
    runner: &AgentRunner,
    loading: bool,
    error: Option<&str>,
    i18n: &I18n,
) -> String {
    let mut out = format!(
        "{}\n{}\n\n",
        i18n.t("agents.title"),
        i18n.t("agents.subtitle")
    );

    if loading {
        out.push_str(&i18n.t("agents.loading"));
        out.push('\n');
    }
    if let Some(error) = error {
        out.push_str(error);
        out.push('\n');
    }

    out.push_str(&format!("{}:\n", i18n.t("agents.label")));
    if runner.agents().is_empty() && !loading && error.is_none() {
        out.push_str(&format!("  {}\n", i18n.t("agents.none")));
    } else if runner.selected_id().is_none() && !runner.agents().is_empty() {
        out.push_str(&format!("  {}\n", i18n.t("agents.placeholder")));
    }
    for (index, agent) in runner.agents().iter().enumerate() {
        let selected = runner.selected_id() == Some(agent.id.as_str());
        out.push_str(&format!(
            "{} {}. {} (v{})\n",
            if selected { ">" } else { " " },
            index + 1,
            agent.name,
            agent.version
        ));
    }

    if let Some(id) = runner.selected_id() {
        out.push_str(&i18n.format("agents.view", &[("url", &agent_detail_link(id))]));
        out.push('\n');
    }
    out
}

/// Banner shown once an execution was accepted
pub fn render_execution_banner(runner: &AgentRunner, i18n: &I18n) -> Option<String> {
    let execution_id = runner.last_execution_id()?;
    runner.selected_id()?;
    Some(format!(
        "{} {}\n",
        i18n.format("agents.started", &[("id", execution_id)]),
        i18n.format("agents.progress", &[("url", &monitoring_link(execution_id))])
    ))
}

/// Message explaining why a run was not submitted
pub fn not_ready_message(reason: NotReady, i18n: &I18n) -> String {
    match reason {
        NotReady::NoAgentSelected => i18n.t("agents.not_ready.no_agent"),
        NotReady::UnknownVersion => i18n.t("agents.not_ready.unknown_version"),
        NotReady::BlankPrompt => i18n.t("agents.not_ready.blank_prompt"),
        NotReady::AlreadyRunning => i18n.t("agents.not_ready.running"),
    }
}
