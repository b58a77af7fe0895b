//! Connections & credentials view

use integrations_core::{table_columns, ConfirmationDialog, CredentialRow, ProviderIcon, TypeIcon};

use crate::i18n::I18n;

fn provider_icon_tag(icon: ProviderIcon) -> &'static str {
    match icon {
        ProviderIcon::Github => "[gh]",
        ProviderIcon::Google => "[g]",
        ProviderIcon::Notion => "[n]",
        ProviderIcon::Discord => "[dc]",
        ProviderIcon::Linear => "[ln]",
        ProviderIcon::Twitter => "[x]",
        ProviderIcon::Reddit => "[r]",
        ProviderIcon::Hubspot => "[hs]",
        ProviderIcon::Todoist => "[td]",
        ProviderIcon::OpenAi => "[ai]",
        ProviderIcon::Anthropic => "[an]",
        ProviderIcon::Key => "[k]",
    }
}

fn type_icon_tag(icon: TypeIcon) -> &'static str {
    match icon {
        TypeIcon::User => "(user)",
        TypeIcon::Key => "(key)",
    }
}

/// Render the credentials table.
///
/// Each row spans two lines: the name, then the type label and identifier.
pub fn render_credentials_table(rows: &[CredentialRow], i18n: &I18n) -> String {
    let mut out = format!("{}\n\n", i18n.t("integrations.title"));
    if rows.is_empty() {
        out.push_str(&i18n.t("integrations.empty"));
        out.push('\n');
        return out;
    }

    let provider_cells: Vec<String> = rows
        .iter()
        .map(|row| format!("{} {}", provider_icon_tag(row.provider_icon), row.provider_name))
        .collect();
    let name_cells: Vec<(String, String)> = rows
        .iter()
        .map(|row| {
            (
                format!("{} {}", type_icon_tag(row.type_icon), row.display_name()),
                format!("{} - {}", row.type_label(), row.id()),
            )
        })
        .collect();

    let [provider_header, name_header, actions_header] = table_columns();
    let provider_width = provider_cells
        .iter()
        .map(|c| c.chars().count())
        .chain(std::iter::once(provider_header.len()))
        .max()
        .unwrap_or(0);
    let name_width = name_cells
        .iter()
        .flat_map(|(name, detail)| [name.chars().count(), detail.chars().count()])
        .chain(std::iter::once(name_header.len()))
        .max()
        .unwrap_or(0);

    out.push_str(&format!(
        "{:<pw$}  {:<nw$}  {}\n",
        provider_header,
        name_header,
        actions_header,
        pw = provider_width,
        nw = name_width
    ));

    let delete = i18n.t("integrations.delete");
    for (index, (provider, (name, detail))) in provider_cells.iter().zip(&name_cells).enumerate() {
        out.push_str(&format!(
            "{:<pw$}  {:<nw$}  {} #{}\n",
            provider,
            name,
            delete,
            index + 1,
            pw = provider_width,
            nw = name_width
        ));
        out.push_str(&format!("{:<pw$}  {}\n", "", detail, pw = provider_width));
    }
    out
}

/// Render the confirmation dialog, if open
pub fn render_dialog(dialog: &ConfirmationDialog) -> Option<String> {
    let message = dialog.message()?;
    Some(format!(
        "{}\n{}\n[{}] [{}]\n",
        ConfirmationDialog::TITLE,
        message,
        ConfirmationDialog::CANCEL_LABEL,
        ConfirmationDialog::CONFIRM_LABEL
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use integrations_core::{ConfirmAction, Credential, CredentialType};

    fn row(id: &str, provider: &str, name: &str, credential_type: CredentialType) -> CredentialRow {
        CredentialRow {
            credential: Credential::new(id, provider, credential_type).with_title("Personal"),
            provider: provider.to_string(),
            provider_name: name.to_string(),
            provider_icon: ProviderIcon::for_provider(provider),
            type_icon: TypeIcon::for_type(credential_type),
        }
    }

    #[test]
    fn test_empty_table() {
        let out = render_credentials_table(&[], &I18n::for_locale("en"));
        assert!(out.starts_with("Connections & Credentials"));
        assert!(out.contains("No saved credentials."));
    }

    #[test]
    fn test_table_rows() {
        let rows = vec![
            row("gh-1", "github", "GitHub", CredentialType::OAuth2),
            row("key-1", "exa", "Exa", CredentialType::ApiKey),
        ];
        let out = render_credentials_table(&rows, &I18n::for_locale("en"));
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[2].starts_with("Provider"));
        assert!(lines[2].contains("Name"));
        assert!(lines[2].ends_with("Actions"));
        assert!(lines[3].contains("[gh] GitHub"));
        assert!(lines[3].contains("(user) Personal"));
        assert!(lines[3].ends_with("Delete #1"));
        assert!(lines[4].contains("OAuth2 credentials - gh-1"));
        assert!(lines[5].contains("[k] Exa"));
        assert!(lines[6].contains("API key - key-1"));
    }

    #[test]
    fn test_render_dialog() {
        let mut dialog = ConfirmationDialog::default();
        assert!(render_dialog(&dialog).is_none());

        dialog.open(
            "This credential is used by 2 agents.",
            ConfirmAction::ForceDelete {
                provider: "github".to_string(),
                id: "gh-1".to_string(),
            },
        );
        let out = render_dialog(&dialog).unwrap();
        assert_eq!(
            out,
            "Are you sure?\nThis credential is used by 2 agents.\n[Cancel] [Continue]\n"
        );
    }
}
