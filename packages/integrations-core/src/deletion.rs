//! Credential deletion workflow.
//!
//! A deletion request goes to the owning provider. The provider may delete the
//! credential outright, or answer that the deletion needs confirmation (for
//! example because the credential is still used by an agent). In that case the
//! confirmation dialog is opened, and confirming it re-issues the request with
//! the force flag set.
//!
//! All transitions take `&mut self`, so a workflow owned by one state object
//! cannot observe interleaved updates from overlapping requests.

use std::time::Duration;

use crate::dialog::{ConfirmAction, ConfirmationDialog};
use crate::notify::{Toast, Toaster};
use crate::provider::ProviderMap;
use crate::types::DeleteResult;

const SHORT_TOAST: Duration = Duration::from_secs(2);
const LONG_TOAST: Duration = Duration::from_secs(3);

/// What a deletion request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStatus {
    /// The provider is unknown or still loading; nothing was called
    Skipped,
    /// The credential was deleted
    Deleted { revoked: bool },
    /// The confirmation dialog was opened
    AwaitingConfirmation,
    /// The provider call failed
    Failed(String),
    /// The provider answered with neither a deletion nor a confirmation request
    Unrecognized,
}

/// Deletion requests together with the dialog and toasts they drive.
#[derive(Debug, Default)]
pub struct DeletionWorkflow {
    dialog: ConfirmationDialog,
    toaster: Toaster,
}

impl DeletionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> &ConfirmationDialog {
        &self.dialog
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn toaster_mut(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    /// Ask `provider` to delete credential `id`.
    pub async fn request_deletion(
        &mut self,
        providers: &ProviderMap,
        provider: &str,
        id: &str,
        force: bool,
    ) -> DeletionStatus {
        let Some(target) = providers.get(provider) else {
            tracing::debug!(provider, "Deletion requested for unavailable provider");
            return DeletionStatus::Skipped;
        };

        tracing::info!(provider, id, force, "Deleting credentials");

        let outcome = match target.delete_credentials(id, force).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(provider, id, "Failed to delete credentials: {}", e);
                self.toaster.push(Toast::destructive(
                    format!("Something went wrong when deleting credentials: {}", e),
                    SHORT_TOAST,
                ));
                self.dialog.close();
                return DeletionStatus::Failed(e.to_string());
            }
        };

        match outcome.classify() {
            DeleteResult::Deleted { revoked: true } => {
                self.toaster.push(Toast::new("Credentials deleted", SHORT_TOAST));
                self.dialog.close();
                DeletionStatus::Deleted { revoked: true }
            }
            DeleteResult::Deleted { revoked: false } => {
                self.toaster.push(
                    Toast::new("Credentials deleted from AutoGPT", LONG_TOAST).with_description(
                        format!(
                            "You may also manually remove the connection to AutoGPT at {}!",
                            provider
                        ),
                    ),
                );
                self.dialog.close();
                DeletionStatus::Deleted { revoked: false }
            }
            DeleteResult::NeedsConfirmation { message } => {
                tracing::info!(provider, id, "Deletion needs confirmation");
                self.dialog.open(
                    message,
                    ConfirmAction::ForceDelete {
                        provider: provider.to_string(),
                        id: id.to_string(),
                    },
                );
                DeletionStatus::AwaitingConfirmation
            }
            DeleteResult::Unrecognized => {
                tracing::warn!(provider, id, ?outcome, "Unexpected deletion response");
                self.toaster.push(Toast::destructive(
                    "Unexpected response when deleting credentials",
                    SHORT_TOAST,
                ));
                self.dialog.close();
                DeletionStatus::Unrecognized
            }
        }
    }

    /// "Continue" in the dialog: re-issue the pending deletion with `force = true`.
    pub async fn confirm(&mut self, providers: &ProviderMap) -> DeletionStatus {
        match self.dialog.take_confirm() {
            Some(ConfirmAction::ForceDelete { provider, id }) => {
                self.request_deletion(providers, &provider, &id, true).await
            }
            None => DeletionStatus::Skipped,
        }
    }

    /// "Cancel" in the dialog.
    pub fn reject(&mut self) {
        tracing::debug!("Deletion confirmation rejected");
        self.dialog.reject();
    }
}
