//! Confirmation dialog state.

/// Action performed when the user presses "Continue".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Retry the deletion with the force flag set
    ForceDelete { provider: String, id: String },
}

/// Action performed when the user presses "Cancel" or dismisses the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectAction {
    Close,
}

/// The single confirmation dialog of the credentials page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmationDialog {
    #[default]
    Closed,
    Open {
        message: String,
        on_confirm: ConfirmAction,
        on_reject: RejectAction,
    },
}

impl ConfirmationDialog {
    pub const TITLE: &'static str = "Are you sure?";
    pub const CANCEL_LABEL: &'static str = "Cancel";
    pub const CONFIRM_LABEL: &'static str = "Continue";

    /// Open (or replace) the dialog.
    pub fn open(&mut self, message: impl Into<String>, on_confirm: ConfirmAction) {
        *self = ConfirmationDialog::Open {
            message: message.into(),
            on_confirm,
            on_reject: RejectAction::Close,
        };
    }

    pub fn close(&mut self) {
        *self = ConfirmationDialog::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ConfirmationDialog::Open { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ConfirmationDialog::Open { message, .. } => Some(message),
            ConfirmationDialog::Closed => None,
        }
    }

    /// Take the confirm action out of an open dialog, leaving it closed.
    pub fn take_confirm(&mut self) -> Option<ConfirmAction> {
        match std::mem::take(self) {
            ConfirmationDialog::Open { on_confirm, .. } => Some(on_confirm),
            ConfirmationDialog::Closed => None,
        }
    }

    /// Apply the reject action of an open dialog.
    pub fn reject(&mut self) {
        if let ConfirmationDialog::Open { on_reject, .. } = self {
            let action = *on_reject;
            match action {
                RejectAction::Close => self.close(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn force(id: &str) -> ConfirmAction {
        ConfirmAction::ForceDelete {
            provider: "github".to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn test_open_and_close() {
        let mut dialog = ConfirmationDialog::default();
        assert!(!dialog.is_open());
        assert!(dialog.message().is_none());

        dialog.open("Really?", force("a"));
        assert!(dialog.is_open());
        assert_eq!(dialog.message(), Some("Really?"));

        dialog.close();
        assert_eq!(dialog, ConfirmationDialog::Closed);
    }

    #[test]
    fn test_open_replaces_previous_state() {
        let mut dialog = ConfirmationDialog::default();
        dialog.open("first", force("a"));
        dialog.open("second", force("b"));

        assert_eq!(dialog.message(), Some("second"));
        assert_eq!(dialog.take_confirm(), Some(force("b")));
    }

    #[test]
    fn test_take_confirm_closes() {
        let mut dialog = ConfirmationDialog::default();
        assert!(dialog.take_confirm().is_none());

        dialog.open("msg", force("a"));
        assert_eq!(dialog.take_confirm(), Some(force("a")));
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_reject_closes() {
        let mut dialog = ConfirmationDialog::default();
        dialog.open("msg", force("a"));
        dialog.reject();
        assert!(!dialog.is_open());
    }
}
