//! Session gate for pages that require a signed-in user.

use serde::{Deserialize, Serialize};

/// Route users are sent to when no session is present.
pub const LOGIN_ROUTE: &str = "/login";

/// Identifier of the user behind an API key; the key itself carries no profile.
pub const API_KEY_USER_ID: &str = "api-key";

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Authentication state as seen by a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    SignedIn(User),
    SignedOut,
}

/// What a gated page should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageGate<'a> {
    ShowLoading,
    Redirect(&'static str),
    Render(&'a User),
}

impl SessionState {
    /// Signed in when a non-blank API key is configured, signed out otherwise.
    ///
    /// A key the server rejects is detected on the first request and turns
    /// the session into [`SessionState::SignedOut`].
    pub fn from_api_key(api_key: Option<&str>) -> Self {
        match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => SessionState::SignedIn(User {
                id: API_KEY_USER_ID.to_string(),
                email: None,
            }),
            _ => SessionState::SignedOut,
        }
    }

    pub fn gate(&self) -> PageGate<'_> {
        match self {
            SessionState::Loading => PageGate::ShowLoading,
            SessionState::SignedOut => PageGate::Redirect(LOGIN_ROUTE),
            SessionState::SignedIn(user) => PageGate::Render(user),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate() {
        assert_eq!(SessionState::Loading.gate(), PageGate::ShowLoading);
        assert_eq!(SessionState::SignedOut.gate(), PageGate::Redirect("/login"));

        let state = SessionState::SignedIn(User {
            id: "u1".to_string(),
            email: None,
        });
        match state.gate() {
            PageGate::Render(user) => assert_eq!(user.id, "u1"),
            other => panic!("unexpected gate: {:?}", other),
        }
        assert!(state.user().is_some());
    }

    #[test]
    fn test_session_from_api_key() {
        assert_eq!(SessionState::from_api_key(None), SessionState::SignedOut);
        assert_eq!(SessionState::from_api_key(Some("  ")), SessionState::SignedOut);

        let state = SessionState::from_api_key(Some("agpt_123"));
        assert_eq!(state.user().map(|u| u.id.as_str()), Some(API_KEY_USER_ID));
    }
}
