//! Session storage collaborator
//!
//! Persisting the token across runs is the host application's job; the
//! client only needs something that can hold it while running.

use crate::types::UserId;
use std::sync::{PoisonError, RwLock};

/// Where the client keeps its credentials and onboarding flag
pub trait SessionStore: Send + Sync {
    /// Current bearer token
    fn token(&self) -> Option<String>;

    /// Replace the bearer token
    fn set_token(&self, token: String);

    /// Forget the bearer token
    fn clear_token(&self);

    /// Signed-in user
    fn user_id(&self) -> Option<UserId>;

    /// Remember the signed-in user
    fn set_user_id(&self, user_id: UserId);

    /// Whether onboarding was completed on this device
    fn onboarding_completed(&self) -> bool;

    /// Record onboarding completion
    fn set_onboarding_completed(&self, completed: bool);
}

#[derive(Debug, Default, Clone)]
struct SessionData {
    token: Option<String>,
    user_id: Option<UserId>,
    onboarding_completed: bool,
}

/// Process-local [`SessionStore`]
#[derive(Debug, Default)]
pub struct InMemorySession {
    data: RwLock<SessionData>,
}

impl InMemorySession {
    /// Empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that starts signed in with `token`
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token.into());
        session
    }

    fn read(&self) -> SessionData {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, f: impl FnOnce(&mut SessionData)) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut data);
    }
}

impl SessionStore for InMemorySession {
    fn token(&self) -> Option<String> {
        self.read().token
    }

    fn set_token(&self, token: String) {
        self.update(|d| d.token = Some(token));
    }

    fn clear_token(&self) {
        self.update(|d| d.token = None);
    }

    fn user_id(&self) -> Option<UserId> {
        self.read().user_id
    }

    fn set_user_id(&self, user_id: UserId) {
        self.update(|d| d.user_id = Some(user_id));
    }

    fn onboarding_completed(&self) -> bool {
        self.read().onboarding_completed
    }

    fn set_onboarding_completed(&self, completed: bool) {
        self.update(|d| d.onboarding_completed = completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_and_clears() {
        let session = InMemorySession::new();
        assert_eq!(session.token(), None);

        session.set_token("jwt".to_string());
        assert_eq!(session.token().as_deref(), Some("jwt"));

        session.clear_token();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn clearing_token_keeps_other_fields() {
        let session = InMemorySession::with_token("jwt");
        session.set_user_id(UserId::new("u-1"));
        session.set_onboarding_completed(true);

        session.clear_token();

        assert_eq!(session.user_id(), Some(UserId::new("u-1")));
        assert!(session.onboarding_completed());
    }
}
