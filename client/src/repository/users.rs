//! Authentication and profile

use super::{ResourceStream, fetch};
use crate::messages;
use gatepass_api::types::{AuthSession, LoginRequest, ProfileUpdate, RegisterRequest, User};
use gatepass_api::{ApiClient, ApiError, SessionStore};
use std::sync::Arc;

/// Sign-in, registration and the signed-in user's profile
///
/// Login and registration write the returned token and user id into the
/// session, so every later request is authenticated. The token itself never
/// leaves this repository.
#[derive(Clone, Debug)]
pub struct UserRepository {
    api: ApiClient,
}

impl UserRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &Arc<dyn SessionStore> {
        self.api.session()
    }

    /// Sign in and remember the session
    #[must_use]
    pub fn login(&self, request: LoginRequest) -> ResourceStream<User> {
        let api = self.api.clone();
        fetch("login", messages::LOGIN_FAILED, async move {
            let auth = api.login(&request).await?;
            Ok::<_, ApiError>(remember(&api, auth))
        })
    }

    /// Create an account and remember the session
    #[must_use]
    pub fn register(&self, request: RegisterRequest) -> ResourceStream<User> {
        let api = self.api.clone();
        fetch("register", messages::REGISTER_FAILED, async move {
            let auth = api.register(&request).await?;
            Ok::<_, ApiError>(remember(&api, auth))
        })
    }

    /// Profile of the signed-in user
    #[must_use]
    pub fn me(&self) -> ResourceStream<User> {
        let api = self.api.clone();
        fetch("current_user", messages::PROFILE_FAILED, async move {
            api.current_user().await
        })
    }

    /// Change profile fields
    #[must_use]
    pub fn update_profile(&self, update: ProfileUpdate) -> ResourceStream<User> {
        let api = self.api.clone();
        fetch("update_profile", messages::PROFILE_UPDATE_FAILED, async move {
            api.update_profile(&update).await
        })
    }

    /// Forget the token; the server is not told
    pub fn logout(&self) {
        self.session().clear_token();
        tracing::info!("Signed out");
    }

    /// Record that onboarding was shown
    pub fn complete_onboarding(&self) {
        self.session().set_onboarding_completed(true);
    }

    /// Whether onboarding was already completed
    #[must_use]
    pub fn onboarding_completed(&self) -> bool {
        self.session().onboarding_completed()
    }

    /// Whether requests currently carry a token
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session().token().is_some()
    }
}

fn remember(api: &ApiClient, auth: AuthSession) -> User {
    let AuthSession { token, user } = auth;
    api.session().set_token(token);
    api.session().set_user_id(user.id.clone());
    tracing::info!(user_id = %user.id, "Signed in");
    user
}
