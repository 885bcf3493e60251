//! Sign-in, registration and profile
//!
//! Login, registration, profile load and profile update all write the same
//! `user` slot, so a later request for the user replaces an earlier one.
//! Session writes (sign-out, onboarding) run as effects and report the new
//! session flags back.

use super::fetch;
use crate::environment::ClientEnvironment;
use gatepass_api::types::{LoginRequest, ProfileUpdate, RegisterRequest, User};
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the signed-in user
pub const USER: EffectId = EffectId::new("account.user");

/// Account screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountState {
    /// Signed-in user
    pub user: Option<Resource<User>>,
    /// Whether the session holds a token
    pub signed_in: bool,
    /// Whether onboarding was completed
    pub onboarding_completed: bool,
}

/// Account actions
#[derive(Clone, Debug, PartialEq)]
pub enum AccountAction {
    /// Read the session flags
    Restore,
    /// Sign in
    Login(LoginRequest),
    /// Create an account
    Register(RegisterRequest),
    /// Load the signed-in user's profile
    LoadProfile,
    /// Change profile fields
    UpdateProfile(ProfileUpdate),
    /// Sign out locally
    Logout,
    /// Onboarding was shown
    CompleteOnboarding,
    /// User state changed
    UserUpdated(Resource<User>),
    /// Session flags changed
    SessionChanged {
        /// Whether the session holds a token
        signed_in: bool,
        /// Whether onboarding was completed
        onboarding_completed: bool,
    },
}

/// Reducer for the account screen
#[derive(Clone, Copy, Debug, Default)]
pub struct AccountReducer;

impl AccountReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn session_changed(env: &ClientEnvironment) -> AccountAction {
    AccountAction::SessionChanged {
        signed_in: env.users.is_signed_in(),
        onboarding_completed: env.users.onboarding_completed(),
    }
}

impl Reducer for AccountReducer {
    type State = AccountState;
    type Action = AccountAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut AccountState,
        action: AccountAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<AccountAction>; 4]> {
        match action {
            AccountAction::Restore => {
                state.signed_in = env.users.is_signed_in();
                state.onboarding_completed = env.users.onboarding_completed();
                smallvec![Effect::None]
            },
            AccountAction::Login(request) => {
                smallvec![fetch(USER, env.users.login(request), AccountAction::UserUpdated)]
            },
            AccountAction::Register(request) => {
                smallvec![fetch(USER, env.users.register(request), AccountAction::UserUpdated)]
            },
            AccountAction::LoadProfile => {
                smallvec![fetch(USER, env.users.me(), AccountAction::UserUpdated)]
            },
            AccountAction::UpdateProfile(update) => smallvec![fetch(
                USER,
                env.users.update_profile(update),
                AccountAction::UserUpdated
            )],
            AccountAction::Logout => {
                state.user = None;
                let env = env.clone();
                smallvec![
                    Effect::Cancel(USER),
                    Effect::Future(Box::pin(async move {
                        env.users.logout();
                        Some(session_changed(&env))
                    })),
                ]
            },
            AccountAction::CompleteOnboarding => {
                let env = env.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    env.users.complete_onboarding();
                    Some(session_changed(&env))
                }))]
            },
            AccountAction::UserUpdated(resource) => {
                if resource.is_terminal() {
                    state.signed_in = env.users.is_signed_in();
                }
                state.user = Some(resource);
                smallvec![Effect::None]
            },
            AccountAction::SessionChanged {
                signed_in,
                onboarding_completed,
            } => {
                state.signed_in = signed_in;
                state.onboarding_completed = onboarding_completed;
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for the account screen
pub type AccountStore = Store<AccountState, AccountAction, ClientEnvironment, AccountReducer>;

/// Create an account store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<AccountState, AccountAction, ClientEnvironment, AccountReducer> {
    ScopedStore::new(Store::new(AccountState::default(), AccountReducer::new(), env))
}
