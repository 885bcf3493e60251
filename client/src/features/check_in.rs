//! Door scanner
//!
//! A scan is parsed on the device first. Codes that are not ticket codes
//! fail immediately and never reach the server. Scans sent back to back
//! are each checked in; the result shows whichever answer came back last.

use super::perform;
use crate::checkin::CheckInCode;
use crate::environment::ClientEnvironment;
use gatepass_api::types::CheckInResult;
use gatepass_core::Resource;
use gatepass_core::effect::Effect;
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Scanner screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckInState {
    /// Most recent code that parsed
    pub last_code: Option<CheckInCode>,
    /// Outcome of the most recent scan
    pub result: Option<Resource<CheckInResult>>,
    /// Successful check-ins since the scanner opened
    pub checked_in_count: u32,
}

/// Scanner actions
#[derive(Clone, Debug, PartialEq)]
pub enum CheckInAction {
    /// A QR payload was read
    Scan(String),
    /// Clear the last result
    Reset,
    /// Check-in state changed
    ResultUpdated(Resource<CheckInResult>),
}

/// Reducer for the scanner
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckInReducer;

impl CheckInReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CheckInReducer {
    type State = CheckInState;
    type Action = CheckInAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut CheckInState,
        action: CheckInAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<CheckInAction>; 4]> {
        match action {
            CheckInAction::Scan(raw) => match CheckInCode::parse(&raw) {
                Ok(code) => {
                    tracing::debug!(ticket_id = %code.ticket_id(), "Ticket code scanned");
                    state.last_code = Some(code.clone());
                    smallvec![perform(
                        env.tickets.check_in(code),
                        CheckInAction::ResultUpdated
                    )]
                },
                Err(error) => {
                    tracing::warn!(%error, "Rejected scanned code");
                    metrics::counter!("checkin.rejected_codes").increment(1);
                    state.last_code = None;
                    state.result = Some(Resource::Error(error.to_string()));
                    smallvec![Effect::None]
                },
            },
            CheckInAction::Reset => {
                state.last_code = None;
                state.result = None;
                smallvec![Effect::None]
            },
            CheckInAction::ResultUpdated(resource) => {
                if resource.is_success() {
                    state.checked_in_count += 1;
                }
                state.result = Some(resource);
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for the scanner
pub type CheckInStore = Store<CheckInState, CheckInAction, ClientEnvironment, CheckInReducer>;

/// Create a scanner store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<CheckInState, CheckInAction, ClientEnvironment, CheckInReducer> {
    ScopedStore::new(Store::new(CheckInState::default(), CheckInReducer::new(), env))
}
