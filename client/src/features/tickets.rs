//! My tickets

use super::fetch;
use crate::environment::ClientEnvironment;
use gatepass_api::types::{Ticket, TicketId, TicketStatus};
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the ticket list
pub const TICKETS: EffectId = EffectId::new("tickets.list");
/// Slot of the opened ticket
pub const SELECTED: EffectId = EffectId::new("tickets.selected");

/// Wallet screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketsState {
    /// Tickets owned by the user
    pub tickets: Option<Resource<Vec<Ticket>>>,
    /// Ticket opened full screen, with its QR code
    pub selected: Option<Resource<Ticket>>,
}

impl TicketsState {
    /// Tickets not yet used at the door
    #[must_use]
    pub fn active_tickets(&self) -> Vec<&Ticket> {
        self.tickets
            .as_ref()
            .and_then(Resource::data)
            .map(|tickets| {
                tickets
                    .iter()
                    .filter(|t| t.status == TicketStatus::Active)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Wallet actions
#[derive(Clone, Debug, PartialEq)]
pub enum TicketsAction {
    /// Load the user's tickets
    Load,
    /// Open one ticket
    Select(TicketId),
    /// Close the opened ticket
    ClearSelection,
    /// Ticket list state changed
    TicketsUpdated(Resource<Vec<Ticket>>),
    /// Opened ticket state changed
    SelectedUpdated(Resource<Ticket>),
}

/// Reducer for the wallet
#[derive(Clone, Copy, Debug, Default)]
pub struct TicketsReducer;

impl TicketsReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TicketsReducer {
    type State = TicketsState;
    type Action = TicketsAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut TicketsState,
        action: TicketsAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<TicketsAction>; 4]> {
        match action {
            TicketsAction::Load => smallvec![fetch(
                TICKETS,
                env.tickets.my_tickets(),
                TicketsAction::TicketsUpdated
            )],
            TicketsAction::Select(id) => smallvec![fetch(
                SELECTED,
                env.tickets.ticket(id),
                TicketsAction::SelectedUpdated
            )],
            TicketsAction::ClearSelection => {
                state.selected = None;
                smallvec![Effect::Cancel(SELECTED)]
            },
            TicketsAction::TicketsUpdated(resource) => {
                state.tickets = Some(resource);
                smallvec![Effect::None]
            },
            TicketsAction::SelectedUpdated(resource) => {
                state.selected = Some(resource);
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for the wallet
pub type TicketsStore = Store<TicketsState, TicketsAction, ClientEnvironment, TicketsReducer>;

/// Create a wallet store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<TicketsState, TicketsAction, ClientEnvironment, TicketsReducer> {
    ScopedStore::new(Store::new(TicketsState::default(), TicketsReducer::new(), env))
}
