//! Event page: the event, its ticket types and who runs it

use super::fetch;
use crate::environment::ClientEnvironment;
use gatepass_api::types::{Event, EventId, Organizer, TicketType};
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the event itself
pub const EVENT: EffectId = EffectId::new("event_detail.event");
/// Slot of the ticket types
pub const TICKET_TYPES: EffectId = EffectId::new("event_detail.ticket_types");
/// Slot of the organizer card
pub const ORGANIZER: EffectId = EffectId::new("event_detail.organizer");

/// What the event page shows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventDetailState {
    /// Event being shown
    pub event_id: Option<EventId>,
    /// The event
    pub event: Option<Resource<Event>>,
    /// Ticket types on sale
    pub ticket_types: Option<Resource<Vec<TicketType>>>,
    /// Organizer card, loaded once the event names its organizer
    pub organizer: Option<Resource<Organizer>>,
}

impl EventDetailState {
    /// Ticket types that can still be bought
    #[must_use]
    pub fn available_ticket_types(&self) -> Vec<&TicketType> {
        self.ticket_types
            .as_ref()
            .and_then(Resource::data)
            .map(|types| types.iter().filter(|t| !t.is_sold_out()).collect())
            .unwrap_or_default()
    }
}

/// Event page actions
#[derive(Clone, Debug, PartialEq)]
pub enum EventDetailAction {
    /// Show an event
    Open(EventId),
    /// Reload the event and its ticket types
    Refresh,
    /// Event state changed
    EventUpdated(Resource<Event>),
    /// Ticket type state changed
    TicketTypesUpdated(Resource<Vec<TicketType>>),
    /// Organizer state changed
    OrganizerUpdated(Resource<Organizer>),
}

/// Reducer for the event page
#[derive(Clone, Copy, Debug, Default)]
pub struct EventDetailReducer;

impl EventDetailReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn load(id: &EventId, env: &ClientEnvironment) -> SmallVec<[Effect<EventDetailAction>; 4]> {
    smallvec![
        fetch(EVENT, env.events.event(id.clone()), EventDetailAction::EventUpdated),
        fetch(
            TICKET_TYPES,
            env.ticket_types.ticket_types(id.clone()),
            EventDetailAction::TicketTypesUpdated
        ),
    ]
}

impl Reducer for EventDetailReducer {
    type State = EventDetailState;
    type Action = EventDetailAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut EventDetailState,
        action: EventDetailAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<EventDetailAction>; 4]> {
        match action {
            EventDetailAction::Open(id) => {
                let effects = load(&id, env);
                *state = EventDetailState {
                    event_id: Some(id),
                    ..EventDetailState::default()
                };
                effects
            },
            EventDetailAction::Refresh => match &state.event_id {
                Some(id) => load(id, env),
                None => smallvec![Effect::None],
            },
            EventDetailAction::EventUpdated(resource) => {
                let organizer_id = resource.data().and_then(|e| e.organizer_id.clone());
                state.event = Some(resource);

                match organizer_id {
                    Some(id) if state.organizer.is_none() => smallvec![fetch(
                        ORGANIZER,
                        env.organizers.organizer(id),
                        EventDetailAction::OrganizerUpdated
                    )],
                    _ => smallvec![Effect::None],
                }
            },
            EventDetailAction::TicketTypesUpdated(resource) => {
                state.ticket_types = Some(resource);
                smallvec![Effect::None]
            },
            EventDetailAction::OrganizerUpdated(resource) => {
                state.organizer = Some(resource);
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for the event page
pub type EventDetailStore =
    Store<EventDetailState, EventDetailAction, ClientEnvironment, EventDetailReducer>;

/// Create an event page store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<EventDetailState, EventDetailAction, ClientEnvironment, EventDetailReducer> {
    ScopedStore::new(Store::new(EventDetailState::default(), EventDetailReducer::new(), env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support;
    use chrono::{TimeZone, Utc};
    use gatepass_api::types::{EventStatus, OrganizerId};
    use gatepass_testing::{ReducerTest, assertions};

    fn event(organizer: Option<&str>) -> Event {
        Event {
            id: EventId::new("e1"),
            title: "Jazz Night".to_string(),
            description: None,
            start_time: Utc.with_ymd_and_hms(2026, 7, 1, 19, 0, 0).single().unwrap_or_default(),
            end_time: None,
            venue: None,
            location: None,
            category: None,
            organizer_id: organizer.map(OrganizerId::new),
            status: EventStatus::Published,
            featured: false,
            images: Vec::new(),
            min_price: Some(25.0),
        }
    }

    #[test]
    fn open_resets_and_loads_both_slots() {
        let (_, env) = test_support::environment();
        let stale = EventDetailState {
            event_id: Some(EventId::new("old")),
            organizer: Some(Resource::Loading),
            ..EventDetailState::default()
        };

        ReducerTest::new(EventDetailReducer::new())
            .with_env(env)
            .given_state(stale)
            .when_action(EventDetailAction::Open(EventId::new("e1")))
            .then_state(|state| {
                assert_eq!(state.event_id, Some(EventId::new("e1")));
                assert!(state.organizer.is_none());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 2);
                assertions::assert_has_cancellable_effect(effects, EVENT);
                assertions::assert_has_cancellable_effect(effects, TICKET_TYPES);
            })
            .run();
    }

    #[test]
    fn loaded_event_pulls_in_its_organizer() {
        let (_, env) = test_support::environment();

        ReducerTest::new(EventDetailReducer::new())
            .with_env(env)
            .given_state(EventDetailState::default())
            .when_action(EventDetailAction::EventUpdated(Resource::Success(event(Some(
                "org-1",
            )))))
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, ORGANIZER);
            })
            .run();
    }

    #[test]
    fn event_without_organizer_stops_there() {
        let (_, env) = test_support::environment();

        ReducerTest::new(EventDetailReducer::new())
            .with_env(env)
            .given_state(EventDetailState::default())
            .when_action(EventDetailAction::EventUpdated(Resource::Success(event(None))))
            .then_state(|state| assert!(state.event.as_ref().is_some_and(Resource::is_success)))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn refresh_before_open_does_nothing() {
        let (_, env) = test_support::environment();

        ReducerTest::new(EventDetailReducer::new())
            .with_env(env)
            .given_state(EventDetailState::default())
            .when_action(EventDetailAction::Refresh)
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
