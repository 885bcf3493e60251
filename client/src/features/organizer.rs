//! Organizer console: profile, event management, ticket types, attendees
//!
//! Successful writes reload the list they affect, so the console never
//! shows a list that predates its own edit.

use super::{fetch, perform};
use crate::environment::ClientEnvironment;
use gatepass_api::Acknowledgement;
use gatepass_api::types::{
    Event, EventDraft, EventId, EventImage, ImageUpload, Organizer, OrganizerId, Ticket,
    TicketType, TicketTypeDraft, TicketTypeId,
};
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the organizer profile
pub const PROFILE: EffectId = EffectId::new("organizer.profile");
/// Slot of the organizer's events
pub const EVENTS: EffectId = EffectId::new("organizer.events");
/// Slot of the ticket type list
pub const TICKET_TYPES: EffectId = EffectId::new("organizer.ticket_types");
/// Slot of the attendee list
pub const ATTENDEES: EffectId = EffectId::new("organizer.attendees");

/// Organizer console
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrganizerState {
    /// Organizer signed in to the console
    pub organizer_id: Option<OrganizerId>,
    /// Public profile
    pub profile: Option<Resource<Organizer>>,
    /// Events the organizer runs
    pub events: Option<Resource<Vec<Event>>>,
    /// Last event create/update
    pub saved_event: Option<Resource<Event>>,
    /// Last event deletion
    pub deleted_event: Option<Resource<Acknowledgement>>,
    /// Last image upload
    pub uploaded_image: Option<Resource<EventImage>>,
    /// Last featured toggle
    pub featured: Option<Resource<Event>>,
    /// Event whose ticket types are open
    pub ticket_types_event: Option<EventId>,
    /// Ticket types of `ticket_types_event`
    pub ticket_types: Option<Resource<Vec<TicketType>>>,
    /// Last ticket type create/update
    pub saved_ticket_type: Option<Resource<TicketType>>,
    /// Last ticket type deletion
    pub deleted_ticket_type: Option<Resource<Acknowledgement>>,
    /// Attendees of an event
    pub attendees: Option<Resource<Vec<Ticket>>>,
}

/// Organizer console actions
#[derive(Clone, Debug, PartialEq)]
pub enum OrganizerAction {
    /// Open the console for an organizer: profile and events
    Open(OrganizerId),
    /// Create an event
    CreateEvent(EventDraft),
    /// Edit an event
    UpdateEvent {
        /// Event to edit
        id: EventId,
        /// New fields
        draft: EventDraft,
    },
    /// Delete an event
    DeleteEvent(EventId),
    /// Upload an event image
    UploadImage {
        /// Event the image belongs to
        event_id: EventId,
        /// The file
        image: ImageUpload,
        /// Make it the cover image
        is_primary: bool,
    },
    /// Feature or unfeature an event
    SetFeatured {
        /// Event to toggle
        event_id: EventId,
        /// New flag
        featured: bool,
    },
    /// Open an event's ticket types
    LoadTicketTypes(EventId),
    /// Add a ticket type
    CreateTicketType(TicketTypeDraft),
    /// Edit a ticket type
    UpdateTicketType {
        /// Ticket type to edit
        id: TicketTypeId,
        /// New fields
        draft: TicketTypeDraft,
    },
    /// Remove a ticket type
    DeleteTicketType(TicketTypeId),
    /// Load who bought tickets for an event
    LoadAttendees(EventId),
    /// Profile state changed
    ProfileUpdated(Resource<Organizer>),
    /// Event list state changed
    EventsUpdated(Resource<Vec<Event>>),
    /// Event save state changed
    EventSaved(Resource<Event>),
    /// Event deletion state changed
    EventDeleted(Resource<Acknowledgement>),
    /// Upload state changed
    ImageUploaded(Resource<EventImage>),
    /// Featured toggle state changed
    FeaturedUpdated(Resource<Event>),
    /// Ticket type list state changed
    TicketTypesUpdated(Resource<Vec<TicketType>>),
    /// Ticket type save state changed
    TicketTypeSaved(Resource<TicketType>),
    /// Ticket type deletion state changed
    TicketTypeDeleted(Resource<Acknowledgement>),
    /// Attendee list state changed
    AttendeesUpdated(Resource<Vec<Ticket>>),
}

/// Reducer for the organizer console
#[derive(Clone, Copy, Debug, Default)]
pub struct OrganizerReducer;

impl OrganizerReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn reload_events(
    state: &OrganizerState,
    env: &ClientEnvironment,
) -> SmallVec<[Effect<OrganizerAction>; 4]> {
    match &state.organizer_id {
        Some(id) => smallvec![fetch(
            EVENTS,
            env.organizers.organizer_events(id.clone()),
            OrganizerAction::EventsUpdated
        )],
        None => smallvec![Effect::None],
    }
}

fn reload_ticket_types(
    state: &OrganizerState,
    env: &ClientEnvironment,
) -> SmallVec<[Effect<OrganizerAction>; 4]> {
    match &state.ticket_types_event {
        Some(id) => smallvec![fetch(
            TICKET_TYPES,
            env.ticket_types.ticket_types(id.clone()),
            OrganizerAction::TicketTypesUpdated
        )],
        None => smallvec![Effect::None],
    }
}

impl Reducer for OrganizerReducer {
    type State = OrganizerState;
    type Action = OrganizerAction;
    type Environment = ClientEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per console operation
    fn reduce(
        &self,
        state: &mut OrganizerState,
        action: OrganizerAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<OrganizerAction>; 4]> {
        match action {
            OrganizerAction::Open(id) => {
                state.organizer_id = Some(id.clone());
                smallvec![
                    fetch(
                        PROFILE,
                        env.organizers.organizer(id.clone()),
                        OrganizerAction::ProfileUpdated
                    ),
                    fetch(
                        EVENTS,
                        env.organizers.organizer_events(id),
                        OrganizerAction::EventsUpdated
                    ),
                ]
            },
            OrganizerAction::CreateEvent(draft) => smallvec![perform(
                env.events.create_event(draft),
                OrganizerAction::EventSaved
            )],
            OrganizerAction::UpdateEvent { id, draft } => smallvec![perform(
                env.events.update_event(id, draft),
                OrganizerAction::EventSaved
            )],
            OrganizerAction::DeleteEvent(id) => smallvec![perform(
                env.events.delete_event(id),
                OrganizerAction::EventDeleted
            )],
            OrganizerAction::UploadImage {
                event_id,
                image,
                is_primary,
            } => smallvec![perform(
                env.events.upload_event_image(event_id, image, is_primary),
                OrganizerAction::ImageUploaded
            )],
            OrganizerAction::SetFeatured { event_id, featured } => smallvec![perform(
                env.events.set_featured(event_id, featured),
                OrganizerAction::FeaturedUpdated
            )],
            OrganizerAction::LoadTicketTypes(event_id) => {
                state.ticket_types_event = Some(event_id);
                state.ticket_types = None;
                reload_ticket_types(state, env)
            },
            OrganizerAction::CreateTicketType(draft) => smallvec![perform(
                env.ticket_types.create(draft),
                OrganizerAction::TicketTypeSaved
            )],
            OrganizerAction::UpdateTicketType { id, draft } => smallvec![perform(
                env.ticket_types.update(id, draft),
                OrganizerAction::TicketTypeSaved
            )],
            OrganizerAction::DeleteTicketType(id) => smallvec![perform(
                env.ticket_types.delete(id),
                OrganizerAction::TicketTypeDeleted
            )],
            OrganizerAction::LoadAttendees(event_id) => smallvec![fetch(
                ATTENDEES,
                env.tickets.event_tickets(event_id),
                OrganizerAction::AttendeesUpdated
            )],
            OrganizerAction::ProfileUpdated(resource) => {
                state.profile = Some(resource);
                smallvec![Effect::None]
            },
            OrganizerAction::EventsUpdated(resource) => {
                state.events = Some(resource);
                smallvec![Effect::None]
            },
            OrganizerAction::EventSaved(resource) => {
                let reload = resource.is_success();
                state.saved_event = Some(resource);
                if reload {
                    reload_events(state, env)
                } else {
                    smallvec![Effect::None]
                }
            },
            OrganizerAction::EventDeleted(resource) => {
                let reload = resource.is_success();
                state.deleted_event = Some(resource);
                if reload {
                    reload_events(state, env)
                } else {
                    smallvec![Effect::None]
                }
            },
            OrganizerAction::ImageUploaded(resource) => {
                state.uploaded_image = Some(resource);
                smallvec![Effect::None]
            },
            OrganizerAction::FeaturedUpdated(resource) => {
                let reload = resource.is_success();
                state.featured = Some(resource);
                if reload {
                    reload_events(state, env)
                } else {
                    smallvec![Effect::None]
                }
            },
            OrganizerAction::TicketTypesUpdated(resource) => {
                state.ticket_types = Some(resource);
                smallvec![Effect::None]
            },
            OrganizerAction::TicketTypeSaved(resource) => {
                let reload = resource.is_success();
                state.saved_ticket_type = Some(resource);
                if reload {
                    reload_ticket_types(state, env)
                } else {
                    smallvec![Effect::None]
                }
            },
            OrganizerAction::TicketTypeDeleted(resource) => {
                let reload = resource.is_success();
                state.deleted_ticket_type = Some(resource);
                if reload {
                    reload_ticket_types(state, env)
                } else {
                    smallvec![Effect::None]
                }
            },
            OrganizerAction::AttendeesUpdated(resource) => {
                state.attendees = Some(resource);
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for the organizer console
pub type OrganizerStore =
    Store<OrganizerState, OrganizerAction, ClientEnvironment, OrganizerReducer>;

/// Create an organizer console store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<OrganizerState, OrganizerAction, ClientEnvironment, OrganizerReducer> {
    ScopedStore::new(Store::new(OrganizerState::default(), OrganizerReducer::new(), env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support;
    use gatepass_testing::{ReducerTest, assertions};

    #[test]
    fn saved_event_reloads_the_organizers_events() {
        let (_, env) = test_support::environment();
        let open = OrganizerState {
            organizer_id: Some(OrganizerId::new("org-1")),
            ..OrganizerState::default()
        };

        ReducerTest::new(OrganizerReducer::new())
            .with_env(env)
            .given_state(open)
            .when_action(OrganizerAction::EventDeleted(Resource::Success(
                Acknowledgement {
                    message: Some("Event deleted".to_string()),
                },
            )))
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, EVENTS);
            })
            .run();
    }

    #[test]
    fn writes_are_not_keyed_for_cancellation() {
        let (_, env) = test_support::environment();

        ReducerTest::new(OrganizerReducer::new())
            .with_env(env)
            .given_state(OrganizerState::default())
            .when_action(OrganizerAction::DeleteEvent(EventId::new("e1")))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_stream_effect(effects);
                assert!(assertions::cancellable_ids(&effects[0]).is_empty());
            })
            .run();
    }

    #[test]
    fn failed_ticket_type_save_reloads_nothing() {
        let (_, env) = test_support::environment();

        ReducerTest::new(OrganizerReducer::new())
            .with_env(env)
            .given_state(OrganizerState::default())
            .when_action(OrganizerAction::LoadTicketTypes(EventId::new("e1")))
            .when_action(OrganizerAction::TicketTypeSaved(Resource::Error(
                "Failed to save ticket type".to_string(),
            )))
            .then_state(|state| {
                assert_eq!(state.ticket_types_event, Some(EventId::new("e1")));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn deleted_ticket_type_reloads_open_list() {
        let (_, env) = test_support::environment();

        ReducerTest::new(OrganizerReducer::new())
            .with_env(env)
            .given_state(OrganizerState::default())
            .when_action(OrganizerAction::LoadTicketTypes(EventId::new("e1")))
            .when_action(OrganizerAction::TicketTypeDeleted(Resource::Success(
                Acknowledgement::default(),
            )))
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, TICKET_TYPES);
            })
            .run();
    }
}
