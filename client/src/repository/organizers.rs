use super::{ResourceStream, fetch};
use crate::messages;
use gatepass_api::ApiClient;
use gatepass_api::types::{Event, Organizer, OrganizerId};

/// Public organizer profiles
#[derive(Clone, Debug)]
pub struct OrganizerRepository {
    api: ApiClient,
}

impl OrganizerRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Organizer profile
    #[must_use]
    pub fn organizer(&self, id: OrganizerId) -> ResourceStream<Organizer> {
        let api = self.api.clone();
        fetch("get_organizer", messages::ORGANIZER_FAILED, async move {
            api.get_organizer(&id).await
        })
    }

    /// Events run by an organizer
    #[must_use]
    pub fn organizer_events(&self, id: OrganizerId) -> ResourceStream<Vec<Event>> {
        let api = self.api.clone();
        fetch("organizer_events", messages::ORGANIZER_EVENTS_FAILED, async move {
            api.organizer_events(&id).await
        })
    }
}
