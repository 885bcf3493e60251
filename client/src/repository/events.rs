//! Events: listing, detail and organizer-side management

use super::{ResourceStream, fetch};
use crate::messages;
use gatepass_api::ApiClient;
use gatepass_api::Acknowledgement;
use gatepass_api::types::{Event, EventDraft, EventFilter, EventId, EventImage, ImageUpload};

/// Event catalogue and organizer event management
#[derive(Clone, Debug)]
pub struct EventRepository {
    api: ApiClient,
}

impl EventRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Events matching `filter`
    #[must_use]
    pub fn events(&self, filter: EventFilter) -> ResourceStream<Vec<Event>> {
        let api = self.api.clone();
        fetch("list_events", messages::EVENTS_FAILED, async move {
            api.list_events(&filter).await
        })
    }

    /// Featured carousel
    #[must_use]
    pub fn featured_events(&self) -> ResourceStream<Vec<Event>> {
        let api = self.api.clone();
        fetch("featured_events", messages::FEATURED_FAILED, async move {
            api.featured_events().await
        })
    }

    /// One event
    #[must_use]
    pub fn event(&self, id: EventId) -> ResourceStream<Event> {
        let api = self.api.clone();
        fetch("get_event", messages::EVENT_FAILED, async move {
            api.get_event(&id).await
        })
    }

    /// Create an event
    #[must_use]
    pub fn create_event(&self, draft: EventDraft) -> ResourceStream<Event> {
        let api = self.api.clone();
        fetch("create_event", messages::EVENT_SAVE_FAILED, async move {
            api.create_event(&draft).await
        })
    }

    /// Replace an event's editable fields
    #[must_use]
    pub fn update_event(&self, id: EventId, draft: EventDraft) -> ResourceStream<Event> {
        let api = self.api.clone();
        fetch("update_event", messages::EVENT_SAVE_FAILED, async move {
            api.update_event(&id, &draft).await
        })
    }

    /// Delete an event; success carries the server's confirmation, if any
    #[must_use]
    pub fn delete_event(&self, id: EventId) -> ResourceStream<Acknowledgement> {
        let api = self.api.clone();
        fetch("delete_event", messages::EVENT_DELETE_FAILED, async move {
            api.delete_event(&id).await
        })
    }

    /// Upload an image, optionally as the cover
    #[must_use]
    pub fn upload_event_image(
        &self,
        id: EventId,
        image: ImageUpload,
        is_primary: bool,
    ) -> ResourceStream<EventImage> {
        let api = self.api.clone();
        fetch("upload_event_image", messages::IMAGE_UPLOAD_FAILED, async move {
            api.upload_event_image(&id, image, is_primary).await
        })
    }

    /// Put an event on or take it off the featured carousel
    #[must_use]
    pub fn set_featured(&self, id: EventId, featured: bool) -> ResourceStream<Event> {
        let api = self.api.clone();
        fetch("set_event_featured", messages::FEATURE_TOGGLE_FAILED, async move {
            api.set_event_featured(&id, featured).await
        })
    }
}
