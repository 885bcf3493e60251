use super::segment;
use crate::{
    ApiClient, ApiError,
    transport::ApiRequest,
    types::{Event, Organizer, OrganizerId},
};

impl ApiClient {
    /// `GET /organizers/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get_organizer(&self, id: &OrganizerId) -> Result<Organizer, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::get(format!("/organizers/{id}"))).await
    }

    /// `GET /organizers/{id}/events`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn organizer_events(&self, id: &OrganizerId) -> Result<Vec<Event>, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::get(format!("/organizers/{id}/events")))
            .await
    }
}
