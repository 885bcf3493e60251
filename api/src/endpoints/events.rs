use super::segment;
use crate::{
    ApiClient, ApiError,
    envelope::Acknowledgement,
    transport::{ApiRequest, MultipartForm},
    types::{Event, EventDraft, EventFilter, EventId, EventImage, ImageUpload},
};

impl ApiClient {
    /// `GET /events`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, ApiError> {
        self.call(ApiRequest::get("/events").queries(filter.to_query()))
            .await
    }

    /// `GET /events/featured`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn featured_events(&self) -> Result<Vec<Event>, ApiError> {
        self.call(ApiRequest::get("/events/featured")).await
    }

    /// `GET /events/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get_event(&self, id: &EventId) -> Result<Event, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::get(format!("/events/{id}"))).await
    }

    /// `POST /events`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        self.call(ApiRequest::post("/events").json(draft)?).await
    }

    /// `PUT /events/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn update_event(&self, id: &EventId, draft: &EventDraft) -> Result<Event, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::put(format!("/events/{id}")).json(draft)?)
            .await
    }

    /// `DELETE /events/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::acknowledge`].
    pub async fn delete_event(&self, id: &EventId) -> Result<Acknowledgement, ApiError> {
        let id = segment(id.as_str());
        self.acknowledge(ApiRequest::delete(format!("/events/{id}")))
            .await
    }

    /// `POST /events/{id}/images` as multipart: `image` file plus `isPrimary`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn upload_event_image(
        &self,
        id: &EventId,
        image: ImageUpload,
        is_primary: bool,
    ) -> Result<EventImage, ApiError> {
        let form = MultipartForm::new()
            .file("image", image.file_name, image.content_type, image.bytes)
            .text("isPrimary", is_primary.to_string());

        let id = segment(id.as_str());
        self.call(ApiRequest::post(format!("/events/{id}/images")).multipart(form))
            .await
    }

    /// `PATCH /events/{id}/featured?isFeatured=`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn set_event_featured(
        &self,
        id: &EventId,
        featured: bool,
    ) -> Result<Event, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::patch(format!("/events/{id}/featured")).query("isFeatured", featured))
            .await
    }
}
