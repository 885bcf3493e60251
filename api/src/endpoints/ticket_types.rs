use super::segment;
use crate::{
    ApiClient, ApiError,
    envelope::Acknowledgement,
    transport::ApiRequest,
    types::{EventId, TicketType, TicketTypeDraft, TicketTypeId},
};

impl ApiClient {
    /// `GET /ticket-types/event/{event_id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn ticket_types_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<TicketType>, ApiError> {
        let event_id = segment(event_id.as_str());
        self.call(ApiRequest::get(format!("/ticket-types/event/{event_id}")))
            .await
    }

    /// `POST /ticket-types`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn create_ticket_type(
        &self,
        draft: &TicketTypeDraft,
    ) -> Result<TicketType, ApiError> {
        self.call(ApiRequest::post("/ticket-types").json(draft)?).await
    }

    /// `PUT /ticket-types/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn update_ticket_type(
        &self,
        id: &TicketTypeId,
        draft: &TicketTypeDraft,
    ) -> Result<TicketType, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::put(format!("/ticket-types/{id}")).json(draft)?)
            .await
    }

    /// `DELETE /ticket-types/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::acknowledge`].
    pub async fn delete_ticket_type(&self, id: &TicketTypeId) -> Result<Acknowledgement, ApiError> {
        let id = segment(id.as_str());
        self.acknowledge(ApiRequest::delete(format!("/ticket-types/{id}")))
            .await
    }
}
