use super::segment;
use crate::{
    ApiClient, ApiError,
    transport::ApiRequest,
    types::{CheckInRequest, CheckInResult, EventId, PurchaseRequest, Ticket, TicketId},
};

impl ApiClient {
    /// `GET /tickets/my-tickets`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn my_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.call(ApiRequest::get("/tickets/my-tickets")).await
    }

    /// `GET /tickets/{id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get_ticket(&self, id: &TicketId) -> Result<Ticket, ApiError> {
        let id = segment(id.as_str());
        self.call(ApiRequest::get(format!("/tickets/{id}"))).await
    }

    /// `GET /tickets/event/{event_id}`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn event_tickets(&self, event_id: &EventId) -> Result<Vec<Ticket>, ApiError> {
        let event_id = segment(event_id.as_str());
        self.call(ApiRequest::get(format!("/tickets/event/{event_id}")))
            .await
    }

    /// `POST /tickets/purchase`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn purchase_tickets(
        &self,
        request: &PurchaseRequest,
    ) -> Result<Vec<Ticket>, ApiError> {
        self.call(ApiRequest::post("/tickets/purchase").json(request)?)
            .await
    }

    /// `POST /tickets/check-in`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn check_in(&self, request: &CheckInRequest) -> Result<CheckInResult, ApiError> {
        self.call(ApiRequest::post("/tickets/check-in").json(request)?)
            .await
    }
}
