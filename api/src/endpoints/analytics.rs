use super::segment;
use crate::{
    ApiClient, ApiError,
    transport::ApiRequest,
    types::{DashboardSummary, EventId, EventSales, RevenuePoint, TicketTypeSales},
};
use chrono::NaiveDate;

impl ApiClient {
    /// `GET /analytics/organizer/dashboard`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.call(ApiRequest::get("/analytics/organizer/dashboard"))
            .await
    }

    /// `GET /analytics/events/{id}/sales`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn event_sales(&self, event_id: &EventId) -> Result<EventSales, ApiError> {
        let event_id = segment(event_id.as_str());
        self.call(ApiRequest::get(format!("/analytics/events/{event_id}/sales")))
            .await
    }

    /// `GET /analytics/organizer/revenue?from=&to=` with ISO dates
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when `from` is after `to`,
    /// otherwise see [`ApiClient::call`].
    pub async fn revenue(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RevenuePoint>, ApiError> {
        if from > to {
            return Err(ApiError::InvalidRequest(format!(
                "Revenue range starts ({from}) after it ends ({to})"
            )));
        }

        self.call(
            ApiRequest::get("/analytics/organizer/revenue")
                .query("from", from)
                .query("to", to),
        )
        .await
    }

    /// `GET /analytics/events/{id}/ticket-types`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn ticket_type_sales(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<TicketTypeSales>, ApiError> {
        let event_id = segment(event_id.as_str());
        self.call(ApiRequest::get(format!(
            "/analytics/events/{event_id}/ticket-types"
        )))
        .await
    }
}
