//! Organizer dashboard figures

use super::{ResourceStream, fetch};
use crate::messages;
use chrono::NaiveDate;
use gatepass_api::ApiClient;
use gatepass_api::types::{DashboardSummary, EventId, EventSales, RevenuePoint, TicketTypeSales};

/// Sales and attendance analytics for the signed-in organizer
#[derive(Clone, Debug)]
pub struct AnalyticsRepository {
    api: ApiClient,
}

impl AnalyticsRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Headline totals
    #[must_use]
    pub fn dashboard(&self) -> ResourceStream<DashboardSummary> {
        let api = self.api.clone();
        fetch("dashboard_summary", messages::DASHBOARD_FAILED, async move {
            api.dashboard_summary().await
        })
    }

    /// Sales of one event
    #[must_use]
    pub fn event_sales(&self, event_id: EventId) -> ResourceStream<EventSales> {
        let api = self.api.clone();
        fetch("event_sales", messages::EVENT_SALES_FAILED, async move {
            api.event_sales(&event_id).await
        })
    }

    /// Daily revenue between two dates, inclusive
    ///
    /// A range that ends before it starts is an error without a request.
    #[must_use]
    pub fn revenue(&self, from: NaiveDate, to: NaiveDate) -> ResourceStream<Vec<RevenuePoint>> {
        let api = self.api.clone();
        fetch("revenue", messages::REVENUE_FAILED, async move {
            api.revenue(from, to).await
        })
    }

    /// Per-ticket-type breakdown of one event
    #[must_use]
    pub fn ticket_type_sales(&self, event_id: EventId) -> ResourceStream<Vec<TicketTypeSales>> {
        let api = self.api.clone();
        fetch("ticket_type_sales", messages::TICKET_TYPE_SALES_FAILED, async move {
            api.ticket_type_sales(&event_id).await
        })
    }
}
