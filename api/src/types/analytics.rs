use super::{EventId, TicketTypeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Organizer dashboard totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    /// Events created
    pub total_events: u64,
    /// Tickets sold across all events
    pub total_tickets_sold: u64,
    /// Gross revenue
    pub total_revenue: f64,
    /// Attendees checked in
    pub total_check_ins: u64,
    /// Events still to come
    pub upcoming_events: u64,
}

/// Sales of one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSales {
    /// Event
    pub event_id: EventId,
    /// Event title
    pub event_title: Option<String>,
    /// Tickets sold
    #[serde(default)]
    pub tickets_sold: u64,
    /// Total tickets on offer
    #[serde(default)]
    pub capacity: u64,
    /// Gross revenue
    #[serde(default)]
    pub revenue: f64,
    /// Share of sold tickets checked in, `0.0..=1.0`
    #[serde(default)]
    pub check_in_rate: f64,
}

impl EventSales {
    /// Share of capacity sold, `0.0` when there is no capacity
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // ticket counts are far below 2^52
    pub fn sell_through(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.tickets_sold as f64 / self.capacity as f64
        }
    }
}

/// Revenue for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Day
    pub date: NaiveDate,
    /// Gross revenue
    #[serde(default)]
    pub revenue: f64,
    /// Tickets sold that day
    #[serde(default)]
    pub tickets_sold: u64,
}

/// Sales of one ticket type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeSales {
    /// Ticket type
    pub ticket_type_id: TicketTypeId,
    /// Tier name
    pub name: String,
    /// Tickets sold
    #[serde(default)]
    pub sold: u64,
    /// Gross revenue
    #[serde(default)]
    pub revenue: f64,
}
