use super::{EventId, TicketId, TicketTypeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of an issued ticket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Valid for entry
    Active,
    /// Already checked in
    Used,
    /// Voided
    Cancelled,
    /// Money returned
    Refunded,
    /// Status this client does not know
    #[default]
    #[serde(other)]
    Unknown,
}

/// A tier of tickets for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    /// Identifier
    pub id: TicketTypeId,
    /// Event the tier belongs to
    pub event_id: EventId,
    /// Tier name, e.g. "VIP"
    pub name: String,
    /// Perks and conditions
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
    /// Total capacity
    #[serde(default)]
    pub quantity: u32,
    /// Still purchasable
    #[serde(default)]
    pub available_quantity: u32,
    /// Sales open
    pub sale_start: Option<DateTime<Utc>>,
    /// Sales close
    pub sale_end: Option<DateTime<Utc>>,
}

impl TicketType {
    /// Whether no tickets are left
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available_quantity == 0
    }
}

/// Body for creating or updating a ticket type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeDraft {
    /// Event the tier belongs to
    pub event_id: EventId,
    /// Tier name
    pub name: String,
    /// Perks and conditions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
    /// Capacity
    pub quantity: u32,
    /// Sales open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_start: Option<DateTime<Utc>>,
    /// Sales close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_end: Option<DateTime<Utc>>,
}

/// An issued ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Identifier
    pub id: TicketId,
    /// Human-readable number printed on the ticket
    pub ticket_number: String,
    /// Event
    pub event_id: EventId,
    /// Tier
    pub ticket_type_id: Option<TicketTypeId>,
    /// Holder
    pub user_id: UserId,
    /// Lifecycle state
    #[serde(default)]
    pub status: TicketStatus,
    /// Payload encoded in the ticket's QR image
    pub qr_code: Option<String>,
    /// Purchase time
    pub purchased_at: Option<DateTime<Utc>>,
    /// Check-in time
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// Body for buying tickets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    /// Tier to buy
    pub ticket_type_id: TicketTypeId,
    /// How many
    pub quantity: u32,
}

/// Body for checking a ticket in, built from a scanned QR payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    /// Ticket
    pub ticket_id: TicketId,
    /// Printed ticket number
    pub ticket_number: String,
    /// Event being checked into
    pub event_id: EventId,
    /// Ticket holder
    pub user_id: UserId,
}

/// Outcome of a successful check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResult {
    /// The ticket after check-in
    pub ticket: Option<Ticket>,
    /// Message for the gate staff
    pub message: Option<String>,
    /// When the ticket was checked in
    pub checked_in_at: Option<DateTime<Utc>>,
}
