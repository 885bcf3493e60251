use super::{PaymentId, TicketId, TicketTypeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the attendee pays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Debit or credit card
    Card,
    /// Mobile money wallet
    MobileWallet,
    /// Bank transfer
    BankTransfer,
    /// Method this client does not know
    #[default]
    #[serde(other)]
    Unknown,
}

/// Settlement state of a payment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created, provider not contacted yet
    Pending,
    /// Provider is settling
    Processing,
    /// Money captured, tickets issued
    Completed,
    /// Provider declined
    Failed,
    /// Attendee abandoned the payment
    Cancelled,
    /// Money returned
    Refunded,
    /// Status this client does not know
    #[default]
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Whether settlement is over: completed, failed or cancelled
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// A payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Identifier
    pub id: PaymentId,
    /// Amount charged
    pub amount: f64,
    /// ISO currency code
    #[serde(default)]
    pub currency: String,
    /// Method
    #[serde(default)]
    pub method: PaymentMethod,
    /// Settlement state
    #[serde(default)]
    pub status: PaymentStatus,
    /// Tickets issued for this payment
    #[serde(default)]
    pub ticket_ids: Vec<TicketId>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
    /// Reference at the payment provider
    pub provider_reference: Option<String>,
}

/// Body for starting a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    /// Tier to buy
    pub ticket_type_id: TicketTypeId,
    /// How many
    pub quantity: u32,
    /// Method
    pub method: PaymentMethod,
    /// Where the provider sends the attendee back to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

/// A started payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiation {
    /// The payment record
    pub payment: Payment,
    /// Provider page to complete the payment on
    pub redirect_url: Option<String>,
}
