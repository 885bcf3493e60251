//! Wire DTOs mirrored from the backend's JSON
//!
//! Keys are camelCase, statuses SCREAMING_SNAKE_CASE. Status enums carry an
//! `Unknown` variant so a status added server-side does not break decoding.

use serde::{Deserialize, Serialize};
use std::fmt;

mod analytics;
mod catalog;
mod event;
mod notification;
mod organizer;
mod payment;
mod ticket;
mod user;

pub use analytics::{DashboardSummary, EventSales, RevenuePoint, TicketTypeSales};
pub use catalog::{Category, Location};
pub use event::{Event, EventDraft, EventFilter, EventImage, EventStatus, ImageUpload};
pub use notification::{Notification, UnreadCount};
pub use organizer::Organizer;
pub use payment::{
    InitiatePaymentRequest, Payment, PaymentInitiation, PaymentMethod, PaymentStatus,
};
pub use ticket::{
    CheckInRequest, CheckInResult, PurchaseRequest, Ticket, TicketStatus, TicketType,
    TicketTypeDraft,
};
pub use user::{AuthSession, LoginRequest, ProfileUpdate, RegisterRequest, User, UserRole};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a server-issued identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The identifier as sent on the wire
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Event identifier
    EventId
);
string_id!(
    /// Ticket identifier
    TicketId
);
string_id!(
    /// Ticket type identifier
    TicketTypeId
);
string_id!(
    /// Payment identifier
    PaymentId
);
string_id!(
    /// User identifier
    UserId
);
string_id!(
    /// Category identifier
    CategoryId
);
string_id!(
    /// Location identifier
    LocationId
);
string_id!(
    /// Notification identifier
    NotificationId
);
string_id!(
    /// Organizer identifier
    OrganizerId
);
