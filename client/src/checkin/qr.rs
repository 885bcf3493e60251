//! Ticket QR payloads
//!
//! A ticket's QR code encodes `TICKET:<ticketId>:<ticketNumber>:<eventId>:<userId>`.
//! The payload carries no signature; the server decides whether the ticket
//! is valid. Parsing only guards against codes that are not ticket codes at
//! all, so a bad scan fails on the device instead of at the server.

use gatepass_api::types::{CheckInRequest, EventId, TicketId, UserId};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Literal first field of every ticket code
pub const QR_PREFIX: &str = "TICKET";

const FIELD_COUNT: usize = 5;
const FIELD_NAMES: [&str; FIELD_COUNT] =
    ["prefix", "ticket id", "ticket number", "event id", "user id"];

/// Why a scanned payload is not a ticket code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// Nothing was scanned
    #[error("Scanned code is empty")]
    Empty,

    /// First field is not `TICKET`
    #[error("Not a ticket code")]
    WrongPrefix,

    /// Fewer than five fields
    #[error("Invalid ticket code: expected 5 fields, found {found}")]
    TooFewFields {
        /// Fields present
        found: usize,
    },

    /// More than five fields
    #[error("Invalid ticket code: expected 5 fields, found {found}")]
    TooManyFields {
        /// Fields present
        found: usize,
    },

    /// A field is blank
    #[error("Invalid ticket code: missing {field}")]
    EmptyField {
        /// Which field
        field: &'static str,
    },
}

/// A decoded ticket QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInCode {
    ticket_id: TicketId,
    ticket_number: String,
    event_id: EventId,
    user_id: UserId,
}

impl CheckInCode {
    /// Decode a scanned payload
    ///
    /// Surrounding whitespace is ignored. Everything else is strict: the
    /// prefix is case-sensitive and exactly five non-empty fields are
    /// required.
    ///
    /// # Errors
    ///
    /// Returns a [`QrError`] describing the first problem found.
    pub fn parse(raw: &str) -> Result<Self, QrError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(QrError::Empty);
        }

        let fields: Vec<&str> = raw.split(':').collect();
        if fields.first() != Some(&QR_PREFIX) {
            return Err(QrError::WrongPrefix);
        }

        match fields.len() {
            n if n < FIELD_COUNT => return Err(QrError::TooFewFields { found: n }),
            n if n > FIELD_COUNT => return Err(QrError::TooManyFields { found: n }),
            _ => {},
        }

        if let Some(index) = fields.iter().position(|f| f.trim().is_empty()) {
            return Err(QrError::EmptyField {
                field: FIELD_NAMES[index],
            });
        }

        Ok(Self {
            ticket_id: TicketId::new(fields[1]),
            ticket_number: fields[2].to_string(),
            event_id: EventId::new(fields[3]),
            user_id: UserId::new(fields[4]),
        })
    }

    /// Ticket being presented
    #[must_use]
    pub const fn ticket_id(&self) -> &TicketId {
        &self.ticket_id
    }

    /// Human-readable ticket number
    #[must_use]
    pub fn ticket_number(&self) -> &str {
        &self.ticket_number
    }

    /// Event the ticket admits to
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Ticket holder
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Body for `POST /tickets/check-in`
    #[must_use]
    pub fn to_request(&self) -> CheckInRequest {
        CheckInRequest {
            ticket_id: self.ticket_id.clone(),
            ticket_number: self.ticket_number.clone(),
            event_id: self.event_id.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

impl FromStr for CheckInCode {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CheckInCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{QR_PREFIX}:{}:{}:{}:{}",
            self.ticket_id, self.ticket_number, self.event_id, self.user_id
        )
    }
}
