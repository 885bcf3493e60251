//! Ticket types and tickets

use super::{ResourceStream, fetch};
use crate::checkin::CheckInCode;
use crate::messages;
use gatepass_api::types::{
    CheckInResult, EventId, PurchaseRequest, Ticket, TicketId, TicketType, TicketTypeDraft,
    TicketTypeId,
};
use gatepass_api::{Acknowledgement, ApiClient};

/// Ticket types offered for an event
#[derive(Clone, Debug)]
pub struct TicketTypeRepository {
    api: ApiClient,
}

impl TicketTypeRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ticket types of one event
    #[must_use]
    pub fn ticket_types(&self, event_id: EventId) -> ResourceStream<Vec<TicketType>> {
        let api = self.api.clone();
        fetch("ticket_types", messages::TICKET_TYPES_FAILED, async move {
            api.ticket_types_for_event(&event_id).await
        })
    }

    /// Add a ticket type
    #[must_use]
    pub fn create(&self, draft: TicketTypeDraft) -> ResourceStream<TicketType> {
        let api = self.api.clone();
        fetch("create_ticket_type", messages::TICKET_TYPE_SAVE_FAILED, async move {
            api.create_ticket_type(&draft).await
        })
    }

    /// Replace a ticket type
    #[must_use]
    pub fn update(&self, id: TicketTypeId, draft: TicketTypeDraft) -> ResourceStream<TicketType> {
        let api = self.api.clone();
        fetch("update_ticket_type", messages::TICKET_TYPE_SAVE_FAILED, async move {
            api.update_ticket_type(&id, &draft).await
        })
    }

    /// Remove a ticket type
    #[must_use]
    pub fn delete(&self, id: TicketTypeId) -> ResourceStream<Acknowledgement> {
        let api = self.api.clone();
        fetch("delete_ticket_type", messages::TICKET_TYPE_DELETE_FAILED, async move {
            api.delete_ticket_type(&id).await
        })
    }
}

/// Purchased tickets and door check-in
#[derive(Clone, Debug)]
pub struct TicketRepository {
    api: ApiClient,
}

impl TicketRepository {
    /// Create a repository over `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Tickets owned by the signed-in user
    #[must_use]
    pub fn my_tickets(&self) -> ResourceStream<Vec<Ticket>> {
        let api = self.api.clone();
        fetch("my_tickets", messages::TICKETS_FAILED, async move {
            api.my_tickets().await
        })
    }

    /// One ticket
    #[must_use]
    pub fn ticket(&self, id: TicketId) -> ResourceStream<Ticket> {
        let api = self.api.clone();
        fetch("get_ticket", messages::TICKET_FAILED, async move {
            api.get_ticket(&id).await
        })
    }

    /// Buy tickets directly, without a payment redirect
    #[must_use]
    pub fn purchase(&self, request: PurchaseRequest) -> ResourceStream<Vec<Ticket>> {
        let api = self.api.clone();
        fetch("purchase_tickets", messages::PURCHASE_FAILED, async move {
            api.purchase_tickets(&request).await
        })
    }

    /// Check in the ticket a scanned code refers to
    ///
    /// Only well-formed codes reach this point; parsing happens before.
    #[must_use]
    pub fn check_in(&self, code: CheckInCode) -> ResourceStream<CheckInResult> {
        let api = self.api.clone();
        fetch("check_in", messages::CHECK_IN_FAILED, async move {
            api.check_in(&code.to_request()).await
        })
    }

    /// Attendee list of an event
    #[must_use]
    pub fn event_tickets(&self, event_id: EventId) -> ResourceStream<Vec<Ticket>> {
        let api = self.api.clone();
        fetch("event_tickets", messages::EVENT_TICKETS_FAILED, async move {
            api.event_tickets(&event_id).await
        })
    }
}
