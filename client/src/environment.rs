//! Dependencies injected into every feature reducer

use crate::repository::{
    AnalyticsRepository, CatalogRepository, EventRepository, NotificationRepository,
    OrganizerRepository, PaymentRepository, TicketRepository, TicketTypeRepository,
    UserRepository,
};
use gatepass_api::ApiClient;
use gatepass_core::environment::{Clock, SystemClock};
use gatepass_runtime::RetryPolicy;
use std::sync::Arc;

/// Repositories plus a clock, shared by all features
///
/// All repositories wrap the same [`ApiClient`], so they share one
/// transport and one session.
#[derive(Clone)]
pub struct ClientEnvironment {
    /// Event catalogue and management
    pub events: EventRepository,
    /// Ticket types
    pub ticket_types: TicketTypeRepository,
    /// Tickets and check-in
    pub tickets: TicketRepository,
    /// Categories and locations
    pub catalog: CatalogRepository,
    /// Notifications
    pub notifications: NotificationRepository,
    /// Organizer profiles
    pub organizers: OrganizerRepository,
    /// Payments
    pub payments: PaymentRepository,
    /// Authentication and profile
    pub users: UserRepository,
    /// Organizer analytics
    pub analytics: AnalyticsRepository,
    /// Time source
    pub clock: Arc<dyn Clock>,
}

impl ClientEnvironment {
    /// Environment on the system clock
    #[must_use]
    pub fn new(api: ApiClient, payment_poll: RetryPolicy) -> Self {
        Self::with_clock(api, payment_poll, Arc::new(SystemClock))
    }

    /// Environment with an explicit clock
    #[must_use]
    pub fn with_clock(api: ApiClient, payment_poll: RetryPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            events: EventRepository::new(api.clone()),
            ticket_types: TicketTypeRepository::new(api.clone()),
            tickets: TicketRepository::new(api.clone()),
            catalog: CatalogRepository::new(api.clone()),
            notifications: NotificationRepository::new(api.clone()),
            organizers: OrganizerRepository::new(api.clone()),
            payments: PaymentRepository::new(api.clone(), payment_poll),
            analytics: AnalyticsRepository::new(api.clone()),
            users: UserRepository::new(api),
            clock,
        }
    }
}

impl std::fmt::Debug for ClientEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientEnvironment")
            .field("api", &self.users)
            .field("payment_poll", self.payments.poll_policy())
            .finish_non_exhaustive()
    }
}
