//! Gatepass command-line client.
//!
//! Drives the client features against a live backend and logs what each
//! screen would show.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use gatepass_api::types::{CategoryId, EventFilter, EventId, PaymentId};
use gatepass_api::{ApiClient, InMemorySession, ReqwestTransport};
use gatepass_client::features::{
    browse, check_in, checkout, dashboard, event_detail, notifications,
};
use gatepass_client::{ClientEnvironment, Config, telemetry};
use gatepass_core::Resource;
use gatepass_runtime::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gatepass", version, about = "Gatepass event-ticketing client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events
    Events {
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
        /// Only events in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one event with its ticket types
    Event {
        /// Event id
        id: String,
    },
    /// Check in the ticket behind a scanned QR payload
    CheckIn {
        /// Raw QR payload, `TICKET:<ticket>:<number>:<event>:<user>`
        code: String,
    },
    /// Wait for a redirect payment to settle
    ConfirmPayment {
        /// Payment id returned by initiation
        payment_id: String,
    },
    /// Organizer dashboard totals and revenue
    Dashboard {
        /// Days of revenue to chart
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Inbox and unread count
    Notifications,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing("gatepass=info,gatepass_client=info");

    let cli = Cli::parse();
    let config = Config::from_env();
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let transport = ReqwestTransport::new(
        &config.api.base_url,
        config.request_timeout(),
        config.connect_timeout(),
    )
    .context("Failed to build HTTP transport")?;

    let session = match &config.token {
        Some(token) => InMemorySession::with_token(token.clone()),
        None => InMemorySession::new(),
    };
    let api = ApiClient::new(Arc::new(transport), Arc::new(session));
    let env = ClientEnvironment::new(api, config.payment_poll_policy());

    // One request plus slack; polling gets its whole schedule on top.
    let request_budget = config
        .request_timeout()
        .saturating_add(Duration::from_secs(5));

    match cli.command {
        Command::Events { search, category } => {
            let store = browse::scoped(env);
            let filter = EventFilter {
                search,
                category_id: category.map(CategoryId::new),
                ..EventFilter::default()
            };
            store.send(browse::BrowseAction::Search(filter)).await?;

            let state = store
                .wait_for_state(|s| settled(s.events.as_ref()), request_budget)
                .await?;
            for event in terminal(state.events)? {
                info!(id = %event.id, title = %event.title, start = %event.start_time, "Event");
            }
        },
        Command::Event { id } => {
            let store = event_detail::scoped(env);
            store
                .send(event_detail::EventDetailAction::Open(EventId::new(id)))
                .await?;

            let state = store
                .wait_for_state(
                    |s| settled(s.event.as_ref()) && settled(s.ticket_types.as_ref()),
                    request_budget,
                )
                .await?;
            let available = state.available_ticket_types().len();
            let event = terminal(state.event)?;
            info!(id = %event.id, title = %event.title, available, "Event");
            for ticket_type in terminal(state.ticket_types)? {
                info!(
                    name = %ticket_type.name,
                    price = ticket_type.price,
                    left = ticket_type.available_quantity,
                    "Ticket type"
                );
            }
        },
        Command::CheckIn { code } => {
            let store = check_in::scoped(env);
            store.send(check_in::CheckInAction::Scan(code)).await?;

            let state = store
                .wait_for_state(|s| settled(s.result.as_ref()), request_budget)
                .await?;
            let result = terminal(state.result)?;
            info!(
                message = result.message.as_deref().unwrap_or("Checked in"),
                "Check-in accepted"
            );
        },
        Command::ConfirmPayment { payment_id } => {
            let budget = poll_budget(&config.payment_poll_policy(), request_budget);

            let store = checkout::scoped(env);
            store
                .send(checkout::CheckoutAction::ConfirmPayment(PaymentId::new(payment_id)))
                .await?;

            let state = store
                .wait_for_state(|s| settled(s.confirmation.as_ref()), budget)
                .await?;
            let payment = terminal(state.confirmation)?;
            info!(
                id = %payment.id,
                amount = payment.amount,
                currency = %payment.currency,
                "Payment confirmed"
            );
        },
        Command::Dashboard { days } => {
            let store = dashboard::scoped(env);
            store.send(dashboard::DashboardAction::LoadSummary).await?;
            store
                .send(dashboard::DashboardAction::LoadRevenue { days })
                .await?;

            let state = store
                .wait_for_state(
                    |s| settled(s.summary.as_ref()) && settled(s.revenue.as_ref()),
                    request_budget,
                )
                .await?;
            let total = state.revenue_total().unwrap_or_default();
            let summary = terminal(state.summary)?;
            info!(
                events = summary.total_events,
                sold = summary.total_tickets_sold,
                revenue = summary.total_revenue,
                check_ins = summary.total_check_ins,
                "Dashboard"
            );
            info!(days, revenue = total, "Revenue");
        },
        Command::Notifications => {
            let store = notifications::scoped(env);
            store
                .send(notifications::NotificationsAction::Load)
                .await?;

            let state = store
                .wait_for_state(
                    |s| settled(s.notifications.as_ref()) && settled(s.unread_count.as_ref()),
                    request_budget,
                )
                .await?;
            let unread = terminal(state.unread_count)?;
            info!(unread = unread.count, "Inbox");
            for notification in terminal(state.notifications)? {
                info!(title = %notification.title, read = notification.read, "Notification");
            }
        },
    }

    Ok(())
}

/// Every backoff wait plus one request budget per attempt, saturating
fn poll_budget(policy: &RetryPolicy, request_budget: Duration) -> Duration {
    let schedule = (1..policy.max_attempts())
        .map(|attempt| policy.delay_for_attempt(attempt))
        .fold(Duration::ZERO, Duration::saturating_add);
    schedule.saturating_add(request_budget.saturating_mul(policy.max_attempts().max(1)))
}

fn settled<T>(slot: Option<&Resource<T>>) -> bool {
    slot.is_some_and(Resource::is_terminal)
}

fn terminal<T>(slot: Option<Resource<T>>) -> Result<T> {
    match slot {
        Some(Resource::Success(value)) => Ok(value),
        Some(Resource::Error(message)) => bail!(message),
        Some(Resource::Loading) | None => bail!("No result yet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_budget_covers_waits_and_requests() {
        let policy = RetryPolicy::builder()
            .max_attempts(3)
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(10))
            .build();

        // Linear waits of 1 s and 2 s, then three 10 s requests
        assert_eq!(
            poll_budget(&policy, Duration::from_secs(10)),
            Duration::from_secs(33)
        );
    }

    #[test]
    fn huge_settings_saturate_instead_of_overflowing() {
        let policy = RetryPolicy::builder()
            .max_attempts(1_000)
            .initial_delay(Duration::MAX)
            .max_delay(Duration::MAX)
            .build();

        assert_eq!(poll_budget(&policy, Duration::MAX), Duration::MAX);
    }
}
