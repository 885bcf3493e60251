//! Organizer dashboard

use super::fetch;
use crate::environment::ClientEnvironment;
use chrono::{Days, NaiveDate};
use gatepass_api::types::{DashboardSummary, EventId, EventSales, RevenuePoint, TicketTypeSales};
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the headline totals
pub const SUMMARY: EffectId = EffectId::new("dashboard.summary");
/// Slot of the selected event's sales
pub const EVENT_SALES: EffectId = EffectId::new("dashboard.event_sales");
/// Slot of the selected event's ticket type breakdown
pub const TICKET_TYPE_SALES: EffectId = EffectId::new("dashboard.ticket_type_sales");
/// Slot of the revenue chart
pub const REVENUE: EffectId = EffectId::new("dashboard.revenue");

/// Dashboard screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    /// Headline totals
    pub summary: Option<Resource<DashboardSummary>>,
    /// Event drilled into
    pub selected_event: Option<EventId>,
    /// Sales of the selected event
    pub event_sales: Option<Resource<EventSales>>,
    /// Ticket type breakdown of the selected event
    pub ticket_type_sales: Option<Resource<Vec<TicketTypeSales>>>,
    /// Dates the revenue chart covers
    pub revenue_range: Option<(NaiveDate, NaiveDate)>,
    /// Revenue chart
    pub revenue: Option<Resource<Vec<RevenuePoint>>>,
}

impl DashboardState {
    /// Revenue across the chart's range
    #[must_use]
    pub fn revenue_total(&self) -> Option<f64> {
        self.revenue
            .as_ref()
            .and_then(Resource::data)
            .map(|points| points.iter().map(|p| p.revenue).sum())
    }
}

/// Dashboard actions
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardAction {
    /// Load the headline totals
    LoadSummary,
    /// Drill into one event
    SelectEvent(EventId),
    /// Chart the last `days` days, ending today
    LoadRevenue {
        /// Days covered, today included
        days: u32,
    },
    /// Chart an explicit range
    LoadRevenueRange {
        /// First day
        from: NaiveDate,
        /// Last day
        to: NaiveDate,
    },
    /// Totals state changed
    SummaryUpdated(Resource<DashboardSummary>),
    /// Event sales state changed
    EventSalesUpdated(Resource<EventSales>),
    /// Ticket type breakdown state changed
    TicketTypeSalesUpdated(Resource<Vec<TicketTypeSales>>),
    /// Revenue chart state changed
    RevenueUpdated(Resource<Vec<RevenuePoint>>),
}

/// Reducer for the dashboard
#[derive(Clone, Copy, Debug, Default)]
pub struct DashboardReducer;

impl DashboardReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn revenue(
    state: &mut DashboardState,
    from: NaiveDate,
    to: NaiveDate,
    env: &ClientEnvironment,
) -> SmallVec<[Effect<DashboardAction>; 4]> {
    state.revenue_range = Some((from, to));
    smallvec![fetch(
        REVENUE,
        env.analytics.revenue(from, to),
        DashboardAction::RevenueUpdated
    )]
}

impl Reducer for DashboardReducer {
    type State = DashboardState;
    type Action = DashboardAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut DashboardState,
        action: DashboardAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<DashboardAction>; 4]> {
        match action {
            DashboardAction::LoadSummary => smallvec![fetch(
                SUMMARY,
                env.analytics.dashboard(),
                DashboardAction::SummaryUpdated
            )],
            DashboardAction::SelectEvent(id) => {
                state.selected_event = Some(id.clone());
                state.event_sales = None;
                state.ticket_type_sales = None;
                smallvec![
                    fetch(
                        EVENT_SALES,
                        env.analytics.event_sales(id.clone()),
                        DashboardAction::EventSalesUpdated
                    ),
                    fetch(
                        TICKET_TYPE_SALES,
                        env.analytics.ticket_type_sales(id),
                        DashboardAction::TicketTypeSalesUpdated
                    ),
                ]
            },
            DashboardAction::LoadRevenue { days } => {
                let to = env.clock.now().date_naive();
                let from = to
                    .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
                    .unwrap_or(NaiveDate::MIN);
                revenue(state, from, to, env)
            },
            DashboardAction::LoadRevenueRange { from, to } => revenue(state, from, to, env),
            DashboardAction::SummaryUpdated(resource) => {
                state.summary = Some(resource);
                smallvec![Effect::None]
            },
            DashboardAction::EventSalesUpdated(resource) => {
                state.event_sales = Some(resource);
                smallvec![Effect::None]
            },
            DashboardAction::TicketTypeSalesUpdated(resource) => {
                state.ticket_type_sales = Some(resource);
                smallvec![Effect::None]
            },
            DashboardAction::RevenueUpdated(resource) => {
                state.revenue = Some(resource);
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for the dashboard
pub type DashboardStore =
    Store<DashboardState, DashboardAction, ClientEnvironment, DashboardReducer>;

/// Create a dashboard store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<DashboardState, DashboardAction, ClientEnvironment, DashboardReducer> {
    ScopedStore::new(Store::new(DashboardState::default(), DashboardReducer::new(), env))
}
