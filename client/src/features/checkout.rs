//! Buying tickets
//!
//! Free and pay-at-door tickets go through `Purchase`. Paid tickets go
//! through `InitiatePayment`: when the provider needs the attendee to leave
//! the app the initiation carries a redirect URL, and the host sends
//! `ConfirmPayment` once the attendee comes back. Without a redirect the
//! confirmation poll starts straight away.

use super::{fetch, perform};
use crate::environment::ClientEnvironment;
use gatepass_api::types::{
    InitiatePaymentRequest, Payment, PaymentId, PaymentInitiation, PurchaseRequest, Ticket,
};
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};
use gatepass_core::reducer::Reducer;
use gatepass_runtime::{ScopedStore, Store};
use smallvec::{SmallVec, smallvec};

/// Slot of the confirmation poll
pub const CONFIRMATION: EffectId = EffectId::new("checkout.confirmation");

/// Checkout progress
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckoutState {
    /// Direct purchase result
    pub purchase: Option<Resource<Vec<Ticket>>>,
    /// Payment initiation result
    pub initiation: Option<Resource<PaymentInitiation>>,
    /// Settled payment, once the poll finishes
    pub confirmation: Option<Resource<Payment>>,
}

impl CheckoutState {
    /// Where to send the attendee to pay, once initiation succeeded
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.initiation
            .as_ref()
            .and_then(Resource::data)
            .and_then(|i| i.redirect_url.as_deref())
    }
}

/// Checkout actions
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutAction {
    /// Buy tickets without a payment step
    Purchase(PurchaseRequest),
    /// Start a paid checkout
    InitiatePayment(InitiatePaymentRequest),
    /// The attendee is back from the provider; poll until the payment settles
    ConfirmPayment(PaymentId),
    /// Stop waiting for confirmation
    AbandonConfirmation,
    /// Purchase state changed
    PurchaseUpdated(Resource<Vec<Ticket>>),
    /// Initiation state changed
    InitiationUpdated(Resource<PaymentInitiation>),
    /// Confirmation state changed
    ConfirmationUpdated(Resource<Payment>),
}

/// Reducer for checkout
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckoutReducer;

impl CheckoutReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn confirm(id: PaymentId, env: &ClientEnvironment) -> Effect<CheckoutAction> {
    fetch(
        CONFIRMATION,
        env.payments.await_confirmation(id),
        CheckoutAction::ConfirmationUpdated,
    )
}

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut CheckoutState,
        action: CheckoutAction,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<CheckoutAction>; 4]> {
        match action {
            CheckoutAction::Purchase(request) => smallvec![perform(
                env.tickets.purchase(request),
                CheckoutAction::PurchaseUpdated
            )],
            CheckoutAction::InitiatePayment(request) => {
                state.confirmation = None;
                smallvec![
                    Effect::Cancel(CONFIRMATION),
                    perform(
                        env.payments.initiate(request),
                        CheckoutAction::InitiationUpdated
                    ),
                ]
            },
            CheckoutAction::ConfirmPayment(id) => smallvec![confirm(id, env)],
            CheckoutAction::AbandonConfirmation => {
                state.confirmation = None;
                smallvec![Effect::Cancel(CONFIRMATION)]
            },
            CheckoutAction::PurchaseUpdated(resource) => {
                state.purchase = Some(resource);
                smallvec![Effect::None]
            },
            CheckoutAction::InitiationUpdated(resource) => {
                let settle_now = resource
                    .data()
                    .filter(|i| i.redirect_url.is_none())
                    .map(|i| i.payment.id.clone());
                state.initiation = Some(resource);

                match settle_now {
                    Some(id) => smallvec![confirm(id, env)],
                    None => smallvec![Effect::None],
                }
            },
            CheckoutAction::ConfirmationUpdated(resource) => {
                if let Resource::Success(payment) = &resource {
                    tracing::info!(payment_id = %payment.id, "Payment confirmed");
                }
                state.confirmation = Some(resource);
                smallvec![Effect::None]
            },
        }
    }
}

/// Store for checkout
pub type CheckoutStore = Store<CheckoutState, CheckoutAction, ClientEnvironment, CheckoutReducer>;

/// Create a checkout store owned by the caller
#[must_use]
pub fn scoped(
    env: ClientEnvironment,
) -> ScopedStore<CheckoutState, CheckoutAction, ClientEnvironment, CheckoutReducer> {
    ScopedStore::new(Store::new(CheckoutState::default(), CheckoutReducer::new(), env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support;
    use gatepass_api::types::{PaymentMethod, PaymentStatus};
    use gatepass_testing::{ReducerTest, assertions};

    fn initiation(redirect: Option<&str>) -> PaymentInitiation {
        PaymentInitiation {
            payment: Payment {
                id: PaymentId::new("p1"),
                amount: 40.0,
                currency: "USD".to_string(),
                method: PaymentMethod::default(),
                status: PaymentStatus::Pending,
                ticket_ids: Vec::new(),
                created_at: None,
                provider_reference: None,
            },
            redirect_url: redirect.map(str::to_string),
        }
    }

    #[test]
    fn redirect_waits_for_the_attendee() {
        let (_, env) = test_support::environment();

        ReducerTest::new(CheckoutReducer::new())
            .with_env(env)
            .given_state(CheckoutState::default())
            .when_action(CheckoutAction::InitiationUpdated(Resource::Success(
                initiation(Some("https://pay.example.com/p1")),
            )))
            .then_state(|state| {
                assert_eq!(state.redirect_url(), Some("https://pay.example.com/p1"));
                assert!(state.confirmation.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn no_redirect_starts_confirming() {
        let (_, env) = test_support::environment();

        ReducerTest::new(CheckoutReducer::new())
            .with_env(env)
            .given_state(CheckoutState::default())
            .when_action(CheckoutAction::InitiationUpdated(Resource::Success(
                initiation(None),
            )))
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, CONFIRMATION);
            })
            .run();
    }

    #[test]
    fn initiation_drops_the_old_poll_but_is_not_keyed_itself() {
        let (_, env) = test_support::environment();

        ReducerTest::new(CheckoutReducer::new())
            .with_env(env)
            .given_state(CheckoutState::default())
            .when_action(CheckoutAction::InitiatePayment(InitiatePaymentRequest {
                ticket_type_id: gatepass_api::types::TicketTypeId::new("tt1"),
                quantity: 1,
                method: PaymentMethod::default(),
                return_url: None,
            }))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 2);
                assertions::assert_cancels(effects, CONFIRMATION);
                assertions::assert_has_stream_effect(effects);
                assert!(effects.iter().all(|e| assertions::cancellable_ids(e).is_empty()));
            })
            .run();
    }

    #[test]
    fn abandoning_cancels_the_poll() {
        let (_, env) = test_support::environment();

        ReducerTest::new(CheckoutReducer::new())
            .with_env(env)
            .given_state(CheckoutState::default())
            .when_action(CheckoutAction::ConfirmPayment(PaymentId::new("p1")))
            .when_action(CheckoutAction::AbandonConfirmation)
            .then_state(|state| assert!(state.confirmation.is_none()))
            .then_effects(|effects| assertions::assert_cancels(effects, CONFIRMATION))
            .run();
    }
}
