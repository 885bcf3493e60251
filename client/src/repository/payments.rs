//! Payments and redirect confirmation

use super::{ResourceStream, fetch};
use crate::messages;
use async_stream::stream;
use gatepass_api::types::{
    InitiatePaymentRequest, Payment, PaymentId, PaymentInitiation, PaymentStatus,
};
use gatepass_api::{ApiClient, ApiError};
use gatepass_core::Resource;
use gatepass_runtime::{PollOutcome, RetryPolicy, poll_until};

/// Payment initiation, history and confirmation polling
#[derive(Clone, Debug)]
pub struct PaymentRepository {
    api: ApiClient,
    poll_policy: RetryPolicy,
}

impl PaymentRepository {
    /// Create a repository over `api` that confirms payments under `poll_policy`
    #[must_use]
    pub const fn new(api: ApiClient, poll_policy: RetryPolicy) -> Self {
        Self { api, poll_policy }
    }

    /// Policy used by [`await_confirmation`](Self::await_confirmation)
    #[must_use]
    pub const fn poll_policy(&self) -> &RetryPolicy {
        &self.poll_policy
    }

    /// Start a payment; a redirect URL means the provider takes over
    #[must_use]
    pub fn initiate(&self, request: InitiatePaymentRequest) -> ResourceStream<PaymentInitiation> {
        let api = self.api.clone();
        fetch("initiate_payment", messages::PAYMENT_INITIATION_FAILED, async move {
            api.initiate_payment(&request).await
        })
    }

    /// Payment history of the signed-in user
    #[must_use]
    pub fn my_payments(&self) -> ResourceStream<Vec<Payment>> {
        let api = self.api.clone();
        fetch("my_payments", messages::PAYMENTS_FAILED, async move {
            api.my_payments().await
        })
    }

    /// One payment
    #[must_use]
    pub fn payment(&self, id: PaymentId) -> ResourceStream<Payment> {
        let api = self.api.clone();
        fetch("get_payment", messages::PAYMENT_FAILED_TO_LOAD, async move {
            api.get_payment(&id).await
        })
    }

    /// Poll the payment history until `payment_id` settles
    ///
    /// Each attempt lists the user's payments and looks for `payment_id` in
    /// a terminal status. A payment that is missing or still pending keeps
    /// the poll going; failed attempts are logged and retried. The first
    /// attempt runs immediately and later ones follow the policy's backoff.
    ///
    /// - `COMPLETED` yields `Success(payment)`
    /// - `FAILED` and `CANCELLED` yield an `Error` saying so
    /// - running out of attempts yields an `Error` asking the user to check
    ///   back later
    #[must_use]
    pub fn await_confirmation(&self, payment_id: PaymentId) -> ResourceStream<Payment> {
        let api = self.api.clone();
        let policy = self.poll_policy.clone();

        Box::pin(stream! {
            yield Resource::Loading;

            let outcome = poll_until(&policy, |attempt| {
                let api = api.clone();
                let payment_id = payment_id.clone();
                async move {
                    tracing::debug!(attempt, %payment_id, "Checking payment status");
                    metrics::counter!("payments.poll.attempts").increment(1);
                    let payments = api.my_payments().await?;
                    Ok::<_, ApiError>(settled(payments, &payment_id))
                }
            })
            .await;

            yield confirmation_state(&payment_id, outcome);
        })
    }
}

/// The payment with `id`, once it is in a terminal status
fn settled(payments: Vec<Payment>, id: &PaymentId) -> Option<Payment> {
    payments
        .into_iter()
        .find(|payment| &payment.id == id && payment.status.is_terminal())
}

fn confirmation_state(
    id: &PaymentId,
    outcome: PollOutcome<Payment, ApiError>,
) -> Resource<Payment> {
    match outcome {
        PollOutcome::Resolved { value, attempts } => {
            tracing::info!(payment_id = %id, status = ?value.status, attempts, "Payment settled");
            match value.status {
                PaymentStatus::Completed => Resource::Success(value),
                PaymentStatus::Failed => Resource::Error(messages::PAYMENT_FAILED.to_string()),
                PaymentStatus::Cancelled => {
                    Resource::Error(messages::PAYMENT_CANCELLED.to_string())
                },
                PaymentStatus::Pending
                | PaymentStatus::Processing
                | PaymentStatus::Refunded
                | PaymentStatus::Unknown => {
                    Resource::Error(messages::PAYMENT_UNCONFIRMED.to_string())
                },
            }
        },
        PollOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            match last_error {
                Some(error) => {
                    tracing::warn!(
                        payment_id = %id,
                        attempts,
                        error = %error,
                        "Payment not confirmed"
                    );
                },
                None => tracing::warn!(payment_id = %id, attempts, "Payment not confirmed"),
            }
            Resource::Error(messages::PAYMENT_UNCONFIRMED.to_string())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatepass_api::types::PaymentMethod;

    fn payment(id: &str, status: PaymentStatus) -> Payment {
        Payment {
            id: PaymentId::new(id),
            amount: 50.0,
            currency: "USD".to_string(),
            method: PaymentMethod::default(),
            status,
            ticket_ids: Vec::new(),
            created_at: None,
            provider_reference: None,
        }
    }

    #[test]
    fn settled_ignores_other_and_pending_payments() {
        let id = PaymentId::new("p1");

        assert_eq!(
            settled(
                vec![
                    payment("p0", PaymentStatus::Completed),
                    payment("p1", PaymentStatus::Processing),
                ],
                &id
            ),
            None
        );
        assert_eq!(
            settled(vec![payment("p1", PaymentStatus::Failed)], &id),
            Some(payment("p1", PaymentStatus::Failed))
        );
    }

    #[test]
    fn terminal_statuses_map_to_states() {
        let id = PaymentId::new("p1");
        let resolved = |status| PollOutcome::Resolved {
            value: payment("p1", status),
            attempts: 1,
        };

        assert!(confirmation_state(&id, resolved(PaymentStatus::Completed)).is_success());
        assert_eq!(
            confirmation_state(&id, resolved(PaymentStatus::Failed)).error_message(),
            Some(messages::PAYMENT_FAILED)
        );
        assert_eq!(
            confirmation_state(&id, resolved(PaymentStatus::Cancelled)).error_message(),
            Some(messages::PAYMENT_CANCELLED)
        );
    }

    #[test]
    fn exhaustion_asks_to_check_later() {
        let state = confirmation_state(
            &PaymentId::new("p1"),
            PollOutcome::Exhausted {
                attempts: 5,
                last_error: Some(ApiError::EmptyPayload),
            },
        );

        assert_eq!(state.error_message(), Some(messages::PAYMENT_UNCONFIRMED));
    }
}
