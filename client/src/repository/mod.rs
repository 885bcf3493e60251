//! Repositories: one per server resource
//!
//! Every repository method issues a single API call and returns a
//! [`ResourceStream`] that yields [`Resource::Loading`] and then exactly one
//! terminal item. Nothing is cached; each call builds a fresh stream, and the
//! request is only sent once the stream is polled.
//!
//! Failures never escape as errors. They become [`Resource::Error`] carrying
//! a message for the user: the network message for connectivity failures,
//! the server's own message when it sent one, otherwise the method's
//! fallback from [`crate::messages`].

use async_stream::stream;
use futures::Stream;
use gatepass_api::ApiError;
use gatepass_core::Resource;
use std::future::Future;
use std::pin::Pin;

mod analytics;
mod catalog;
mod events;
mod notifications;
mod organizers;
mod payments;
mod tickets;
mod users;

pub use analytics::AnalyticsRepository;
pub use catalog::CatalogRepository;
pub use events::EventRepository;
pub use notifications::NotificationRepository;
pub use organizers::OrganizerRepository;
pub use payments::PaymentRepository;
pub use tickets::{TicketRepository, TicketTypeRepository};
pub use users::UserRepository;

/// `Loading` followed by one terminal state
pub type ResourceStream<T> = Pin<Box<dyn Stream<Item = Resource<T>> + Send>>;

/// Wrap one API call as a resource stream
///
/// `operation` names the call in logs; `fallback` is shown when the server
/// gave no usable message.
pub(crate) fn fetch<T, Fut>(
    operation: &'static str,
    fallback: &'static str,
    call: Fut,
) -> ResourceStream<T>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    Box::pin(stream! {
        yield Resource::Loading;

        match call.await {
            Ok(value) => {
                tracing::debug!(operation, "Request succeeded");
                yield Resource::Success(value);
            },
            Err(error) => {
                tracing::warn!(operation, error = %error, "Request failed");
                metrics::counter!("repository.failures.total", "operation" => operation)
                    .increment(1);
                yield Resource::Error(error.user_message(fallback));
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use gatepass_api::{NETWORK_ERROR_MESSAGE, TransportError};

    #[tokio::test]
    async fn success_is_preceded_by_loading() {
        let states: Vec<_> = fetch("test", "fallback", async { Ok::<_, ApiError>(7) })
            .collect()
            .await;

        assert_eq!(states, vec![Resource::Loading, Resource::Success(7)]);
    }

    #[tokio::test]
    async fn errors_become_user_messages() {
        let rejected: Vec<Resource<u8>> = fetch("test", "Nothing here", async {
            Err(ApiError::Rejected { message: None })
        })
        .collect()
        .await;
        assert_eq!(rejected[1], Resource::Error("Nothing here".to_string()));

        let offline: Vec<Resource<u8>> = fetch("test", "Nothing here", async {
            Err(ApiError::Network(TransportError::connect("refused")))
        })
        .collect()
        .await;
        assert_eq!(offline[1], Resource::Error(NETWORK_ERROR_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn call_waits_for_first_poll() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let started = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&started);
        let mut stream = fetch("test", "fallback", async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<_, ApiError>(())
        });

        assert!(!started.load(Ordering::SeqCst));
        assert_eq!(stream.next().await, Some(Resource::Loading));
        assert_eq!(stream.next().await, Some(Resource::Success(())));
        assert!(started.load(Ordering::SeqCst));
        assert_eq!(stream.next().await, None);
    }
}
