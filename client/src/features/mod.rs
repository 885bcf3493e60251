//! Features: view state for each screen
//!
//! A feature is a state made of independent `Option<Resource<T>>` slots
//! (`None` until first requested), an action enum with one request per
//! operation and one `*Updated` action per slot, and a reducer.
//!
//! Every read is a cancellable stream effect keyed by its slot, so asking
//! for a slot again replaces the request still in flight for that slot and
//! leaves the other slots alone. Writes are never superseded: each one runs
//! to completion even when another write lands in the same slot first. Owning
//! the feature's store through a [`gatepass_runtime::ScopedStore`] abandons
//! both kinds when the screen goes away.

use crate::repository::ResourceStream;
use futures::StreamExt;
use gatepass_core::Resource;
use gatepass_core::effect::{Effect, EffectId};

pub mod account;
pub mod browse;
pub mod check_in;
pub mod checkout;
pub mod dashboard;
pub mod event_detail;
pub mod notifications;
pub mod organizer;
pub mod tickets;

/// Feed a repository stream into a slot, replacing any fetch running under `id`
pub fn fetch<T, A, F>(id: EffectId, stream: ResourceStream<T>, wrap: F) -> Effect<A>
where
    T: Send + 'static,
    A: Send + 'static,
    F: Fn(Resource<T>) -> A + Send + 'static,
{
    Effect::Stream(Box::pin(stream.map(wrap))).cancellable(id)
}

/// Feed a write's stream into a slot without a cancellation key
///
/// The slot shows whichever write reported last; none of them is aborted
/// before its request is sent.
pub fn perform<T, A, F>(stream: ResourceStream<T>, wrap: F) -> Effect<A>
where
    T: Send + 'static,
    A: Send + 'static,
    F: Fn(Resource<T>) -> A + Send + 'static,
{
    Effect::Stream(Box::pin(stream.map(wrap)))
}
