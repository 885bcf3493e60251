//! Endpoint methods on [`ApiClient`](crate::ApiClient), one module per
//! backend resource.
//!
//! Each method builds its [`ApiRequest`](crate::ApiRequest) and delegates
//! to [`ApiClient::call`](crate::ApiClient::call) or
//! [`ApiClient::acknowledge`](crate::ApiClient::acknowledge).

mod analytics;
mod catalog;
mod events;
mod notifications;
mod organizers;
mod payments;
mod ticket_types;
mod tickets;
mod users;

/// Percent-encode one path segment so an id cannot add segments or a query
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
