//! # Gatepass API Client
//!
//! Network layer for the Gatepass ticketing backend: a [`Transport`] seam
//! with a `reqwest` implementation, the `{ success, message, data }`
//! envelope, the [`ApiError`] taxonomy, wire DTOs and one method per
//! endpoint on [`ApiClient`].
//!
//! ## Example
//!
//! ```no_run
//! use gatepass_api::{ApiClient, InMemorySession, ReqwestTransport};
//! use gatepass_api::types::EventFilter;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::new(
//!         "http://localhost:8080/api",
//!         Duration::from_secs(30),
//!         Duration::from_secs(10),
//!     )?;
//!     let client = ApiClient::new(Arc::new(transport), Arc::new(InMemorySession::new()));
//!
//!     let events = client.list_events(&EventFilter::default()).await?;
//!     println!("{} events", events.len());
//!     Ok(())
//! }
//! ```

pub mod client;
mod endpoints;
pub mod envelope;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::ApiClient;
pub use envelope::{Acknowledgement, Envelope};
pub use error::{ApiError, NETWORK_ERROR_MESSAGE, TransportError, TransportErrorKind};
pub use session::{InMemorySession, SessionStore};
pub use transport::{
    ApiRequest, FormPart, HttpMethod, MultipartForm, RawResponse, ReqwestTransport, RequestBody,
    Transport,
};
