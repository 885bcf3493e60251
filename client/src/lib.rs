//! # Gatepass Client
//!
//! Client core of the Gatepass event-ticketing app: everything between the
//! screens and the REST backend.
//!
//! - [`repository`]: one repository per server resource. Each call yields
//!   `Loading` and then exactly one `Success` or `Error`.
//! - [`features`]: per-screen state, actions and reducers, run by a
//!   [`gatepass_runtime::Store`] with one cancellable slot per fetch.
//! - [`checkin`]: decoding ticket QR codes at the door.
//! - [`config`] and [`telemetry`]: environment-driven settings and logging.
//!
//! ## Example
//!
//! ```no_run
//! use gatepass_api::{ApiClient, InMemorySession, ReqwestTransport};
//! use gatepass_client::{ClientEnvironment, Config, features::browse};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let transport = ReqwestTransport::new(
//!     &config.api.base_url,
//!     config.request_timeout(),
//!     config.connect_timeout(),
//! )?;
//! let api = ApiClient::new(Arc::new(transport), Arc::new(InMemorySession::new()));
//! let env = ClientEnvironment::new(api, config.payment_poll_policy());
//!
//! let store = browse::scoped(env);
//! store.send(browse::BrowseAction::LoadFeatured).await?;
//! # Ok(())
//! # }
//! ```

pub mod checkin;
pub mod config;
pub mod environment;
pub mod features;
pub mod messages;
pub mod repository;
pub mod telemetry;

pub use checkin::{CheckInCode, QrError};
pub use config::Config;
pub use environment::ClientEnvironment;
pub use repository::ResourceStream;
