//! Gatepass API client implementation

use crate::{
    envelope::{self, Acknowledgement},
    error::ApiError,
    session::SessionStore,
    transport::{ApiRequest, RawResponse, Transport},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Gatepass API client
///
/// Attaches the session's bearer token to every request and turns the
/// response envelope into a typed result. Cloning is cheap; clones share
/// the transport and the session.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("authenticated", &self.session.token().is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from a transport and a session store
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn SessionStore>) -> Self {
        Self { transport, session }
    }

    /// The session this client authenticates with
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Send a request and decode the envelope's payload
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if no response arrived
    /// - [`ApiError::Http`] for non-2xx statuses
    /// - [`ApiError::Decode`] if the body is not an envelope of `T`
    /// - [`ApiError::Rejected`] / [`ApiError::EmptyPayload`] for failed envelopes
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        envelope::decode::<T>(&response.body)?.into_data()
    }

    /// Send a request whose successful envelope may carry no data
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call), except a null payload is accepted.
    pub async fn acknowledge(&self, request: ApiRequest) -> Result<Acknowledgement, ApiError> {
        let response = self.send(request).await?;
        envelope::decode::<serde_json::Value>(&response.body)?.into_acknowledgement()
    }

    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer(token),
            None => request,
        };
        let method = request.method;
        let path = request.path.clone();

        tracing::debug!(%method, %path, "API request");
        metrics::counter!("api.requests.total", "method" => method.as_str()).increment(1);

        let response = self.transport.execute(request).await.map_err(|error| {
            tracing::debug!(%method, %path, %error, "API request failed in transport");
            ApiError::Network(error)
        })?;

        if response.is_success() {
            tracing::debug!(%method, %path, status = response.status, "API response");
            Ok(response)
        } else {
            tracing::debug!(%method, %path, status = response.status, "API error status");
            Err(ApiError::Http {
                status: response.status,
                message: envelope::error_message(&response.body),
            })
        }
    }
}
