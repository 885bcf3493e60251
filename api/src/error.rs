//! Error types for the Gatepass API client

use std::fmt;
use thiserror::Error;

/// Message shown for any failure that never reached the server
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Broad category of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Request or connect timeout expired
    Timeout,
    /// Could not connect to the server
    Connect,
    /// Connection dropped while sending or reading the body
    Io,
    /// Anything else the HTTP stack reported
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Io => "io",
            Self::Other => "transport",
        };
        f.write_str(label)
    }
}

/// Failure below HTTP: no status code was received
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    /// What went wrong
    pub kind: TransportErrorKind,
    /// Detail from the HTTP stack, for logs
    pub message: String,
}

impl TransportError {
    /// Create a transport error
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Connection could not be established
    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    /// Timed out waiting for the server
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }
}

/// Errors that can occur when calling the Gatepass API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got an HTTP response
    #[error("Network failure: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http {
        /// HTTP status code
        status: u16,
        /// Message parsed from the error body, if any
        message: Option<String>,
    },

    /// The envelope reported `success = false`
    #[error("Request rejected: {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// Server message, if any
        message: Option<String>,
    },

    /// The envelope reported success but carried no data
    #[error("Response carried no data")]
    EmptyPayload,

    /// The body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Message from the server, when it sent a non-empty one
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } | Self::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            },
            Self::Network(_) | Self::EmptyPayload | Self::Decode(_) | Self::InvalidRequest(_) => {
                None
            },
        }
    }

    /// Text to show the user, using `fallback` when the server gave none
    ///
    /// - network failures get a fixed connectivity message,
    /// - HTTP and application failures prefer the server's message,
    /// - empty payloads and decode failures use `fallback`,
    /// - invalid requests describe themselves.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::InvalidRequest(reason) => reason.clone(),
            Self::Http { .. } | Self::Rejected { .. } | Self::EmptyPayload | Self::Decode(_) => {
                self.server_message().unwrap_or(fallback).to_string()
            },
        }
    }

    /// Whether the request never reached the server
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
