//! Resource states for asynchronous fetches.
//!
//! A [`Resource`] is what one observable slot of a screen holds while a
//! request is in flight and after it finishes. The lifecycle is always
//! `Loading` followed by exactly one terminal state; a new request starts the
//! cycle again.

use serde::{Deserialize, Serialize};

/// Outcome of one asynchronous fetch
///
/// # Example
///
/// ```
/// use gatepass_core::Resource;
///
/// let loaded: Resource<u32> = Resource::Success(3);
/// assert_eq!(loaded.data(), Some(&3));
///
/// let failed: Resource<u32> = Resource::Error("No tickets found".to_string());
/// assert_eq!(failed.error_message(), Some("No tickets found"));
/// assert!(failed.is_terminal());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Resource<T> {
    /// Request issued, no answer yet
    Loading,
    /// Request succeeded with a payload
    Success(T),
    /// Request failed; the message is ready to show to the user
    Error(String),
}

impl<T> Resource<T> {
    /// Build a terminal state from a result, rendering errors with `describe`
    pub fn from_result<E, F>(result: Result<T, E>, describe: F) -> Self
    where
        F: FnOnce(E) -> String,
    {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Error(describe(error)),
        }
    }

    /// Whether the request is still in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether this is `Success` or `Error`
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Whether the request succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the request failed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The payload, if the request succeeded
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Loading | Self::Error(_) => None,
        }
    }

    /// Consume the resource and return the payload, if any
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Loading | Self::Error(_) => None,
        }
    }

    /// The error message, if the request failed
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Loading | Self::Success(_) => None,
        }
    }

    /// Transform the payload, keeping `Loading` and `Error` as they are
    pub fn map<U, F>(self, f: F) -> Resource<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Loading => Resource::Loading,
            Self::Success(value) => Resource::Success(f(value)),
            Self::Error(message) => Resource::Error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_is_not_terminal() {
        let resource: Resource<u8> = Resource::Loading;
        assert!(resource.is_loading());
        assert!(!resource.is_terminal());
        assert_eq!(resource.data(), None);
        assert_eq!(resource.error_message(), None);
    }

    #[test]
    fn from_result_renders_errors() {
        let ok: Resource<u8> = Resource::from_result(Ok::<_, &str>(7), str::to_string);
        assert_eq!(ok, Resource::Success(7));

        let err: Resource<u8> =
            Resource::from_result(Err("connection refused"), |e| format!("failed: {e}"));
        assert_eq!(err.error_message(), Some("failed: connection refused"));
    }

    #[test]
    fn map_keeps_error_message() {
        let err: Resource<u8> = Resource::Error("nope".to_string());
        assert_eq!(err.map(u32::from), Resource::Error("nope".to_string()));

        let ok: Resource<u8> = Resource::Success(2);
        assert_eq!(ok.map(|v| u32::from(v) * 10), Resource::Success(20));
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(Resource::Success(vec![1, 2])).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "state": "success", "value": [1, 2] }));

        let json = serde_json::to_value(Resource::<u8>::Loading).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "state": "loading" }));
    }
}
