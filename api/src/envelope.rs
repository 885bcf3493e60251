//! The `{ success, message, data }` wrapper every endpoint responds with

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Response envelope
///
/// `success = false` or a missing `data` is a failure regardless of the HTTP
/// status the envelope arrived with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Application-level outcome
    #[serde(default)]
    pub success: bool,
    /// Human-readable server message
    pub message: Option<String>,
    /// Payload
    pub data: Option<T>,
}

/// Payload-less success of an acknowledgement endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// Server message, if it sent one
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Failed envelope with a server message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// The payload of a successful envelope
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rejected`] when `success` is false
    /// - [`ApiError::EmptyPayload`] when `data` is null or missing
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.message,
            });
        }
        self.data.ok_or(ApiError::EmptyPayload)
    }

    /// Accept a successful envelope whether or not it carries data
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when `success` is false.
    pub fn into_acknowledgement(self) -> Result<Acknowledgement, ApiError> {
        if self.success {
            Ok(Acknowledgement {
                message: self.message,
            })
        } else {
            Err(ApiError::Rejected {
                message: self.message,
            })
        }
    }
}

/// Parse a 2xx body as an envelope
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Best-effort message from a non-2xx body
///
/// Error bodies are usually envelopes, but some gateways answer with
/// `{ "error": "..." }` or plain text; anything unparseable yields `None`.
pub(crate) fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_with_data_yields_payload() {
        let envelope: Envelope<Vec<u32>> = decode(r#"{"success":true,"data":[1,2]}"#)
            .unwrap_or_else(|_| Envelope::rejected("unparsed"));
        assert_eq!(envelope.into_data(), Ok(vec![1, 2]));
    }

    #[test]
    fn success_without_data_is_empty_payload() {
        let envelope: Envelope<u32> = Envelope {
            success: true,
            message: Some("ok".to_string()),
            data: None,
        };
        assert_eq!(envelope.into_data(), Err(ApiError::EmptyPayload));
    }

    #[test]
    fn failure_keeps_server_message() {
        let envelope: Envelope<u32> = Envelope::rejected("Sold out");
        assert_eq!(
            envelope.into_data(),
            Err(ApiError::Rejected {
                message: Some("Sold out".to_string())
            })
        );
    }

    #[test]
    fn acknowledgement_accepts_null_data() {
        let envelope: Envelope<serde_json::Value> = serde_json::from_value(json!({
            "success": true,
            "message": "Event deleted",
            "data": null
        }))
        .unwrap_or_else(|_| Envelope::rejected("unparsed"));

        assert_eq!(
            envelope.into_acknowledgement(),
            Ok(Acknowledgement {
                message: Some("Event deleted".to_string())
            })
        );
    }

    #[test]
    fn missing_success_flag_is_failure() {
        let envelope: Envelope<u32> =
            serde_json::from_value(json!({ "data": 4 })).unwrap_or_else(|_| Envelope::ok(0));
        assert!(!envelope.success);
        assert!(envelope.into_data().is_err());
    }

    #[test]
    fn error_message_reads_message_or_error_field() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"Ticket already used"}"#),
            Some("Ticket already used".to_string())
        );
        assert_eq!(
            error_message(r#"{"error":"Forbidden"}"#),
            Some("Forbidden".to_string())
        );
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(error_message(r#"{"message":""}"#), None);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let result = decode::<u32>("not json");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
