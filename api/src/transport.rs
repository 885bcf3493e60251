//! Network seam between the API client and the HTTP stack
//!
//! [`ApiClient`](crate::ApiClient) builds [`ApiRequest`] values and hands
//! them to a [`Transport`]. Production code uses [`ReqwestTransport`]; tests
//! substitute a scripted transport.

use crate::error::{ApiError, TransportError, TransportErrorKind};
use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// HTTP verbs used by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case verb
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// One part of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// Binary file field
    File {
        /// Field name
        name: String,
        /// File name sent with the part
        file_name: String,
        /// MIME type of the content
        content_type: String,
        /// Raw bytes
        bytes: Vec<u8>,
    },
}

impl FormPart {
    /// The field name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Multipart form body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    /// Parts in send order
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a file field
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    /// Look up a part by field name
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name() == name)
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(serde_json::Value),
    /// Multipart upload
    Multipart(MultipartForm),
}

/// A request relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Verb
    pub method: HttpMethod,
    /// Path below the base URL, starting with `/`
    pub path: String,
    /// Query parameters in order
    pub query: Vec<(String, String)>,
    /// Body
    pub body: RequestBody,
    /// Bearer token to authenticate with
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Request with no query, body or credentials
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    /// GET `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// POST `path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// PUT `path`
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// PATCH `path`
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// DELETE `path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a multipart body
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Status and body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text
    pub body: String,
}

impl RawResponse {
    /// Response with `status` and `body`
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests over the wire
///
/// Implementations only move bytes: any HTTP status is `Ok`, and `Err` is
/// reserved for requests that got no response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response was received.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` with request and connect timeouts
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the TLS backend cannot be initialised.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| classify(&e))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// The base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn build_form(form: MultipartForm) -> Result<multipart::Form, TransportError> {
    form.parts
        .into_iter()
        .try_fold(multipart::Form::new(), |acc, part| match part {
            FormPart::Text { name, value } => Ok(acc.text(name, value)),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let part = multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| classify(&e))?;
                Ok(acc.part(name, part))
            },
        })
}

fn classify(error: &reqwest::Error) -> TransportError {
    let kind = if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_body() || error.is_decode() {
        TransportErrorKind::Io
    } else {
        TransportErrorKind::Other
    };
    TransportError::new(kind, error.to_string())
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), self.url(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(build_form(form)?),
        };

        let response = builder.send().await.map_err(|e| classify(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(&e))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let transport = ReqwestTransport::new(
            "http://localhost:8080/api/",
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        assert!(transport.is_ok());
        if let Ok(transport) = transport {
            assert_eq!(transport.url("/events/1"), "http://localhost:8080/api/events/1");
            assert_eq!(transport.url("events"), "http://localhost:8080/api/events");
        }
    }

    #[test]
    fn builder_collects_query_and_bearer() {
        let request = ApiRequest::get("/events")
            .query("page", 2)
            .query("search", "jazz")
            .bearer("abc");

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "jazz".to_string())
            ]
        );
        assert_eq!(request.bearer.as_deref(), Some("abc"));
    }

    #[test]
    fn multipart_parts_are_addressable_by_name() {
        let form = MultipartForm::new()
            .file("image", "poster.png", "image/png", vec![1, 2, 3])
            .text("isPrimary", "true");

        assert!(matches!(
            form.part("image"),
            Some(FormPart::File { bytes, .. }) if bytes.len() == 3
        ));
        assert!(matches!(
            form.part("isPrimary"),
            Some(FormPart::Text { value, .. }) if value == "true"
        ));
        assert!(form.part("missing").is_none());
    }

    #[test]
    fn status_range_decides_success() {
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }
}
