//! Scripted backend for repository and feature tests

use async_trait::async_trait;
use gatepass_api::{ApiRequest, HttpMethod, RawResponse, Transport, TransportError};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with a status and body
    Respond(RawResponse),
    /// Fail without a response
    Fail(TransportError),
    /// Wait, then give the inner reply
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    /// Same reply after `delay`
    #[must_use]
    pub fn after(self, delay: Duration) -> Self {
        Self::Delayed(delay, Box::new(self))
    }
}

/// `200` with `{ "success": true, "data": data }`
#[must_use]
pub fn envelope_ok<T: Serialize>(data: T) -> Reply {
    let body = serde_json::json!({ "success": true, "data": data });
    Reply::Respond(RawResponse::new(200, body.to_string()))
}

/// `200` with `{ "success": true, "message": message, "data": null }`
#[must_use]
pub fn envelope_ack(message: &str) -> Reply {
    let body = serde_json::json!({ "success": true, "message": message, "data": null });
    Reply::Respond(RawResponse::new(200, body.to_string()))
}

/// `200` with `{ "success": false, "message": message }`
#[must_use]
pub fn envelope_rejected(message: &str) -> Reply {
    let body = serde_json::json!({ "success": false, "message": message });
    Reply::Respond(RawResponse::new(200, body.to_string()))
}

/// Non-2xx status with an optional envelope message
#[must_use]
pub fn status(code: u16, message: Option<&str>) -> Reply {
    let body = message.map_or_else(String::new, |m| {
        serde_json::json!({ "success": false, "message": m }).to_string()
    });
    Reply::Respond(RawResponse::new(code, body))
}

/// Connection refused
#[must_use]
pub fn network_failure() -> Reply {
    Reply::Fail(TransportError::connect("connection refused"))
}

#[derive(Default)]
struct Script {
    routes: HashMap<(HttpMethod, String), VecDeque<Reply>>,
    requests: Vec<ApiRequest>,
}

/// [`Transport`] that answers from a script and records every request
///
/// Replies for a route are consumed in order; the last one repeats.
/// Requests to unscripted routes get a `404` envelope.
///
/// # Example
///
/// ```
/// use gatepass_api::HttpMethod;
/// use gatepass_testing::transport::{MockTransport, envelope_ok, network_failure};
///
/// let transport = MockTransport::new();
/// transport
///     .on(HttpMethod::Get, "/categories", network_failure())
///     .on(HttpMethod::Get, "/categories", envelope_ok(Vec::<String>::new()));
/// assert_eq!(transport.calls_to(HttpMethod::Get, "/categories"), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    /// Transport with nothing scripted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `reply` for `method path`
    pub fn on(&self, method: HttpMethod, path: &str, reply: Reply) -> &Self {
        self.script()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue `reply` for `GET path`
    pub fn on_get(&self, path: &str, reply: Reply) -> &Self {
        self.on(HttpMethod::Get, path, reply)
    }

    /// Queue `reply` for `POST path`
    pub fn on_post(&self, path: &str, reply: Reply) -> &Self {
        self.on(HttpMethod::Post, path, reply)
    }

    /// Every request received so far
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script().requests.clone()
    }

    /// Number of requests received for `method path`
    #[must_use]
    pub fn calls_to(&self, method: HttpMethod, path: &str) -> usize {
        self.script()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// The most recent request for `method path`
    #[must_use]
    pub fn last_request_to(&self, method: HttpMethod, path: &str) -> Option<ApiRequest> {
        self.script()
            .requests
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }

    fn next_reply(&self, request: ApiRequest) -> Reply {
        let mut script = self.script();
        let key = (request.method, request.path.clone());
        script.requests.push(request);

        match script.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
        .unwrap_or_else(|| status(404, Some(&format!("No mock for {} {}", key.0, key.1))))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut reply = self.next_reply(request);
        loop {
            match reply {
                Reply::Respond(response) => return Ok(response),
                Reply::Fail(error) => return Err(error),
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                },
            }
        }
    }
}
