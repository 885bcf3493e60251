//! Integration tests for `ApiClient` over the reqwest transport against a
//! local mock server.

#![allow(clippy::unwrap_used, clippy::panic)]

use gatepass_api::types::{CheckInRequest, EventFilter, EventId, ImageUpload, TicketId, UserId};
use gatepass_api::{
    ApiClient, ApiError, InMemorySession, NETWORK_ERROR_MESSAGE, ReqwestTransport,
    TransportErrorKind,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base_url: &str, session: Arc<InMemorySession>) -> ApiClient {
    let transport =
        ReqwestTransport::new(base_url, Duration::from_secs(5), Duration::from_secs(2)).unwrap();
    ApiClient::new(Arc::new(transport), session)
}

fn event_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "startTime": "2026-05-01T18:00:00Z",
        "status": "PUBLISHED"
    })
}

#[tokio::test]
async fn list_events_sends_filter_and_decodes_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("search", "jazz"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [event_json("e1", "Jazz Night"), event_json("e2", "Jazz Brunch")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    let filter = EventFilter {
        search: Some("jazz".to_string()),
        page: Some(1),
        ..EventFilter::default()
    };

    let events = client.list_events(&filter).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[1].title, "Jazz Brunch");
}

#[tokio::test]
async fn bearer_token_comes_from_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/my-tickets"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(InMemorySession::with_token("secret-token"));
    let client = client_for(&server.uri(), session);

    let tickets = client.my_tickets().await.unwrap();
    assert!(tickets.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn requests_without_token_omit_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": "c1", "name": "Music" }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    client.categories().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn non_2xx_surfaces_envelope_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Event not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    let error = client.get_event(&EventId::new("missing")).await.unwrap_err();

    assert_eq!(
        error,
        ApiError::Http {
            status: 404,
            message: Some("Event not found".to_string())
        }
    );
    assert_eq!(error.user_message("Failed to load event"), "Event not found");
}

#[tokio::test]
async fn success_false_on_200_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tickets/check-in"))
        .and(body_json(json!({
            "ticketId": "T1",
            "ticketNumber": "N1",
            "eventId": "E1",
            "userId": "U1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Ticket already used",
            "data": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    let request = CheckInRequest {
        ticket_id: TicketId::new("T1"),
        ticket_number: "N1".to_string(),
        event_id: EventId::new("E1"),
        user_id: UserId::new("U1"),
    };

    let error = client.check_in(&request).await.unwrap_err();
    assert_eq!(error.user_message("Check-in failed"), "Ticket already used");
}

#[tokio::test]
async fn delete_event_accepts_null_data() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/events/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Event deleted",
            "data": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    let ack = client.delete_event(&EventId::new("e1")).await.unwrap();

    assert_eq!(ack.message.as_deref(), Some("Event deleted"));
}

#[tokio::test]
async fn image_upload_is_multipart_with_primary_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/e1/images"))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("name=\"isPrimary\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "url": "https://cdn/e1.png", "isPrimary": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    let image = ImageUpload {
        file_name: "poster.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: b"PNG-BYTES".to_vec(),
    };

    let uploaded = client
        .upload_event_image(&EventId::new("e1"), image, true)
        .await
        .unwrap();

    assert!(uploaded.is_primary);
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing listens on port 1
    let client = client_for("http://127.0.0.1:1", Arc::new(InMemorySession::new()));

    let error = client.featured_events().await.unwrap_err();

    match &error {
        ApiError::Network(transport) => {
            assert_eq!(transport.kind, TransportErrorKind::Connect);
        },
        other => panic!("expected network error, got {other:?}"),
    }
    assert_eq!(error.user_message("Failed to load events"), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    let error = client.locations().await.unwrap_err();

    assert!(matches!(error, ApiError::Decode(_)));
    assert_eq!(error.user_message("Failed to load locations"), "Failed to load locations");
}

#[tokio::test]
async fn ids_cannot_escape_their_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/e1%2Fadmin%3Fall%3D1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": event_json("e1/admin?all=1", "Escaped")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(InMemorySession::new()));
    let event = client
        .get_event(&EventId::new("e1/admin?all=1"))
        .await
        .unwrap();

    assert_eq!(event.title, "Escaped");
}
