mod support;

use pos_bridge::api_client::PosApiClient;
use pos_bridge::error::SyncError;
use pos_bridge::types::ExternalRecord;
use support::{stored_customer, test_config};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PosApiClient {
    PosApiClient::new(test_config(&server.uri()))
}

fn page_body(customers: Vec<serde_json::Value>, next: Option<&str>) -> serde_json::Value {
    match next {
        Some(cursor) => serde_json::json!({ "customers": customers, "nextCursor": cursor }),
        None => serde_json::json!({ "customers": customers }),
    }
}

// --- Listing ---

#[tokio::test]
async fn list_returns_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            vec![serde_json::json!({ "id": "c-1", "name": "Maria Santos" })],
            Some("cursor-2"),
        )))
        .mount(&server)
        .await;

    let page = client(&server).list(None, None).await.unwrap();
    assert_eq!(page.customers.len(), 1);
    assert_eq!(page.customers[0].id.as_deref(), Some("c-1"));
    assert_eq!(page.next_cursor.as_deref(), Some("cursor-2"));
}

#[tokio::test]
async fn list_forwards_cursor_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .and(query_param("cursor", "abc"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server).list(Some("abc"), Some(25)).await.unwrap();
    assert!(page.customers.is_empty());
    assert_eq!(page.next_cursor, None);
}

#[tokio::test]
async fn requests_carry_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).list(None, None).await.unwrap();
}

// --- Get ---

#[tokio::test]
async fn get_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "id": "c-1", "name": "Maria Santos", "email": "maria@x.com" }),
        ))
        .mount(&server)
        .await;

    let customer = client(&server).get("c-1").await.unwrap();
    assert_eq!(customer.name, "Maria Santos");
    assert_eq!(customer.email.as_deref(), Some("maria@x.com"));
}

// --- Upsert ---

#[tokio::test]
async fn upsert_without_id_creates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            serde_json::json!({ "id": "c-new", "name": "Maria Santos" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let record = ExternalRecord {
        name: "Maria Santos".into(),
        ..ExternalRecord::default()
    };
    let stored = client(&server).upsert(&record).await.unwrap();
    assert_eq!(stored.id.as_deref(), Some("c-new"));
}

#[tokio::test]
async fn upsert_with_id_updates() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/customers/c-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "id": "c-7", "name": "Maria Santos" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let record = stored_customer("c-7", "Maria Santos");
    let stored = client(&server).upsert(&record).await.unwrap();
    assert_eq!(stored.id.as_deref(), Some("c-7"));
}

// --- Delete ---

#[tokio::test]
async fn delete_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/customers/c-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete("c-1").await.unwrap();
}

// --- Error mapping ---

#[tokio::test]
async fn non_success_becomes_remote_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers/c-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("directory offline"))
        .mount(&server)
        .await;

    let err = client(&server).get("c-1").await.unwrap_err();
    match err {
        SyncError::RemoteApi { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "directory offline");
        }
        other => panic!("expected RemoteApi, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_retryable_client_errors_not() {
    let retryable = SyncError::RemoteApi { status: 503, body: String::new() };
    let rate_limited = SyncError::RemoteApi { status: 429, body: String::new() };
    let not_found = SyncError::RemoteApi { status: 404, body: String::new() };
    assert!(retryable.is_retryable());
    assert!(rate_limited.is_retryable());
    assert!(!not_found.is_retryable());
    assert!(!SyncError::Config("no token".into()).is_retryable());
}

// --- Lazy credentials ---

#[tokio::test]
async fn construction_without_token_succeeds() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.api_token = None;
    // Wiring-time construction must not require credentials.
    let _client = PosApiClient::new(config);
}

#[tokio::test]
async fn first_call_without_token_fails_before_any_request() {
    let server = MockServer::start().await;
    let mut config = test_config(&server.uri());
    config.api_token = None;
    let client = PosApiClient::new(config);

    let err = client.list(None, None).await.unwrap_err();
    assert!(matches!(err, SyncError::Config(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
