//! End-to-end tests against the live mock Graph server.
//!
//! # Design
//! Starts `mock-graph` on a random port, then drives `OutlookClient` with
//! the real `ureq` transport. Covers the pipeline as a caller sees it:
//! composed URL and headers on the wire, empty-body success, and status
//! classification.

use std::net::SocketAddr;

use mock_graph::Echo;
use outlook_core::{ApiError, ClientConfiguration, ErrorKind, HttpMethod, OutlookClient, QueryOptions, RequestSpec};
use serde_json::json;

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_graph::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> OutlookClient {
    let config = ClientConfiguration::default()
        .with_host(format!("http://{addr}"))
        .with_token("test-token");
    OutlookClient::new(config).unwrap()
}

fn echo(client: &OutlookClient, spec: &RequestSpec) -> Echo {
    let value = client.perform_request(spec).unwrap().unwrap();
    serde_json::from_value(value).unwrap()
}

#[test]
fn list_contacts_with_paging_and_sort() {
    let client = client_for(start_server());
    let spec = RequestSpec::get("/me/contacts").query(QueryOptions::new().top(30).skip(0).order_by("DisplayName", "ASC"));
    let value = client.perform_request(&spec).unwrap();
    assert_eq!(value, Some(json!({"value": []})));
}

#[test]
fn delete_with_no_content_yields_none() {
    let client = client_for(start_server());
    let value = client.perform_request(&RequestSpec::delete("/me/messages/123")).unwrap();
    assert_eq!(value, None);
}

#[test]
fn throttled_request_is_rate_limit_error() {
    let addr = start_server();
    let client = client_for(addr);
    let err = client.perform_request(&RequestSpec::get("/status/429")).unwrap_err();
    let response = err.as_response().expect("response error");
    assert_eq!(response.kind, ErrorKind::RateLimitError);
    assert_eq!(response.status, 429);
    assert_eq!(response.method, HttpMethod::Get);
    assert_eq!(response.url, format!("http://{addr}/v1.0/status/429"));
    assert_eq!(response.graph_error_code().as_deref(), Some("TooManyRequests"));
}

#[test]
fn not_found_distinguishes_mailbox_marker() {
    let client = client_for(start_server());

    let spec = RequestSpec::get("/status/404").param("code", "MailboxNotEnabledForRESTAPI");
    let err = client.perform_request(&spec).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::MailboxNotEnabled));

    let err = client.perform_request(&RequestSpec::get("/me/contacts/missing")).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::RecordNotFound));
}

#[test]
fn gone_distinguishes_sync_state_marker() {
    let client = client_for(start_server());

    let spec = RequestSpec::get("/status/410").param("code", "SyncStateNotFound");
    assert_eq!(client.perform_request(&spec).unwrap_err().kind(), Some(ErrorKind::SyncStateInvalid));

    let err = client.perform_request(&RequestSpec::get("/status/410")).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::ClientError));
}

#[test]
fn expired_token_is_authorization_error_and_refresh_recovers() {
    let client = client_for(start_server());
    client.set_authentication_token(mock_graph::EXPIRED_TOKEN);
    let err = client.perform_request(&RequestSpec::get("/me/contacts")).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::AuthorizationError));

    client.set_authentication_token("fresh-token");
    assert!(client.perform_request(&RequestSpec::get("/me/contacts")).is_ok());
}

#[test]
fn wire_headers_carry_defaults_and_fresh_correlation_ids() {
    let client = client_for(start_server());
    let spec = RequestSpec::get("/echo").query(QueryOptions::new().select(["A", "B", "C"]));

    let first = echo(&client, &spec);
    let second = echo(&client, &spec);

    assert_eq!(first.method, "GET");
    assert_eq!(first.query.as_deref(), Some("$select=A%2CB%2CC"));
    assert_eq!(first.headers["authorization"], "Bearer test-token");
    assert_eq!(first.headers["accept"], "application/json");
    assert_eq!(first.headers["return-client-request-id"], "true");
    assert!(first.headers["user-agent"].starts_with("outlook-core/"));
    assert_ne!(first.headers["client-request-id"], second.headers["client-request-id"]);
}

#[test]
fn upload_sends_raw_bytes_with_caller_content_type() {
    let client = client_for(start_server());
    let spec = RequestSpec::put("/echo").upload("text/plain", b"hello drive".to_vec());
    let seen = echo(&client, &spec);
    assert_eq!(seen.method, "PUT");
    assert_eq!(seen.headers["content-type"], "text/plain");
    assert_eq!(seen.body, "hello drive");
}

#[test]
fn caller_header_overrides_default_on_the_wire() {
    let client = client_for(start_server());
    let spec = RequestSpec::post("/echo")
        .json(json!({"a": 1}))
        .header("Accept", "application/xml");
    let seen = echo(&client, &spec);
    assert_eq!(seen.headers["accept"], "application/xml");
    assert_eq!(seen.headers["content-type"], "application/json");
    assert_eq!(serde_json::from_str::<serde_json::Value>(&seen.body).unwrap(), json!({"a": 1}));
}

#[test]
fn contact_lifecycle_through_facade() {
    let client = client_for(start_server());

    let created = client
        .create_contact(json!({"GivenName": "Pavel", "Surname": "Bansky"}), None, None)
        .unwrap()
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let fetched = client.get_contact_by_id(&id, &[], None).unwrap().unwrap();
    assert_eq!(fetched["GivenName"], "Pavel");

    let updated = client.update_contact(&id, json!({"Surname": "Smith"}), None).unwrap().unwrap();
    assert_eq!(updated["Surname"], "Smith");

    let page = client.get_contacts(&QueryOptions::new().top(10), None).unwrap().unwrap();
    assert_eq!(page["value"].as_array().unwrap().len(), 1);

    assert_eq!(client.delete_contact(&id, None).unwrap(), None);

    let err = client.get_contact_by_id(&id, &[], None).unwrap_err();
    assert!(matches!(err, ApiError::Response(ref e) if e.kind == ErrorKind::RecordNotFound));
}

#[test]
fn send_message_returns_none_on_accepted() {
    let client = client_for(start_server());
    let sent = client.send_message(json!({"Subject": "Hi"}), true, None).unwrap();
    assert_eq!(sent, None);
}

#[test]
fn redirect_is_returned_not_followed() {
    let client = client_for(start_server());
    let value = client.perform_request(&RequestSpec::get("/redirect")).unwrap();
    assert_eq!(value, None);
}

#[test]
fn non_utf8_success_body_is_deserialization_error() {
    let client = client_for(start_server());
    let err = client.perform_request(&RequestSpec::get("/binary")).unwrap_err();
    assert!(matches!(err, ApiError::Deserialization(_)), "{err:?}");
}

#[test]
fn unreachable_host_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.perform_request(&RequestSpec::get("/me")).unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
}
