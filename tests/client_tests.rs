//! Request engine integration tests
//!
//! Exercise the retry/backoff/timeout behavior and header handling against
//! a mock HTTP server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relay_cli::models::emails::SendEmailRequest;
use relay_cli::models::ListParams;
use relay_cli::services::client::{Client, ClientConfig, RateLimit};

fn engine(server: &MockServer, max_retries: u32) -> Client {
    Client::new(
        ClientConfig::new("re_test123")
            .with_base_url(server.uri())
            .with_timeout_ms(2000)
            .with_max_retries(max_retries),
    )
    .expect("client")
}

fn send_request() -> SendEmailRequest {
    let mut request =
        SendEmailRequest::new("me@example.com", vec!["you@example.com".into()], "hello");
    request.text = Some("hello there".to_string());
    request
}

#[tokio::test]
async fn success_on_first_attempt_performs_no_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test123"))
        .and(header("content-type", "application/json"))
        .and(header(
            "user-agent",
            format!("relay-cli/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = engine(&server, 3)
        .send_email(&send_request())
        .await
        .expect("send");

    assert_eq!(response.data.id, "abc");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_clone = attempts.clone();
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
            let current = attempts_clone.fetch_add(1, Ordering::SeqCst);
            if current < 2 {
                ResponseTemplate::new(500).set_body_json(json!({"message": "internal"}))
            } else {
                ResponseTemplate::new(200).set_body_json(json!({"id": "xyz"}))
            }
        })
        .expect(3)
        .mount(&server)
        .await;

    let started = Instant::now();
    let response = engine(&server, 3)
        .send_email(&send_request())
        .await
        .expect("send");
    let elapsed = started.elapsed();

    assert_eq!(response.data.id, "xyz");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    // Two backoff sleeps: 1000ms then 2000ms
    assert!(elapsed >= Duration::from_millis(3000), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(6000), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn exhausted_retry_budget_surfaces_the_last_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "overloaded"})))
        .expect(3)
        .mount(&server)
        .await;

    let err = engine(&server, 3)
        .send_email(&send_request())
        .await
        .expect_err("should fail");

    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "overloaded");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn single_attempt_budget_means_no_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = engine(&server, 1)
        .send_email(&send_request())
        .await
        .expect_err("should fail");

    assert_eq!(err.status, Some(502));
    assert!(started.elapsed() < Duration::from_millis(1000));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn client_errors_are_never_retried() {
    for status in [400u16, 401, 403, 404, 429] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({"message": "client error"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = engine(&server, 3)
            .send_email(&send_request())
            .await
            .expect_err("should fail");

        assert_eq!(err.status, Some(status));
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "status {} was retried", status);
    }
}

#[tokio::test]
async fn not_found_error_carries_message_and_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails/em_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = engine(&server, 3)
        .get_email("em_missing")
        .await
        .expect_err("should fail");

    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "not found");
    assert_eq!(err.details, Some(json!({"message": "not found"})));
}

#[tokio::test]
async fn rate_limited_response_fails_fast_despite_transience() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("ratelimit-limit", "10")
                .insert_header("ratelimit-remaining", "0")
                .insert_header("ratelimit-reset", "1700000000")
                .set_body_json(json!({"message": "rate limited"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let err = engine(&server, 3)
        .send_email(&send_request())
        .await
        .expect_err("should fail");

    assert_eq!(err.status, Some(429));
    assert_eq!(err.message, "rate limited");
    // No retry, so no backoff sleep either
    assert!(started.elapsed() < Duration::from_millis(1000));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn rate_limit_snapshot_attached_when_all_headers_present() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ratelimit-limit", "10")
                .insert_header("ratelimit-remaining", "0")
                .insert_header("ratelimit-reset", "1700000000")
                .set_body_json(json!({"id": "abc"})),
        )
        .mount(&server)
        .await;

    let response = engine(&server, 3)
        .send_email(&send_request())
        .await
        .expect("send");

    assert_eq!(
        response.rate_limit,
        Some(RateLimit {
            limit: 10,
            remaining: 0,
            reset: 1700000000
        })
    );
}

#[tokio::test]
async fn missing_rate_limit_header_means_no_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ratelimit-limit", "10")
                .insert_header("ratelimit-reset", "1700000000")
                .set_body_json(json!({"id": "abc"})),
        )
        .mount(&server)
        .await;

    let response = engine(&server, 3)
        .send_email(&send_request())
        .await
        .expect("send");

    assert_eq!(response.rate_limit, None);
}

#[tokio::test]
async fn non_json_error_body_yields_absent_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = engine(&server, 1)
        .send_email(&send_request())
        .await
        .expect_err("should fail");

    assert_eq!(err.status, Some(503));
    assert_eq!(err.message, "API request failed with status 503");
    assert!(err.details.is_none());
}

#[tokio::test]
async fn timeout_produces_statusless_error_with_timeout_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "late"}))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let client = Client::new(
        ClientConfig::new("re_test123")
            .with_base_url(server.uri())
            .with_timeout_ms(200)
            .with_max_retries(1),
    )
    .unwrap();

    let err = client
        .send_email(&send_request())
        .await
        .expect_err("should time out");

    assert_eq!(err.status, None);
    assert_eq!(err.details, Some(json!({"timeout_ms": 200})));
    assert!(err.message.contains("200"));
}

#[tokio::test]
async fn timeout_is_retried_under_the_same_budget() {
    let server = MockServer::start().await;
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_clone = attempts.clone();
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
            let current = attempts_clone.fetch_add(1, Ordering::SeqCst);
            if current == 0 {
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "slow"}))
                    .set_delay(Duration::from_millis(800))
            } else {
                ResponseTemplate::new(200).set_body_json(json!({"id": "fast"}))
            }
        })
        .mount(&server)
        .await;

    let client = Client::new(
        ClientConfig::new("re_test123")
            .with_base_url(server.uri())
            .with_timeout_ms(300)
            .with_max_retries(2),
    )
    .unwrap();

    let response = client.send_email(&send_request()).await.expect("send");
    assert_eq!(response.data.id, "fast");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn connection_failures_are_retried_then_surfaced_without_status() {
    // Bind a port, then release it so requests fail with ECONNREFUSED
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(
        ClientConfig::new("re_test123")
            .with_base_url(format!("http://{}", addr))
            .with_timeout_ms(1000)
            .with_max_retries(2),
    )
    .unwrap();

    let started = Instant::now();
    let err = client
        .get_email("em_1")
        .await
        .expect_err("should fail to connect");

    assert_eq!(err.status, None);
    // One backoff sleep between the two attempts
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test]
async fn list_query_parameters_are_sent_only_when_supplied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .and(query_param("limit", "10"))
        .and(query_param("cursor", "cur_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let response = engine(&server, 3)
        .list_emails(&ListParams::new(Some(10), Some("cur_abc".to_string())))
        .await
        .expect("list");
    assert!(response.data.data.is_empty());
}

#[tokio::test]
async fn omitted_list_parameters_are_not_sent_as_empty_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    engine(&server, 3)
        .list_emails(&ListParams::default())
        .await
        .expect("list");
}

#[tokio::test]
async fn batch_send_posts_an_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails/batch"))
        .and(wiremock::matchers::body_json(json!([
            {"from": "me@example.com", "to": ["you@example.com"], "subject": "hello", "text": "hello there"}
        ])))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "em_1"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = engine(&server, 3)
        .send_batch(&[send_request()])
        .await
        .expect("batch");
    assert_eq!(response.data.data[0].id, "em_1");
}

#[tokio::test]
async fn delete_returns_the_deletion_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/domains/dom_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "dom_1", "deleted": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = engine(&server, 3).delete_domain("dom_1").await.expect("delete");
    assert_eq!(response.data.id, "dom_1");
    assert!(response.data.deleted);
}

#[tokio::test]
async fn contact_paths_are_scoped_to_the_audience() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/audiences/aud_1/contacts/con_9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "con_9", "email": "you@example.com"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = engine(&server, 3)
        .get_contact("aud_1", "con_9")
        .await
        .expect("get contact");
    assert_eq!(response.data.email, "you@example.com");
}
