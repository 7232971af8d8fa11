use std::sync::Arc;
use std::time::Duration;

use medassist_core::config::{ClientConfig, FailureMessages};
use medassist_core::types::{RequestState, Role};
use medassist_engine::client::{ConversationClient, ExchangeOutcome};
use medassist_engine::error::{ExchangeError, FailureKind};
use medassist_engine::view::MemoryView;
use medassist_runtime::runtime_client::build_client_from_config;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> (ConversationClient, Arc<MemoryView>) {
    let mut cfg = ClientConfig::new(server.uri());
    cfg.timeouts.request_ms = 2_000;
    let view = Arc::new(MemoryView::default());
    let client = build_client_from_config(&cfg, view.clone()).unwrap();
    (client, view)
}

fn summary(client: &ConversationClient) -> Vec<(Role, String)> {
    client
        .transcript()
        .into_iter()
        .map(|e| (e.role, e.text))
        .collect()
}

#[tokio::test]
async fn chat_reply_is_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Hello"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, view) = client_for(&server);
    let outcome = client.submit("hi").await;

    assert_eq!(outcome, ExchangeOutcome::Replied);
    assert_eq!(
        summary(&client),
        vec![
            (Role::User, "hi".to_string()),
            (Role::Assistant, "Hello".to_string())
        ]
    );
    assert_eq!(view.states(), vec![RequestState::Pending, RequestState::Idle]);
}

#[tokio::test]
async fn blank_input_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    assert_eq!(client.submit("   ").await, ExchangeOutcome::Skipped);
    assert!(client.transcript().is_empty());
}

#[tokio::test]
async fn server_error_becomes_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Internal server error"})))
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    let outcome = client.submit("hi").await;

    assert_eq!(outcome, ExchangeOutcome::Failed(FailureKind::Server));
    assert_eq!(
        summary(&client),
        vec![
            (Role::User, "hi".to_string()),
            (Role::SystemError, FailureMessages::default().chat)
        ]
    );
    assert_eq!(client.state(), RequestState::Idle);
}

#[tokio::test]
async fn rate_limited_and_malformed_bodies_are_server_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "fast"})))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": "Too many requests."})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "html"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    assert_eq!(
        client.submit("fast").await,
        ExchangeOutcome::Failed(FailureKind::Server)
    );
    assert_eq!(
        client.submit("html").await,
        ExchangeOutcome::Failed(FailureKind::Server)
    );
    assert_eq!(client.transcript().len(), 4);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    // Port 9 (discard) is closed on test hosts.
    let cfg = ClientConfig::new("http://127.0.0.1:9");
    let client = build_client_from_config(&cfg, Arc::new(MemoryView::default())).unwrap();

    let outcome = client.submit("hi").await;

    assert_eq!(outcome, ExchangeOutcome::Failed(FailureKind::Network));
    assert_eq!(client.transcript()[1].role, Role::SystemError);
    assert_eq!(client.state(), RequestState::Idle);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"reply": "late"}))
                .set_delay(Duration::from_millis(1_000)),
        )
        .mount(&server)
        .await;

    let mut cfg = ClientConfig::new(server.uri());
    cfg.timeouts.request_ms = 100;
    let client = build_client_from_config(&cfg, Arc::new(MemoryView::default())).unwrap();

    let outcome = client.submit("hi").await;

    assert_eq!(outcome, ExchangeOutcome::Failed(FailureKind::Network));
    assert_eq!(client.state(), RequestState::Idle);
}

#[tokio::test]
async fn blank_image_query_posts_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate_image"))
        .and(body_json(json!({"query": "medical diagram"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "explanation": "X",
            "imageUrl": "http://i/1.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    let outcome = client.request_image("").await;

    assert_eq!(outcome, ExchangeOutcome::Replied);
    let transcript = client.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].text, "Diagram Explanation: X");
    assert_eq!(
        transcript[0].attachment.as_ref().map(|i| i.url.as_str()),
        Some("http://i/1.png")
    );
}

#[tokio::test]
async fn image_failure_uses_image_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate_image"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    client.request_image("brain").await;

    assert_eq!(
        summary(&client),
        vec![(Role::SystemError, FailureMessages::default().image)]
    );
}

#[tokio::test]
async fn instant_answer_sends_q_and_renders_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/instant_answer"))
        .and(query_param("q", "is coffee bad?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "In moderation it is fine.",
            "source": "Sources: ChatGPT, Google Search",
            "timestamp": 1700000000.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    client.ask_instant("is coffee bad?").await;

    assert_eq!(
        summary(&client),
        vec![
            (Role::User, "is coffee bad?".to_string()),
            (
                Role::Assistant,
                "In moderation it is fine.\n\nSources: ChatGPT, Google Search".to_string()
            )
        ]
    );
}

#[tokio::test]
async fn articles_filter_by_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("tag", "nutrition"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "items": [{
                "title": "Eating for heart health",
                "created_at": "2024-03-10",
                "tags": ["nutrition", "heart"],
                "summary": "Fibre, fats and salt.",
                "slug": "eating-for-heart-health"
            }]
        })))
        .mount(&server)
        .await;

    let (client, view) = client_for(&server);
    let list = client.fetch_articles(Some("nutrition")).await.unwrap();

    assert_eq!(list.count, 1);
    assert_eq!(list.items[0].tags, vec!["nutrition", "heart"]);
    assert!(client.transcript().is_empty());
    assert!(view.events().is_empty());
}

#[tokio::test]
async fn articles_error_is_returned_to_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    let err = client.fetch_articles(None).await.unwrap_err();

    match err {
        ExchangeError::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn health_check_reads_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": 1700000000.0,
            "version": "2.0.0"
        })))
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    let health = client.check_health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.version.as_deref(), Some("2.0.0"));
}

#[tokio::test]
async fn long_error_body_is_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(4_096)))
        .mount(&server)
        .await;

    let (client, _view) = client_for(&server);
    let err = client.fetch_articles(None).await.unwrap_err();

    match err {
        ExchangeError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body.len(), 512);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
