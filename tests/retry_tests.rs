//! Integration tests for transport-level retries.
//!
//! Faults are injected by delaying selected responses past the client's
//! per-attempt timeout.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chained_rest::{Api, ApiConfig, ApiError};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(200);
const FAULT_DELAY: Duration = Duration::from_millis(1000);

/// Mounts a responder that delays the calls listed in `slow_calls`
/// (0-based) past the attempt timeout and answers the others at once.
/// Returns the shared call counter.
async fn mount_flaky(server: &MockServer, slow_calls: &'static [u32]) -> Arc<AtomicU32> {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .respond_with(move |_: &Request| {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            let template = ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true}));
            if slow_calls.contains(&call) {
                template.set_delay(FAULT_DELAY)
            } else {
                template
            }
        })
        .mount(server)
        .await;

    calls
}

fn flaky_api(server: &MockServer, retries: u32) -> Api {
    let config = ApiConfig::builder(server.uri())
        .retries(retries)
        .timeout(ATTEMPT_TIMEOUT)
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap();
    Api::from_config(config).unwrap()
}

#[tokio::test]
async fn test_retrial_logic_with_fault_injection() {
    let server = MockServer::start().await;
    // First request: two timeouts then success. Second: one timeout.
    let calls = mount_flaky(&server, &[0, 1, 3]).await;
    let api = flaky_api(&server, 2);

    let mut total_retries = 0;
    for _ in 0..3 {
        if let Ok(response) = api.root().get(None).await {
            let header = response.header("X-Total-Retries").unwrap();
            total_retries += header.parse::<u32>().unwrap();
        }
    }

    assert!(total_retries >= 2);
    assert!(total_retries <= 6);
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_success_after_retries_reports_count() {
    let server = MockServer::start().await;
    let calls = mount_flaky(&server, &[0, 1]).await;
    let api = flaky_api(&server, 2);

    let response = api.res("users").get(None).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.total_retries(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_exhausted_budget_returns_last_transport_error() {
    let server = MockServer::start().await;
    let calls = mount_flaky(&server, &[0, 1, 2, 3, 4]).await;
    let api = flaky_api(&server, 2);

    let error = api.res("users").get(None).await.unwrap_err();

    match error {
        ApiError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected transport error, got {other:?}"),
    }
    // Budget of 2 means 3 attempts in total
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_zero_budget_sends_once() {
    let server = MockServer::start().await;
    let calls = mount_flaky(&server, &[0]).await;
    let api = flaky_api(&server, 0);

    let error = api.root().get(None).await.unwrap_err();

    assert!(error.is_transport());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig::builder(server.uri()).retries(3).build().unwrap();
    let api = Api::from_config(config).unwrap();

    let response = api.res("broken").get(None).await.unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.total_retries(), 0);
}

#[tokio::test]
async fn test_connection_refused_is_retried_then_returned() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let retry_delay = Duration::from_millis(50);
    let config = ApiConfig::builder(format!("http://{addr}"))
        .retries(2)
        .retry_delay(retry_delay)
        .build()
        .unwrap();
    let api = Api::from_config(config).unwrap();

    let started = Instant::now();
    let error = api.res("users").get(None).await.unwrap_err();

    match error {
        ApiError::Transport(e) => assert!(e.is_connect()),
        other => panic!("expected transport error, got {other:?}"),
    }
    // Two retries, each preceded by the fixed delay
    assert!(started.elapsed() >= retry_delay * 2);
}

#[tokio::test]
async fn test_retry_deadline_bounds_total_attempts() {
    let server = MockServer::start().await;
    let calls = mount_flaky(&server, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).await;

    let config = ApiConfig::builder(server.uri())
        .retries(10)
        .timeout(ATTEMPT_TIMEOUT)
        .retry_delay(Duration::from_millis(10))
        .retry_deadline(Duration::from_millis(500))
        .build()
        .unwrap();
    let api = Api::from_config(config).unwrap();

    let error = api.root().get(None).await.unwrap_err();

    assert!(error.is_transport());
    let attempts = calls.load(Ordering::SeqCst);
    assert!(attempts >= 2);
    assert!(attempts < 11);
}

#[tokio::test]
async fn test_retry_deadline_cuts_a_running_attempt() {
    let server = MockServer::start().await;
    mount_flaky(&server, &[0, 1, 2, 3]).await;

    // No per-attempt timeout: only the deadline limits the slow response
    let deadline = Duration::from_millis(300);
    let config = ApiConfig::builder(server.uri())
        .retries(3)
        .retry_delay(Duration::from_millis(10))
        .retry_deadline(deadline)
        .build()
        .unwrap();
    let api = Api::from_config(config).unwrap();

    let started = Instant::now();
    let error = api.root().get(None).await.unwrap_err();
    let elapsed = started.elapsed();

    match error {
        ApiError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(elapsed < deadline + Duration::from_millis(300), "took {elapsed:?}");
}

#[tokio::test]
async fn test_concurrent_requests_share_one_client() {
    let server = MockServer::start().await;
    let calls = mount_flaky(&server, &[]).await;
    let api = flaky_api(&server, 1);

    let handles: Vec<_> = (0..4_u64)
        .map(|id| {
            let user = api.res("users").id(id);
            tokio::spawn(async move { user.get(None).await })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.status(), 200);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
