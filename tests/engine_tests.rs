//! Integration tests for the traversal engine
//!
//! These tests use wiremock to stand up small link graphs and drive full
//! browsing sessions end-to-end.

use std::time::{Duration, Instant};
use wander::config::Config;
use wander::crawler::Engine;
use wander::StopReason;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at the given mock server
fn test_config(server: &MockServer) -> Config {
    Config {
        root_urls: vec![server.uri()],
        blacklisted_urls: vec![],
        max_depth: 5,
        min_sleep: 0,
        max_sleep: 1,
        timeout: Some(1),
        user_agents: vec!["WanderTest/1.0".to_string()],
    }
}

/// Counts recorded requests whose path matches
async fn requests_to(server: &MockServer, to: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == to)
        .count()
}

#[tokio::test]
async fn test_session_times_out_while_walking() {
    let server = MockServer::start().await;

    // Every page links to /a and /b, so the frontier is always replaced and
    // the walk keeps moving until the session clock runs out
    let body = format!(
        r#"<html><body><a href="{0}/a">a</a><a href="{0}/b">b</a></body></html>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let engine = Engine::new(test_config(&server)).unwrap();
    let reason = engine.run().await.unwrap();

    assert_eq!(reason, StopReason::Timeout);
    assert!(!server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_dead_end_link_is_visited_only_once() {
    let server = MockServer::start().await;

    let root_body = format!(
        r#"<html><body><a href="{}/leaf">leaf</a></body></html>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(root_body))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/leaf"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>end of the line</body></html>"))
        .mount(&server)
        .await;

    // The session timeout is polled only while a frontier is being walked,
    // and every cycle after the first dead-ends immediately, so this session
    // is ended by an explicit stop instead
    let mut config = test_config(&server);
    config.timeout = None;
    let engine = Engine::new(config).unwrap();
    let handle = engine.stop_handle();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.cancel();
    });

    let reason = engine.run().await.unwrap();

    assert_eq!(reason, StopReason::Interrupt);
    // The leaf yielded no links, was blacklisted, and never fetched again
    // even though the root kept advertising it
    assert_eq!(requests_to(&server, "/leaf").await, 1);
    assert!(requests_to(&server, "/").await >= 2);
}

#[tokio::test]
async fn test_walk_respects_depth_bound() {
    let server = MockServer::start().await;

    let root_body = format!(
        r#"<a href="{0}/a">a</a><a href="{0}/b">b</a>"#,
        server.uri()
    );
    let mid_body = format!(
        r#"<a href="{0}/c">c</a><a href="{0}/d">d</a>"#,
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(root_body))
        .mount(&server)
        .await;
    for page in ["/a", "/b"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(200).set_body_string(mid_body.clone()))
            .mount(&server)
            .await;
    }
    for page in ["/c", "/d"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(200).set_body_string("deep"))
            .mount(&server)
            .await;
    }

    let mut config = test_config(&server);
    config.max_depth = 1;
    let engine = Engine::new(config).unwrap();
    let reason = engine.run().await.unwrap();

    assert_eq!(reason, StopReason::Timeout);
    // Depth 1 allows visiting /a or /b; the links they advertise sit one
    // level too deep and must never be fetched
    assert_eq!(requests_to(&server, "/c").await, 0);
    assert_eq!(requests_to(&server, "/d").await, 0);
    assert!(requests_to(&server, "/a").await + requests_to(&server, "/b").await >= 1);
}

#[tokio::test]
async fn test_interrupt_stops_engine_during_slow_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow")
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.timeout = None;
    let engine = Engine::new(config).unwrap();
    let handle = engine.stop_handle();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.cancel();
    });

    let started = Instant::now();
    let reason = engine.run().await.unwrap();

    assert_eq!(reason, StopReason::Interrupt);
    // The stop must not wait out the 30 second response delay
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_failing_root_is_retried_not_blacklisted() {
    let server = MockServer::start().await;

    // The root body is not decodable text, which abandons the cycle but
    // leaves the root eligible for the next one
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0xfd]))
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.timeout = None;
    let engine = Engine::new(config).unwrap();
    let handle = engine.stop_handle();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.cancel();
    });

    let reason = engine.run().await.unwrap();

    assert_eq!(reason, StopReason::Interrupt);
    assert!(requests_to(&server, "/").await >= 2);
}
