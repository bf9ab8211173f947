//! Integration Test: 実HTTPプローブでの監視サイクル
//!
//! wiremockで各ターゲットを立て、HttpProber経由でサイクル全体を通す。

use std::sync::Arc;
use std::time::Duration;
use uptimebot::config::DEFAULT_USER_AGENT;
use uptimebot::health::{CycleOutcome, HttpProber};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{build_monitor, RecordingNotifier};

async fn target(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

fn prober() -> Arc<HttpProber> {
    Arc::new(HttpProber::new(Duration::from_secs(2), DEFAULT_USER_AGENT).unwrap())
}

/// A=503, B=503, C=500 → FleetDown → 通知1回
#[tokio::test]
async fn test_all_targets_down_sends_alert() {
    let a = target(503).await;
    let b = target(503).await;
    let c = target(500).await;
    let notifier = RecordingNotifier::new();

    let monitor = build_monitor(
        &[a.uri().as_str(), b.uri().as_str(), c.uri().as_str()],
        prober(),
        notifier.clone(),
        Duration::from_secs(30),
    );

    assert_eq!(monitor.run_cycle().await, CycleOutcome::AlertSent);
    assert_eq!(monitor.run_cycle().await, CycleOutcome::AlertSuppressed);

    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].body.contains(&a.uri()));
    assert!(messages[0].body.contains("Fallback targets unhealthy: 2/2"));
}

/// A=503, B=200 → PrimaryFlaky → 通知なし
#[tokio::test]
async fn test_healthy_fallback_means_primary_flaky() {
    let a = target(503).await;
    let b = target(200).await;
    let c = target(503).await;
    let notifier = RecordingNotifier::new();

    let monitor = build_monitor(
        &[a.uri().as_str(), b.uri().as_str(), c.uri().as_str()],
        prober(),
        notifier.clone(),
        Duration::from_secs(30),
    );

    assert_eq!(monitor.run_cycle().await, CycleOutcome::PrimaryFlaky);
    assert_eq!(notifier.count(), 0);
}

/// フォールバックのリダイレクトは異常扱い
#[tokio::test]
async fn test_redirecting_fallback_counts_as_unhealthy() {
    let a = target(503).await;
    let b = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "https://elsewhere.example.com/"),
        )
        .mount(&b)
        .await;
    let notifier = RecordingNotifier::new();

    let monitor = build_monitor(
        &[a.uri().as_str(), b.uri().as_str()],
        prober(),
        notifier.clone(),
        Duration::from_secs(30),
    );

    assert_eq!(monitor.run_cycle().await, CycleOutcome::AlertSent);
    assert_eq!(notifier.count(), 1);
}

/// 到達不能なフォールバックも異常扱い（fail-closed）
#[tokio::test]
async fn test_unreachable_fallback_counts_as_unhealthy() {
    let a = target(500).await;
    let notifier = RecordingNotifier::new();

    let monitor = build_monitor(
        &[a.uri().as_str(), "http://127.0.0.1:1/"],
        prober(),
        notifier.clone(),
        Duration::from_secs(30),
    );

    assert_eq!(monitor.run_cycle().await, CycleOutcome::AlertSent);
}

/// プライマリが正常ならフォールバックへはリクエストしない
#[tokio::test]
async fn test_healthy_primary_sends_no_fallback_requests() {
    let a = target(200).await;
    let b = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(0)
        .mount(&b)
        .await;
    let notifier = RecordingNotifier::new();

    let monitor = build_monitor(
        &[a.uri().as_str(), b.uri().as_str()],
        prober(),
        notifier.clone(),
        Duration::from_secs(30),
    );

    assert_eq!(monitor.run_cycle().await, CycleOutcome::PrimaryHealthy);
    assert_eq!(notifier.count(), 0);
    // `expect(0)` is verified when `b` is dropped
}
