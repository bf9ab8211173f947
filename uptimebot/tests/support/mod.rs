//! テスト用の共通ダブル
//!
//! - `ScriptedProber`: URLごとに固定結果を返す（途中で差し替え可能）
//! - `RecordingNotifier`: 送信メッセージを記録する

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uptimebot::alert::{AlertMessage, AlertTemplate, Notifier};
use uptimebot::common::error::MonitorError;
use uptimebot::health::{Monitor, ProbeResult, Prober};
use uptimebot::registry::TargetList;

/// URLごとの結果を返すプローバー
#[derive(Default)]
pub struct ScriptedProber {
    results: Mutex<HashMap<String, ProbeResult>>,
    calls: Mutex<Vec<String>>,
    delay: Duration,
}

impl ScriptedProber {
    pub fn new(results: &[(&str, ProbeResult)]) -> Arc<Self> {
        Self::with_delay(results, Duration::ZERO)
    }

    pub fn with_delay(results: &[(&str, ProbeResult)], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(
                results
                    .iter()
                    .map(|(url, result)| (url.to_string(), *result))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
            delay,
        })
    }

    pub fn set(&self, url: &str, result: ProbeResult) {
        self.results.lock().unwrap().insert(url.to_string(), result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, url: &str) -> ProbeResult {
        self.calls.lock().unwrap().push(url.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.results
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or(ProbeResult::ProbeError)
    }
}

/// 送信内容を記録する通知ダブル
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<AlertMessage>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<AlertMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<(), MonitorError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            Err(MonitorError::Notify("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

pub fn template() -> AlertTemplate {
    AlertTemplate {
        from: "uptimebot@example.com".into(),
        to: "oncall@example.com".into(),
        subject: "Recommendation Service Failed".into(),
        body: "Recommendation service is down".into(),
    }
}

pub fn build_monitor(
    urls: &[&str],
    prober: Arc<dyn Prober>,
    notifier: Arc<dyn Notifier>,
    window: Duration,
) -> Monitor {
    let targets = TargetList::new(urls.iter().map(|u| u.to_string()).collect())
        .expect("test target list must not be empty");
    Monitor::new(targets, prober, notifier, template(), window)
}
