//! クロスチェック評価
//!
//! プライマリの異常を検知した後、フォールバックターゲットを期限付きで巡回し、
//! 「プライマリだけの不調」か「フリート全体のダウン」かを判定する。
//!
//! 期限は締め切りであってキャンセルではない。実行中のプローブは
//! 自身のタイムアウトまで走るが、期限後に新しいプローブは開始しない。

use super::probe::{ProbeResult, Prober};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// クロスチェックの判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// At least one reached fallback looked healthy.
    PrimaryFlaky,
    /// Every reached fallback was unhealthy, and at least one was reached.
    FleetDown,
    /// The window expired before any fallback was reached.
    Inconclusive,
}

impl Verdict {
    /// ログ用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryFlaky => "primary_flaky",
            Self::FleetDown => "fleet_down",
            Self::Inconclusive => "inconclusive",
        }
    }
}

/// 1回のクロスチェックで収集した証拠
///
/// 呼び出しごとに新規作成し、呼び出し間で共有しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    /// fallback URL → observed unhealthy
    observed: HashMap<String, bool>,
    /// Number of fallback probes performed within the window.
    checked: usize,
}

impl Evidence {
    fn record(&mut self, url: &str, result: ProbeResult) {
        // ProbeErrorも「正常と確認できない」として異常側に数える
        self.observed.insert(url.to_string(), !result.is_healthy());
        self.checked += 1;
    }

    /// プローブ実行回数
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// 到達したフォールバック数（重複URLは1件）
    pub fn reached(&self) -> usize {
        self.observed.len()
    }

    /// 異常と記録されたフォールバック数
    pub fn unhealthy(&self) -> usize {
        self.observed.values().filter(|unhealthy| **unhealthy).count()
    }

    /// 指定URLの観測結果（未到達なら`None`）
    pub fn is_unhealthy(&self, url: &str) -> Option<bool> {
        self.observed.get(url).copied()
    }

    fn was_reached(&self, url: &str) -> bool {
        self.observed.contains_key(url)
    }

    /// 証拠から判定を導出
    pub fn verdict(&self) -> Verdict {
        let reached = self.reached();
        if reached == 0 {
            Verdict::Inconclusive
        } else if self.unhealthy() == reached {
            Verdict::FleetDown
        } else {
            Verdict::PrimaryFlaky
        }
    }
}

/// クロスチェック結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCheckReport {
    /// Evidence gathered during the window.
    pub evidence: Evidence,
    /// Derived verdict.
    pub verdict: Verdict,
    /// Wall time spent evaluating.
    pub elapsed: Duration,
}

/// クロスチェック評価器
#[derive(Clone)]
pub struct CrossCheckEvaluator {
    prober: Arc<dyn Prober>,
    window: Duration,
}

impl CrossCheckEvaluator {
    /// 新しい評価器を作成
    pub fn new(prober: Arc<dyn Prober>, window: Duration) -> Self {
        Self { prober, window }
    }

    /// フォールバックターゲットを巡回して判定する
    ///
    /// 全ターゲットに1回ずつ到達するか、期限に達した時点で終了する。
    /// 期限チェックは各プローブの直前に行う。
    pub async fn evaluate(&self, fallbacks: &[String]) -> CrossCheckReport {
        let started = Instant::now();
        let deadline = started + self.window;
        let mut evidence = Evidence::default();

        info!(
            fallbacks = fallbacks.len(),
            window_secs = self.window.as_secs(),
            "Cross-checking fallback targets"
        );

        'passes: while fallbacks.iter().any(|url| !evidence.was_reached(url)) {
            for url in fallbacks {
                if evidence.was_reached(url) {
                    continue;
                }
                if Instant::now() >= deadline {
                    warn!(
                        reached = evidence.reached(),
                        total = fallbacks.len(),
                        "Cross-check window expired"
                    );
                    break 'passes;
                }

                let result = self.prober.probe(url).await;
                debug!(%url, result = result.as_str(), "Fallback probed");
                evidence.record(url, result);
            }
        }

        let verdict = evidence.verdict();
        let elapsed = started.elapsed();

        info!(
            verdict = verdict.as_str(),
            unhealthy = evidence.unhealthy(),
            reached = evidence.reached(),
            checked = evidence.checked(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Cross-check finished"
        );

        CrossCheckReport {
            evidence,
            verdict,
            elapsed,
        }
    }
}
