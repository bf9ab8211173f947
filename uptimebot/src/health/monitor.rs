//! 監視サイクル
//!
//! `Monitor`はターゲットリスト・クロスチェック評価器・デバウンサーを所有し、
//! 1回分のプローブサイクルを実行する。サイクル内のエラーは外へ伝播させず、
//! ログに残して`CycleOutcome`に畳み込む。

use super::cross_check::{CrossCheckEvaluator, Verdict};
use super::probe::{ProbeResult, Prober};
use crate::alert::{AlertDebouncer, AlertOutcome, AlertTemplate, Notifier};
use crate::registry::TargetList;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 1回の監視サイクルの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Primary answered with status < 400.
    PrimaryHealthy,
    /// Primary probe hit a transport error; no cross-check.
    PrimaryProbeFailed,
    /// Primary unhealthy but no fallback targets are configured.
    NoFallbacks,
    /// Cross-check found a healthy fallback.
    PrimaryFlaky,
    /// Cross-check reached no fallback within the window.
    Inconclusive,
    /// Fleet down and the alert went out.
    AlertSent,
    /// Fleet down but an alert was already sent in this window.
    AlertSuppressed,
    /// Fleet down and the notifier failed.
    AlertFailed,
}

impl CycleOutcome {
    /// ログ用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryHealthy => "primary_healthy",
            Self::PrimaryProbeFailed => "primary_probe_failed",
            Self::NoFallbacks => "no_fallbacks",
            Self::PrimaryFlaky => "primary_flaky",
            Self::Inconclusive => "inconclusive",
            Self::AlertSent => "alert_sent",
            Self::AlertSuppressed => "alert_suppressed",
            Self::AlertFailed => "alert_failed",
        }
    }
}

impl From<AlertOutcome> for CycleOutcome {
    fn from(outcome: AlertOutcome) -> Self {
        match outcome {
            AlertOutcome::Sent => Self::AlertSent,
            AlertOutcome::Suppressed => Self::AlertSuppressed,
            AlertOutcome::SendFailed => Self::AlertFailed,
        }
    }
}

/// アップタイムモニター
pub struct Monitor {
    targets: TargetList,
    prober: Arc<dyn Prober>,
    evaluator: CrossCheckEvaluator,
    debouncer: AlertDebouncer,
    template: AlertTemplate,
}

impl Monitor {
    /// 新しいモニターを作成
    pub fn new(
        targets: TargetList,
        prober: Arc<dyn Prober>,
        notifier: Arc<dyn Notifier>,
        template: AlertTemplate,
        cross_check_window: Duration,
    ) -> Self {
        Self {
            targets,
            evaluator: CrossCheckEvaluator::new(prober.clone(), cross_check_window),
            prober,
            debouncer: AlertDebouncer::new(notifier),
            template,
        }
    }

    /// 監視対象
    pub fn targets(&self) -> &TargetList {
        &self.targets
    }

    /// アラートゲート
    pub fn debouncer(&self) -> &AlertDebouncer {
        &self.debouncer
    }

    /// 1回分の監視サイクルを実行
    ///
    /// プライマリがUnhealthyのときだけクロスチェックを行い、
    /// FleetDown判定のときだけデバウンサーに通知を依頼する。
    pub async fn run_cycle(&self) -> CycleOutcome {
        let primary = self.targets.primary();

        match self.prober.probe(primary).await {
            ProbeResult::Healthy => {
                info!(url = %primary, "Primary target healthy");
                return CycleOutcome::PrimaryHealthy;
            }
            ProbeResult::ProbeError => {
                warn!(
                    url = %primary,
                    "Primary probe failed at transport level; skipping cross-check"
                );
                return CycleOutcome::PrimaryProbeFailed;
            }
            ProbeResult::Unhealthy => {}
        }

        let fallbacks = self.targets.fallbacks();
        if fallbacks.is_empty() {
            warn!(
                url = %primary,
                "Primary target unhealthy but no fallback targets configured; not alerting"
            );
            return CycleOutcome::NoFallbacks;
        }

        warn!(
            url = %primary,
            fallbacks = fallbacks.len(),
            "Primary target unhealthy; cross-checking fallback targets"
        );
        let report = self.evaluator.evaluate(fallbacks).await;

        match report.verdict {
            Verdict::PrimaryFlaky => {
                warn!(
                    url = %primary,
                    "Fallback targets are up; the problem looks isolated to the primary"
                );
                CycleOutcome::PrimaryFlaky
            }
            Verdict::Inconclusive => {
                warn!(
                    url = %primary,
                    "No fallback target reached within the cross-check window"
                );
                CycleOutcome::Inconclusive
            }
            Verdict::FleetDown => {
                warn!(
                    url = %primary,
                    unhealthy = report.evidence.unhealthy(),
                    "All reached targets are down"
                );
                let message = self.template.render(primary, &report.evidence, Utc::now());
                self.debouncer.try_alert(&message).await.into()
            }
        }
    }

    /// アラートゲートを再オープン（リセットループから呼ばれる）
    pub fn reset_alert_gate(&self) -> bool {
        self.debouncer.reset()
    }
}
