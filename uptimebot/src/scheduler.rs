//! 定期実行スケジューラ
//!
//! 2本の独立したループを起動する。
//!
//! - プローブループ: `probe_interval`ごとに監視サイクルを実行（起動直後に1回目）
//! - リセットループ: `alert_cooldown`ごとにアラートゲートを無条件に再オープン
//!
//! 両ループが共有するのはアラートゲートと読み取り専用のターゲットリストだけ。
//! 停止は`ShutdownController`で協調的に行い、実行中のサイクルは完了まで走らせる。

use crate::config::MonitorConfig;
use crate::health::Monitor;
use crate::shutdown::ShutdownController;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

/// スケジュール設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Period of the probe loop
    pub probe_interval: Duration,
    /// Period of the reset loop
    pub alert_cooldown: Duration,
}

impl From<&MonitorConfig> for Schedule {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            probe_interval: config.probe_interval,
            alert_cooldown: config.alert_cooldown,
        }
    }
}

/// 定期実行スケジューラ
pub struct Scheduler {
    monitor: Arc<Monitor>,
    schedule: Schedule,
    shutdown: ShutdownController,
}

/// 起動済みループのハンドル
pub struct SchedulerHandle {
    probe_task: JoinHandle<()>,
    reset_task: JoinHandle<()>,
}

impl Scheduler {
    /// 新しいスケジューラを作成
    pub fn new(monitor: Arc<Monitor>, schedule: Schedule, shutdown: ShutdownController) -> Self {
        Self {
            monitor,
            schedule,
            shutdown,
        }
    }

    /// 両ループをバックグラウンドで開始
    pub fn start(self) -> SchedulerHandle {
        info!(
            probe_interval_secs = self.schedule.probe_interval.as_secs(),
            alert_cooldown_secs = self.schedule.alert_cooldown.as_secs(),
            "Scheduler started"
        );

        let probe_task = tokio::spawn(probe_loop(
            self.monitor.clone(),
            self.schedule.probe_interval,
            self.shutdown.clone(),
        ));
        let reset_task = tokio::spawn(reset_loop(
            self.monitor,
            self.schedule.alert_cooldown,
            self.shutdown,
        ));

        SchedulerHandle {
            probe_task,
            reset_task,
        }
    }
}

impl SchedulerHandle {
    /// 両ループの終了を待つ
    ///
    /// `ShutdownController::request_shutdown`の後に呼ぶ。
    pub async fn join(self) {
        for (name, task) in [("probe", self.probe_task), ("reset", self.reset_task)] {
            if let Err(e) = task.await {
                error!(task = name, "Scheduler task join error: {}", e);
            }
        }
        info!("Scheduler stopped");
    }
}

/// プローブループ
///
/// `interval()`は初回即時にtickするため、起動直後に1回目のサイクルが走る。
async fn probe_loop(monitor: Arc<Monitor>, period: Duration, shutdown: ShutdownController) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = timer.tick() => {
                let outcome = monitor.run_cycle().await;
                debug!(outcome = outcome.as_str(), "Probe cycle completed");
            }
            _ = shutdown.wait() => {
                debug!("Probe loop shutting down");
                break;
            }
        }
    }
}

/// リセットループ
///
/// 初回のリセットは起動から1周期後。
async fn reset_loop(monitor: Arc<Monitor>, period: Duration, shutdown: ShutdownController) {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = timer.tick() => {
                monitor.reset_alert_gate();
            }
            _ = shutdown.wait() => {
                debug!("Reset loop shutting down");
                break;
            }
        }
    }
}
