//! アラートデバウンサー
//!
//! クールダウン期間ごとに最大1回だけ通知を許可するゲート。
//! 状態はOpen/Closedの2つのみで、Closed→Openはスケジューラの`reset()`だけが行う。

use super::notifier::{AlertMessage, Notifier};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// `try_alert`の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Gate was open; the notifier accepted the message.
    Sent,
    /// Gate was closed; nothing was sent.
    Suppressed,
    /// Gate was open but the notifier failed. The gate stays closed.
    SendFailed,
}

impl AlertOutcome {
    /// 通知が送信されたか
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// アラートデバウンサー
pub struct AlertDebouncer {
    notifier: Arc<dyn Notifier>,
    /// true = alert already attempted in the current window
    closed: AtomicBool,
    /// Alerts suppressed since the last reset
    suppressed: AtomicU64,
}

impl AlertDebouncer {
    /// ゲートが開いた状態で作成
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            closed: AtomicBool::new(false),
            suppressed: AtomicU64::new(0),
        }
    }

    /// ゲートが開いていれば通知を送信し、ゲートを閉じる
    ///
    /// ゲートの獲得はcompare-exchangeで行うため、並行呼び出しでも送信は1回だけ。
    /// 送信失敗時もゲートは閉じたまま（送信試行は消費済みとみなす）。
    pub async fn try_alert(&self, message: &AlertMessage) -> AlertOutcome {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            let suppressed = self.suppressed.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(
                suppressed,
                "Alert suppressed: notification already sent in the current window"
            );
            return AlertOutcome::Suppressed;
        }

        match self.notifier.send(message).await {
            Ok(()) => {
                info!(to = %message.to, subject = %message.subject, "Alert notification sent");
                AlertOutcome::Sent
            }
            Err(e) => {
                error!(
                    to = %message.to,
                    error = %e,
                    "Failed to send alert notification; gate stays closed until next reset"
                );
                AlertOutcome::SendFailed
            }
        }
    }

    /// ゲートを無条件に開く
    ///
    /// 閉じていた場合は`true`を返す。
    pub fn reset(&self) -> bool {
        let was_closed = self.closed.swap(false, Ordering::AcqRel);
        let suppressed = self.suppressed.swap(0, Ordering::Relaxed);

        if was_closed {
            info!(suppressed, "Alert gate reopened");
        } else {
            debug!("Alert gate reset (already open)");
        }
        was_closed
    }

    /// ゲートが開いているか
    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
    }

    /// 現在のウィンドウで抑止された通知数
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }
}
