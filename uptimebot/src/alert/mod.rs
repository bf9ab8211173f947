//! アラート通知
//!
//! - `debouncer`: クールダウン期間内の重複通知を抑止するゲート
//! - `notifier`: メール送信（SMTP）
//!
//! ゲートの再オープンはスケジューラのリセットループだけが行う。
//! プローブ成功ではゲートは開かない。

pub mod debouncer;
pub mod notifier;

pub use debouncer::{AlertDebouncer, AlertOutcome};
pub use notifier::{AlertMessage, Notifier, SmtpNotifier};

use crate::config::SmtpConfig;
use crate::health::cross_check::Evidence;
use chrono::{DateTime, Utc};

/// アラートメールのテンプレート
///
/// 起動時の設定から作り、ダウン検知ごとに`render`で本文を組み立てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertTemplate {
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Operator-supplied body text
    pub body: String,
}

impl From<&SmtpConfig> for AlertTemplate {
    fn from(config: &SmtpConfig) -> Self {
        Self {
            from: config.from.clone(),
            to: config.to.clone(),
            subject: config.subject.clone(),
            body: config.body.clone(),
        }
    }
}

impl AlertTemplate {
    /// ダウン検知の詳細を付けて送信メッセージを組み立てる
    pub fn render(
        &self,
        primary: &str,
        evidence: &Evidence,
        detected_at: DateTime<Utc>,
    ) -> AlertMessage {
        let mut body = self.body.trim_end().to_string();
        if !body.is_empty() {
            body.push_str("\n\n");
        }
        body.push_str(&format!(
            "Primary target: {}\nFallback targets unhealthy: {}/{}\nDetected at: {}\n",
            primary,
            evidence.unhealthy(),
            evidence.reached(),
            detected_at.to_rfc3339(),
        ));

        AlertMessage {
            from: self.from.clone(),
            to: self.to.clone(),
            subject: self.subject.clone(),
            body,
        }
    }
}
