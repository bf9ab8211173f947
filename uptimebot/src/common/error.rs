//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! 起動時の致命的エラー（ターゲットファイル・設定）と、
//! 実行時に発生しうる通知・サーバーエラーをまとめて扱う。
//! プローブの通信エラーはここには現れない（`ProbeResult::ProbeError`に畳み込まれる）。

use std::path::PathBuf;
use thiserror::Error;

/// uptimebot error type
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Target list file could not be read
    #[error("Failed to read target list {path}: {source}")]
    TargetFile {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Target list file contained no URLs
    #[error("Target list {0} is empty")]
    EmptyTargetList(PathBuf),

    /// A line in the target list is not a usable URL
    #[error("Invalid target URL on line {line}: {url}")]
    InvalidTarget {
        /// 1-based line number in the file
        line: usize,
        /// Offending line content
        url: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Alert notification could not be delivered
    #[error("Notification error: {0}")]
    Notify(String),

    /// Liveness server error
    #[error("Server error: {0}")]
    Server(String),
}

impl From<reqwest::Error> for MonitorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MonitorError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Notify(err.to_string())
    }
}

impl From<lettre::error::Error> for MonitorError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Notify(err.to_string())
    }
}

impl From<lettre::address::AddressError> for MonitorError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::Config(format!("invalid email address: {}", err))
    }
}
