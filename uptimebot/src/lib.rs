//! uptimebot
//!
//! プライマリエンドポイントの稼働監視。異常時はフォールバックターゲットで
//! クロスチェックし、フリート全体のダウンと判定した場合のみ
//! クールダウン付きでメール通知する。

#![warn(missing_docs)]

/// 共通定義（エラー型）
pub mod common;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// 監視対象URLリスト
pub mod registry;

/// ヘルスチェック（プローブ・クロスチェック・監視サイクル）
pub mod health;

/// アラート通知（デバウンス・SMTP）
pub mod alert;

/// 定期実行スケジューラ
pub mod scheduler;

/// 死活監視API
pub mod api;

/// axumサーバー起動
pub mod server;

/// Shutdown controller
pub mod shutdown;

/// ロギング初期化ユーティリティ
pub mod logging;

/// CLIインターフェース
pub mod cli;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 監視モニター（ターゲットリスト・アラートゲート）
    pub monitor: Arc<health::Monitor>,
}
