//! ロギング初期化
//!
//! `UPTIMEBOT_LOG_LEVEL`（旧: `LOG_LEVEL`）でフィルタを、`UPTIMEBOT_LOG_DIR`で
//! 日次ローテーションのファイル出力先を指定する。

use crate::config::{get_env_with_fallback, get_env_with_fallback_or};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ファイル出力のフラッシュガード（プロセス終了まで保持）
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "uptimebot.log";

/// グローバルサブスクライバーを初期化
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = get_env_with_fallback_or("UPTIMEBOT_LOG_LEVEL", "LOG_LEVEL", "info");
    let filter = EnvFilter::try_new(&level).or_else(|_| EnvFilter::try_new("info"))?;

    let file_layer = match get_env_with_fallback("UPTIMEBOT_LOG_DIR", "UPTIMEBOT_LOG_DIR") {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // 二重初期化時は既存のガードを維持する
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()?;

    Ok(())
}
