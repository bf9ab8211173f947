//! axumサーバー起動・シャットダウンハンドリング

use crate::common::error::MonitorError;
use crate::shutdown::ShutdownController;
use crate::AppState;
use tracing::{info, warn};

/// 死活監視サーバーを起動し、シャットダウンシグナルを待機する
///
/// Ctrl+C / SIGTERMを受けた場合も`ShutdownController`に停止を要求するので、
/// スケジューラのループも合わせて止まる。
pub async fn run(
    state: AppState,
    bind_addr: &str,
    shutdown: ShutdownController,
) -> Result<(), MonitorError> {
    let app = crate::api::create_app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| MonitorError::Server(format!("failed to bind {}: {}", bind_addr, e)))?;

    info!("Liveness server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(|e| MonitorError::Server(e.to_string()))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownController) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }

    shutdown.request_shutdown();
}
