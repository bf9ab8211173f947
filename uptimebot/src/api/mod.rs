//! HTTP API
//!
//! 監視プロセス自身の死活確認用。ターゲットのヘルス状態とは無関係。

pub mod system;

use crate::AppState;
use axum::{routing::get, Router};

/// ルーターを構築
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/system", get(system::get_system))
        .with_state(state)
}

/// GET /
async fn liveness() -> &'static str {
    "Running"
}
