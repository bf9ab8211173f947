//! プローブクライアント
//!
//! 単一URLへのGETを1回だけ送り、結果を3値に分類する。
//! リトライは行わない（リトライ方針は呼び出し側の責務）。

use crate::common::error::MonitorError;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;

/// 単一プローブの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// HTTP status < 400
    Healthy,
    /// HTTP status >= 400
    Unhealthy,
    /// Transport failure: timeout, DNS, connection refused, rejected redirect
    ProbeError,
}

impl ProbeResult {
    /// ステータスコードから分類
    pub fn from_status(status: u16) -> Self {
        if status < 400 {
            Self::Healthy
        } else {
            Self::Unhealthy
        }
    }

    /// 正常と確認できたか
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// ログ用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::ProbeError => "probe_error",
        }
    }
}

/// プローブ実行の抽象
///
/// クロスチェックやスケジューラのテストで、ネットワークを差し替えるために使う。
#[async_trait]
pub trait Prober: Send + Sync {
    /// URLに1回だけGETを送り、結果を分類する
    async fn probe(&self, url: &str) -> ProbeResult;
}

/// reqwestベースのプローブクライアント
///
/// リダイレクトは追跡せず、通信エラーとして扱う。
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// 新しいプローブクライアントを作成
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(redirect::Policy::custom(|attempt| {
                attempt.error("redirects are not followed by the uptime probe")
            }))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> ProbeResult {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let result = ProbeResult::from_status(status);
                debug!(%url, status, result = result.as_str(), "Probe completed");
                result
            }
            Err(e) => {
                debug!(
                    %url,
                    error = %e,
                    timeout = e.is_timeout(),
                    redirect = e.is_redirect(),
                    "Probe transport error"
                );
                ProbeResult::ProbeError
            }
        }
    }
}
