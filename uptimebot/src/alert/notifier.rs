//! メール通知
//!
//! lettreの非同期SMTPトランスポートでアラートを送信する。

use crate::common::error::MonitorError;
use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// implicit TLS（SMTPS）のポート
const SMTPS_PORT: u16 = 465;

/// 送信するアラートメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// 通知送信の抽象
#[async_trait]
pub trait Notifier: Send + Sync {
    /// メッセージを1回送信する（リトライなし）
    async fn send(&self, message: &AlertMessage) -> Result<(), MonitorError>;
}

/// SMTP通知
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// SMTP設定からトランスポートを構築
    ///
    /// 465番ポートはimplicit TLS。それ以外はサーバーがSTARTTLSを提示した場合のみ
    /// TLSへ昇格し、提示しないローカルリレーには平文で送る。
    /// 接続自体は初回送信時まで行わない。
    pub fn new(config: &SmtpConfig) -> Result<Self, MonitorError> {
        let builder = if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            let tls = TlsParameters::new(config.host.clone())?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(tls))
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.from.clone(),
                config.password.clone(),
            ))
            .build();

        info!(host = %config.host, port = config.port, "SMTP notifier configured");
        Ok(Self { transport })
    }
}

/// AlertMessageをlettreのメッセージに変換
fn build_email(message: &AlertMessage) -> Result<Message, MonitorError> {
    let from: Mailbox = message.from.parse()?;
    let to: Mailbox = message.to.parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())?)
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<(), MonitorError> {
        let email = build_email(message)?;
        let response = self.transport.send(email).await?;
        debug!(code = %response.code(), to = %message.to, "SMTP relay accepted message");
        Ok(())
    }
}
