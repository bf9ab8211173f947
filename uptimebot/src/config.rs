//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to the legacy unprefixed variable names (FROM, PASSWORD, TO, ...), logging a
//! deprecation warning when a legacy name is used.

use crate::common::error::MonitorError;
use std::time::Duration;

/// Firefox UA sent with every probe; some endpoints reject unidentified clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:10.0) Gecko/20100101 Firefox/10.0";

/// Default alert subject
pub const DEFAULT_ALERT_SUBJECT: &str = "Recommendation Service Failed";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Arguments
/// * `new_name` - The new environment variable name (preferred)
/// * `old_name` - The deprecated environment variable name (fallback)
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - Neither variable is set
///
/// # Example
/// ```
/// use uptimebot::config::get_env_with_fallback;
///
/// let host = get_env_with_fallback("UPTIMEBOT_SMTP_HOST", "SMTPHOST");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if new_name == old_name {
        return None;
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
///
/// Similar to `get_env_with_fallback`, but returns a default value
/// if neither variable is set.
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// 必須の環境変数を取得（未設定・空文字はエラー）
fn require_env(new_name: &str, old_name: &str) -> Result<String, MonitorError> {
    match get_env_with_fallback(new_name, old_name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(MonitorError::Config(format!(
            "{} (or legacy {}) must be set",
            new_name, old_name
        ))),
    }
}

/// 監視ループのタイミング設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Period of the primary probe loop.
    pub probe_interval: Duration,
    /// Period of the alert gate reset loop (debounce window).
    pub alert_cooldown: Duration,
    /// Upper bound on a single cross-check evaluation.
    pub cross_check_window: Duration,
    /// Per-request probe timeout.
    pub probe_timeout: Duration,
    /// User-Agent header sent with probes.
    pub user_agent: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_secs(300),
            alert_cooldown: Duration::from_secs(900),
            cross_check_window: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl MonitorConfig {
    /// Load timing configuration from environment variables.
    ///
    /// Zero values are ignored and replaced by the defaults, since a zero
    /// period would make `tokio::time::interval` panic.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secs = |name: &str, default: Duration| {
            match get_env_with_fallback_parse(name, name, default.as_secs()) {
                0 => default,
                n => Duration::from_secs(n),
            }
        };

        Self {
            probe_interval: secs("UPTIMEBOT_PROBE_INTERVAL_SECS", defaults.probe_interval),
            alert_cooldown: secs("UPTIMEBOT_ALERT_COOLDOWN_SECS", defaults.alert_cooldown),
            cross_check_window: secs(
                "UPTIMEBOT_CROSS_CHECK_WINDOW_SECS",
                defaults.cross_check_window,
            ),
            probe_timeout: secs("UPTIMEBOT_PROBE_TIMEOUT_SECS", defaults.probe_timeout),
            user_agent: get_env_with_fallback_or(
                "UPTIMEBOT_USER_AGENT",
                "UPTIMEBOT_USER_AGENT",
                DEFAULT_USER_AGENT,
            ),
        }
    }
}

/// SMTP通知設定
///
/// 起動時に一度だけ環境変数から解決する。
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// Sender address, also used as the SMTP login.
    pub from: String,
    /// SMTP credential
    pub password: String,
    /// Alert recipient
    pub to: String,
    /// Mail relay host
    pub host: String,
    /// Mail relay port
    pub port: u16,
    /// Alert subject line
    pub subject: String,
    /// Alert body template
    pub body: String,
}

// パスワードをログに出さない
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("from", &self.from)
            .field("password", &"<redacted>")
            .field("to", &self.to)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

impl SmtpConfig {
    /// Load SMTP configuration from environment variables.
    ///
    /// Sender, credential, recipient and relay host are required.
    pub fn from_env() -> Result<Self, MonitorError> {
        let from = require_env("UPTIMEBOT_SMTP_FROM", "FROM")?;
        let password = require_env("UPTIMEBOT_SMTP_PASSWORD", "PASSWORD")?;
        let to = require_env("UPTIMEBOT_ALERT_TO", "TO")?;
        let host = require_env("UPTIMEBOT_SMTP_HOST", "SMTPHOST")?;

        let port = match get_env_with_fallback("UPTIMEBOT_SMTP_PORT", "SMTPPORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                MonitorError::Config(format!("UPTIMEBOT_SMTP_PORT is not a valid port: {}", raw))
            })?,
            None => 587,
        };

        Ok(Self {
            from,
            password,
            to,
            host,
            port,
            subject: get_env_with_fallback_or(
                "UPTIMEBOT_ALERT_SUBJECT",
                "UPTIMEBOT_ALERT_SUBJECT",
                DEFAULT_ALERT_SUBJECT,
            ),
            body: get_env_with_fallback_or("UPTIMEBOT_ALERT_BODY", "EMAILBODY", ""),
        })
    }
}
