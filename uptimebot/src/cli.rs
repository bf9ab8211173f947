//! CLI definition for uptimebot

use clap::Parser;
use std::path::PathBuf;

/// uptimebot - primary endpoint uptime monitor with debounced email alerts
#[derive(Parser, Debug, Clone)]
#[command(name = "uptimebot")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    UPTIMEBOT_SMTP_FROM                Sender address / SMTP login (legacy: FROM)
    UPTIMEBOT_SMTP_PASSWORD            SMTP password (legacy: PASSWORD)
    UPTIMEBOT_ALERT_TO                 Alert recipient (legacy: TO)
    UPTIMEBOT_SMTP_HOST                Mail relay host (legacy: SMTPHOST)
    UPTIMEBOT_SMTP_PORT                Mail relay port (legacy: SMTPPORT, default: 587)
    UPTIMEBOT_ALERT_SUBJECT            Alert subject
    UPTIMEBOT_ALERT_BODY               Alert body text (legacy: EMAILBODY)
    UPTIMEBOT_PROBE_INTERVAL_SECS      Primary probe period (default: 300)
    UPTIMEBOT_ALERT_COOLDOWN_SECS      Alert debounce window (default: 900)
    UPTIMEBOT_CROSS_CHECK_WINDOW_SECS  Fallback cross-check budget (default: 30)
    UPTIMEBOT_PROBE_TIMEOUT_SECS       Per-request timeout (default: 10)
    UPTIMEBOT_LOG_LEVEL                Log level (default: info)
    UPTIMEBOT_LOG_DIR                  Directory for daily log files

A .env file in the working directory is loaded if present.
"#)]
pub struct Cli {
    /// Target list file, one URL per line; the first URL is the primary
    #[arg(short = 'f', long = "file", env = "UPTIMEBOT_TARGETS_FILE")]
    pub file: PathBuf,

    /// Liveness listener port
    #[arg(short, long, default_value = "8000", env = "UPTIMEBOT_PORT")]
    pub port: u16,

    /// Liveness listener bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "UPTIMEBOT_HOST")]
    pub host: String,
}

impl Cli {
    /// `host:port` for the liveness listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
