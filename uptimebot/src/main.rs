//! uptimebot entry point

use clap::Parser;
use std::sync::Arc;
use tracing::{debug, error, info};
use uptimebot::alert::{AlertTemplate, SmtpNotifier};
use uptimebot::cli::Cli;
use uptimebot::common::error::MonitorError;
use uptimebot::config::{MonitorConfig, SmtpConfig};
use uptimebot::health::{HttpProber, Monitor};
use uptimebot::registry::TargetList;
use uptimebot::scheduler::{Schedule, Scheduler};
use uptimebot::shutdown::ShutdownController;
use uptimebot::{logging, server, AppState};

#[tokio::main]
async fn main() {
    // ログレベル等も.envから読めるよう、ロギングより先に読み込む
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    logging::init().expect("failed to initialize logging");

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => debug!("No .env file found; using process environment"),
        Err(e) => {
            error!("Failed to load .env file: {}", e);
            eprintln!("Error: failed to load .env file: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), MonitorError> {
    let targets = TargetList::load(&cli.file)?;
    let config = MonitorConfig::from_env();
    let smtp = SmtpConfig::from_env()?;

    let prober = HttpProber::new(config.probe_timeout, &config.user_agent)?;
    let notifier = SmtpNotifier::new(&smtp)?;
    let monitor = Arc::new(Monitor::new(
        targets,
        Arc::new(prober),
        Arc::new(notifier),
        AlertTemplate::from(&smtp),
        config.cross_check_window,
    ));

    info!("Starting uptimebot");

    let shutdown = ShutdownController::default();
    let scheduler =
        Scheduler::new(monitor.clone(), Schedule::from(&config), shutdown.clone()).start();

    let result = server::run(AppState { monitor }, &cli.bind_addr(), shutdown.clone()).await;

    // サーバーが異常終了した場合もループを止めてから終了する
    shutdown.request_shutdown();
    scheduler.join().await;

    result
}
