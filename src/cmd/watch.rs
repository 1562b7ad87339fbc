use std::time::Duration;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use mission_control::config::{self, DEFAULT_CONFIG_FILE};
use mission_control::http::dashboard::Dashboard;
use mission_control::utils;

/// Terminal view of a running mission control server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the server
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    url: String,

    /// Configuration file for poll intervals and panel labels
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Seconds between screen redraws
    #[arg(long, default_value = "1")]
    redraw_secs: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = utils::init_tracing(LevelFilter::WARN) {
        eprintln!("Failed to initialize logging: {}", e);
        return;
    }

    let cfg = match config::load_or_default(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Invalid configuration {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    let dashboard = Dashboard::start(&args.url, &cfg);
    let every = Duration::from_secs(args.redraw_secs.max(1));
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = dashboard.watch(every, &mut stdout, tokio::signal::ctrl_c()).await {
        tracing::error!("Terminal output failed: {}", e);
        std::process::exit(1);
    }
}
