use std::sync::Arc;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use mission_control::config::{self, DEFAULT_CONFIG_FILE};
use mission_control::http::server;
use mission_control::status::StatusProbes;
use mission_control::status::command::SystemRunner;
use mission_control::utils;

/// Local status dashboard for one background service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML); defaults apply when it does not exist
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Listen address, overrides server_config.listen_addr
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = utils::init_tracing(LevelFilter::INFO) {
        eprintln!("Failed to initialize logging: {}", e);
        return;
    }

    let mut cfg = match config::load_or_default(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Invalid configuration {}: {}", args.config, e);
            std::process::exit(1);
        }
    };
    if let Some(listen) = args.listen {
        cfg.server_config.listen_addr = listen;
    }
    tracing::debug!("config: {:?}", cfg);
    tracing::info!(
        "watching {} (port {}, logs from {:?})",
        cfg.service_config.unit,
        cfg.network_config.port,
        cfg.log_config.source
    );

    let listen_addr = cfg.server_config.listen_addr.clone();
    let probes = StatusProbes::new(Arc::new(cfg), Arc::new(SystemRunner));
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutting down");
    };
    if let Err(e) = server::start(&listen_addr, probes, shutdown).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
