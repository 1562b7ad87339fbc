//! Status probes: one external read per endpoint, normalized into a snapshot.
//!
//! Probes never fail. Whatever goes wrong is folded into the snapshot's `error` field
//! and the rest of the snapshot falls back to its empty values.

use std::sync::Arc;
use crate::config::Config;
use crate::http::models::{ConfigResponse, HealthSnapshot, LogSnapshot, NetworkSnapshot};
use crate::status::command::CommandRunner;

pub mod app_config;
pub mod command;
pub mod errors;
pub mod health;
pub mod logs;
pub mod network;

/// Everything the endpoints need to read host state
#[derive(Clone)]
pub struct StatusProbes {
    config: Arc<Config>,
    runner: Arc<dyn CommandRunner>,
}

impl StatusProbes {
    pub fn new(config: Arc<Config>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn health(&self) -> HealthSnapshot {
        health::check(self.runner.as_ref(), &self.config.service_config).await
    }

    pub async fn network(&self) -> NetworkSnapshot {
        network::scan(self.runner.as_ref(), &self.config.network_config).await
    }

    pub async fn logs(&self) -> LogSnapshot {
        logs::tail(
            self.runner.as_ref(),
            &self.config.service_config,
            &self.config.log_config,
        )
        .await
    }

    pub async fn app_config(&self) -> ConfigResponse {
        app_config::read(&self.config.app_config.path).await
    }
}
