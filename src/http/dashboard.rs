//! The four panel pollers and their rendering
//!
//! Each panel polls its endpoint on its own timer, the way a browser tab would.

use std::future::Future;
use std::io::Write;
use std::time::Duration;
use time::OffsetDateTime;
use super::models::{ConfigResponse, HealthSnapshot, LogSnapshot, NetworkSnapshot};
use crate::config::Config;
use crate::panels::{self, html, text, Panel};
use crate::poll::{self, HttpFetcher, PollHandle};

pub struct Dashboard {
    unit: String,
    port: u16,
    bind: String,
    health: PollHandle<HealthSnapshot>,
    network: PollHandle<NetworkSnapshot>,
    logs: PollHandle<LogSnapshot>,
    config: PollHandle<ConfigResponse>,
}

impl Dashboard {
    /// Start polling the status endpoints under `base_url`.
    pub fn start(base_url: &str, config: &Config) -> Self {
        let intervals = &config.poll_config;
        tracing::info!(
            "polling {} every {}s/{}s/{}s/{}s (health/network/logs/config)",
            base_url,
            intervals.health().as_secs(),
            intervals.network().as_secs(),
            intervals.logs().as_secs(),
            intervals.config().as_secs()
        );
        Self {
            unit: config.service_config.unit.clone(),
            port: config.network_config.port,
            bind: config.network_config.bind.clone(),
            health: poll::spawn(HttpFetcher::endpoint(base_url, "/health"), intervals.health()),
            network: poll::spawn(HttpFetcher::endpoint(base_url, "/network"), intervals.network()),
            logs: poll::spawn(HttpFetcher::endpoint(base_url, "/logs"), intervals.logs()),
            config: poll::spawn(HttpFetcher::endpoint(base_url, "/config"), intervals.config()),
        }
    }

    pub async fn panels(&self, now: OffsetDateTime) -> Vec<Panel> {
        vec![
            panels::health_panel(&self.health.snapshot().await, &self.unit, now),
            panels::network_panel(&self.network.snapshot().await, self.port, &self.bind, now),
            panels::log_panel(&self.logs.snapshot().await, now),
            panels::config_panel(&self.config.snapshot().await),
        ]
    }

    pub async fn render_html(&self, now: OffsetDateTime) -> askama::Result<String> {
        html::render_page(&self.panels(now).await, now)
    }

    pub async fn render_text(&self, now: OffsetDateTime) -> String {
        text::render_panels(&self.panels(now).await)
    }

    /// Redraw the text view into `out` every `every` until `shutdown` completes.
    /// `shutdown` is pinned once, so completing during a redraw is seen on the next turn.
    pub async fn watch<W, S>(&self, every: Duration, out: &mut W, shutdown: S) -> std::io::Result<()>
    where
        W: Write,
        S: Future,
    {
        let mut redraw = tokio::time::interval(every);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => return Ok(()),
                _ = redraw.tick() => {
                    let screen = self.render_text(OffsetDateTime::now_utc()).await;
                    write!(out, "{}{}", text::CLEAR, screen)?;
                    out.flush()?;
                }
            }
        }
    }
}
