//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use time::OffsetDateTime;
use super::dashboard::Dashboard;
use super::models::{ConfigResponse, HealthSnapshot, LogSnapshot, NetworkSnapshot};
use crate::status::StatusProbes;

/// Shared state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    probes: StatusProbes,
    dashboard: Option<Arc<Dashboard>>,
}

impl AppState {
    pub fn new(probes: StatusProbes) -> Self {
        Self {
            probes,
            dashboard: None,
        }
    }

    pub fn with_dashboard(mut self, dashboard: Arc<Dashboard>) -> Self {
        self.dashboard = Some(dashboard);
        self
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthSnapshot> {
    Json(state.probes.health().await)
}

pub async fn network(State(state): State<AppState>) -> Json<NetworkSnapshot> {
    Json(state.probes.network().await)
}

pub async fn logs(State(state): State<AppState>) -> Json<LogSnapshot> {
    Json(state.probes.logs().await)
}

pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(state.probes.app_config().await)
}

/// Dashboard page endpoint handler
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let Some(dashboard) = state.dashboard.as_ref() else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };
    match dashboard.render_html(OffsetDateTime::now_utc()).await {
        Ok(page) => Ok(Html(page)),
        Err(e) => {
            tracing::error!("rendering dashboard failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
