//! HTTP server setup and management

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use super::dashboard::Dashboard;
use super::handlers::{self, AppState};
use crate::status::StatusProbes;

/// Status endpoints plus the dashboard page
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/network", get(handlers::network))
        .route("/logs", get(handlers::logs))
        .route("/config", get(handlers::config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `listen_addr` and [`serve`] on it.
pub async fn start(
    listen_addr: &str,
    probes: StatusProbes,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> crate::Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    serve(listener, probes, shutdown).await
}

/// Start the dashboard pollers against this same listener and serve until the
/// shutdown future resolves.
pub async fn serve(
    listener: TcpListener,
    probes: StatusProbes,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> crate::Result<()> {
    let base_url = format!("http://{}", loopback_for(listener.local_addr()?));

    let dashboard = Arc::new(Dashboard::start(&base_url, probes.config()));
    let app = router(AppState::new(probes).with_dashboard(dashboard));

    tracing::info!("dashboard listening on {}/", base_url);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Address the in-process pollers use to reach a listener bound to `addr`
fn loopback_for(mut addr: SocketAddr) -> SocketAddr {
    if addr.ip().is_unspecified() {
        let ip: IpAddr = match addr {
            SocketAddr::V4(_) => Ipv4Addr::LOCALHOST.into(),
            SocketAddr::V6(_) => Ipv6Addr::LOCALHOST.into(),
        };
        addr.set_ip(ip);
    }
    addr
}
