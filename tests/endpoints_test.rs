/// Integration tests for the status endpoints
///
/// Drives the real router with a scripted command runner, so no `systemctl`, `ss`
/// or `journalctl` is ever spawned. Log and config fixtures live in temp files.

use std::io::Write;
use std::sync::Arc;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;
use mission_control::config::{Config, LogSourceKind};
use mission_control::http::server::router;
use mission_control::http::AppState;
use mission_control::status::StatusProbes;
use mission_control::status::command::ScriptedRunner;

/// Helper: GET `path` and decode the JSON body, asserting HTTP 200
async fn get_json(config: Config, runner: ScriptedRunner, path: &str) -> Value {
    let probes = StatusProbes::new(Arc::new(config), Arc::new(runner));
    let app = router(AppState::new(probes));
    let response = assert_ok!(
        app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
    );
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: temp file holding `content`
fn fixture(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn health_active_with_uptime() {
    let runner = ScriptedRunner::new()
        .stdout("systemctl --user is-active openclaw-gateway.service", "active\n")
        .stdout(
            "systemctl --user show openclaw-gateway.service --property=ActiveEnterTimestamp --value",
            "Sat 2026-10-17 08:15:02 UTC\n",
        );
    let body = get_json(Config::default(), runner, "/health").await;
    assert_eq!(
        body,
        json!({"status": "active", "raw": "active", "uptime": "Sat 2026-10-17 08:15:02 UTC"})
    );
}

#[tokio::test]
async fn health_stopped_service_has_no_uptime() {
    let runner = ScriptedRunner::new()
        .exit("systemctl --user is-active", 3, "inactive\n", "")
        .stdout("systemctl --user show", "@1760688902\n");
    let body = get_json(Config::default(), runner, "/health").await;
    assert_eq!(body, json!({"status": "inactive", "raw": "inactive", "uptime": ""}));
}

#[tokio::test]
async fn config_gateway_port_kept_as_written() {
    let file = fixture(r#"{"gateway": {"port": "18789", "bind": "loopback"}}"#);
    let mut config = Config::default();
    config.app_config.path = file.path().to_str().unwrap().to_string();

    let body = get_json(config, ScriptedRunner::new(), "/config").await;
    assert_eq!(body["gateway"], json!({"port": "18789", "mode": null, "bind": "loopback"}));
}

#[tokio::test]
async fn health_service_manager_missing() {
    let body = get_json(Config::default(), ScriptedRunner::new(), "/health").await;
    assert_eq!(body["status"], "inactive");
    assert_eq!(body["raw"], "error");
    assert!(body["error"].is_string());
    assert!(body.get("uptime").is_none());
}

#[tokio::test]
async fn network_listening_when_connection_count_fails() {
    let runner = ScriptedRunner::new()
        .stdout(
            "ss -tlnp",
            "State Recv-Q Send-Q Local Address:Port Peer Address:Port\n\
             LISTEN 0 511 127.0.0.1:18789 0.0.0.0:*\n",
        )
        .missing("ss -tnp");
    let body = get_json(Config::default(), runner, "/network").await;
    assert_eq!(body["listening"], true);
    assert_eq!(body["port"], 18789);
    assert_eq!(body["connections"], 0);
    assert_eq!(body["protocol"], "WebSocket");
    assert_eq!(body["details"], "LISTEN 0 511 127.0.0.1:18789 0.0.0.0:*");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn network_scan_failure() {
    let runner = ScriptedRunner::new().exit("ss -tlnp", 1, "", "Cannot open netlink socket");
    let body = get_json(Config::default(), runner, "/network").await;
    assert_eq!(body["listening"], false);
    assert_eq!(body["port"], 18789);
    assert!(body["error"].as_str().unwrap().contains("netlink"));
}

#[tokio::test]
async fn journal_logs_report_kept_count() {
    let journal: String = (1..=30).map(|i| format!("2026-10-17T08:{:02}:00+0000 gw[1]: tick {}\n", i, i)).collect();
    let runner = ScriptedRunner::new().stdout("journalctl", &journal);
    let body = get_json(Config::default(), runner, "/logs").await;
    assert_eq!(body["lines"].as_array().unwrap().len(), 15);
    assert_eq!(body["totalLines"], 15);
    assert_eq!(body["source"], "journalctl");
    assert!(body["lines"][14].as_str().unwrap().ends_with("tick 30"));
}

#[tokio::test]
async fn file_logs_report_full_count() {
    let content: String = (1..=100).map(|i| format!("entry {}\n\n", i)).collect();
    let file = fixture(&content);
    let mut config = Config::default();
    config.log_config.source = LogSourceKind::File;
    config.log_config.path = file.path().to_str().unwrap().to_string();

    let body = get_json(config.clone(), ScriptedRunner::new(), "/logs").await;
    assert_eq!(body["lines"].as_array().unwrap().len(), 15);
    assert_eq!(body["totalLines"], 100);
    assert_eq!(body["path"], config.log_config.path);
    assert_eq!(body["lines"][0], "entry 86");
    assert!(body.get("source").is_none());
}

#[tokio::test]
async fn file_logs_missing_file() {
    let mut config = Config::default();
    config.log_config.source = LogSourceKind::File;
    config.log_config.path = "/nonexistent/openclaw.log".to_string();

    let body = get_json(config, ScriptedRunner::new(), "/logs").await;
    assert_eq!(body["lines"], json!([]));
    assert_eq!(body["totalLines"], 0);
    assert_eq!(body["path"], "/nonexistent/openclaw.log");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn config_invalid_json_returns_only_error() {
    let file = fixture("{\"gateway\": ");
    let mut config = Config::default();
    config.app_config.path = file.path().to_str().unwrap().to_string();

    let body = get_json(config, ScriptedRunner::new(), "/config").await;
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["error"].is_string());
}

#[tokio::test]
async fn config_without_channels_has_empty_map() {
    let file = fixture(r#"{"gateway": {"port": 18789, "mode": "local"}, "meta": {"lastTouchedVersion": "2026.2.1"}}"#);
    let mut config = Config::default();
    config.app_config.path = file.path().to_str().unwrap().to_string();

    let body = get_json(config, ScriptedRunner::new(), "/config").await;
    assert_eq!(body["channels"], json!({}));
    assert_eq!(body["plugins"], json!({}));
    assert_eq!(body["models"], json!({"primary": "unknown"}));
    assert_eq!(body["gateway"], json!({"port": 18789, "mode": "local", "bind": null}));
    assert_eq!(body["meta"]["lastTouchedVersion"], "2026.2.1");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn dashboard_page_needs_pollers() {
    let probes = StatusProbes::new(Arc::new(Config::default()), Arc::new(ScriptedRunner::new()));
    let app = router(AppState::new(probes));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dashboard_renders_polled_panels() {
    let runner = ScriptedRunner::new()
        .stdout("systemctl --user is-active", "active\n")
        .stdout("systemctl --user show", "Sat 2026-10-17 08:15:02 UTC\n")
        .stdout("ss -tlnp", "LISTEN 0 511 127.0.0.1:18789 0.0.0.0:*\n")
        .stdout("ss -tnp", "ESTAB 0 0 127.0.0.1:18789 127.0.0.1:50000\n")
        .stdout("journalctl", "2026-10-17T08:15:03+0000 gw[1]: <ready>\n");
    let mut config = Config::default();
    config.app_config.path = "/nonexistent/openclaw.json".to_string();
    config.poll_config.health_secs = 1;
    config.poll_config.network_secs = 1;
    config.poll_config.logs_secs = 1;
    config.poll_config.config_secs = 1;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let probes = StatusProbes::new(Arc::new(config), Arc::new(runner));
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(mission_control::http::server::serve(listener, probes, async {
        let _ = stop_rx.await;
    }));

    let mut page = String::new();
    for _ in 0..50 {
        let fetch_url = url.clone();
        page = tokio::task::spawn_blocking(move || {
            ureq::get(&fetch_url).call().unwrap().into_string().unwrap()
        })
        .await
        .unwrap();
        let ready = ["ONLINE", "LISTENING", "&lt;ready&gt;", "/nonexistent/openclaw.json"]
            .iter()
            .all(|needle| page.contains(needle));
        if ready {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    assert!(page.contains("ONLINE"), "{}", page);
    assert!(page.contains("LISTENING"));
    assert!(page.contains("&lt;ready&gt;"));
    assert!(page.contains("openclaw-gateway.service"));
    assert!(page.contains("/nonexistent/openclaw.json"));

    let _ = stop_tx.send(());
    assert_ok!(server.await.unwrap());
}
