use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "mission-control.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server_config: ServerConfig,
    #[serde(default)]
    pub service_config: ServiceConfig,
    #[serde(default)]
    pub network_config: NetworkConfig,
    #[serde(default)]
    pub log_config: LogConfig,
    #[serde(default)]
    pub app_config: AppConfig,
    #[serde(default)]
    pub poll_config: PollConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    // dashboard listen address, eg: 127.0.0.1:3000
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// The background service being watched
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    // systemd unit name
    #[serde(default = "default_unit")]
    pub unit: String,

    // query the per-user service manager (systemctl --user)
    #[serde(default = "default_user_scope")]
    pub user_scope: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            user_scope: default_user_scope(),
        }
    }
}

fn default_unit() -> String {
    "openclaw-gateway.service".to_string()
}

fn default_user_scope() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    // label only, never probed
    #[serde(default = "default_protocol")]
    pub protocol: String,

    // shown in the network panel
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            protocol: default_protocol(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    18789
}

fn default_protocol() -> String {
    "WebSocket".to_string()
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

/// Where `/logs` reads from. One per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSourceKind {
    /// journalctl for the watched unit
    Journal,
    /// flat log file at `LogConfig::path`
    File,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_source")]
    pub source: LogSourceKind,

    #[serde(default = "default_log_path")]
    pub path: String,

    // number of trailing lines kept
    #[serde(default = "default_tail")]
    pub tail: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            source: default_log_source(),
            path: default_log_path(),
            tail: default_tail(),
        }
    }
}

fn default_log_source() -> LogSourceKind {
    LogSourceKind::Journal
}

fn default_log_path() -> String {
    "/tmp/openclaw/openclaw.log".to_string()
}

fn default_tail() -> usize {
    15
}

/// The watched service's own JSON configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_config_path")]
    pub path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            path: default_app_config_path(),
        }
    }
}

fn default_app_config_path() -> String {
    "/home/rootb/.openclaw/openclaw.json".to_string()
}

/// Refresh interval of each dashboard panel, in seconds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_health_secs")]
    pub health_secs: u64,
    #[serde(default = "default_network_secs")]
    pub network_secs: u64,
    #[serde(default = "default_logs_secs")]
    pub logs_secs: u64,
    #[serde(default = "default_config_secs")]
    pub config_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            health_secs: default_health_secs(),
            network_secs: default_network_secs(),
            logs_secs: default_logs_secs(),
            config_secs: default_config_secs(),
        }
    }
}

impl PollConfig {
    pub fn health(&self) -> Duration {
        secs(self.health_secs)
    }

    pub fn network(&self) -> Duration {
        secs(self.network_secs)
    }

    pub fn logs(&self) -> Duration {
        secs(self.logs_secs)
    }

    pub fn config(&self) -> Duration {
        secs(self.config_secs)
    }
}

// tokio intervals panic on zero
fn secs(n: u64) -> Duration {
    Duration::from_secs(n.max(1))
}

fn default_health_secs() -> u64 {
    5
}

fn default_network_secs() -> u64 {
    5
}

fn default_logs_secs() -> u64 {
    3
}

fn default_config_secs() -> u64 {
    30
}

pub fn load(path: &str) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Like [`load`], but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> anyhow::Result<Config> {
    if !Path::new(path).exists() {
        tracing::info!("config file {} not found, using defaults", path);
        return Ok(Config::default());
    }
    load(path)
}
