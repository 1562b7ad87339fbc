//! HTTP API response models
//!
//! Every endpoint answers with HTTP 200; a failed read is told apart from a good one
//! only by the presence of an `error` field.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Coarse service state derived from the service manager's answer
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Inactive,
}

/// `GET /health`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthSnapshot {
    pub status: ServiceStatus,
    /// Trimmed service manager output, or `"error"`
    pub raw: String,
    /// Start timestamp as printed by the service manager; empty when unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthSnapshot {
    pub fn failed(error: impl ToString) -> Self {
        Self {
            status: ServiceStatus::Inactive,
            raw: "error".to_string(),
            uptime: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ServiceStatus::Active
    }
}

/// `GET /network`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NetworkSnapshot {
    Scanned {
        listening: bool,
        port: u16,
        protocol: String,
        connections: u32,
        /// Matching listener lines, `null` when none
        details: Option<String>,
    },
    Failed {
        listening: bool,
        port: u16,
        error: String,
    },
}

impl NetworkSnapshot {
    pub fn failed(port: u16, error: impl ToString) -> Self {
        NetworkSnapshot::Failed {
            listening: false,
            port,
            error: error.to_string(),
        }
    }

    pub fn listening(&self) -> bool {
        match self {
            NetworkSnapshot::Scanned { listening, .. } => *listening,
            NetworkSnapshot::Failed { listening, .. } => *listening,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            NetworkSnapshot::Scanned { port, .. } | NetworkSnapshot::Failed { port, .. } => *port,
        }
    }

    pub fn protocol(&self) -> Option<&str> {
        match self {
            NetworkSnapshot::Scanned { protocol, .. } => Some(protocol),
            NetworkSnapshot::Failed { .. } => None,
        }
    }

    pub fn connections(&self) -> u32 {
        match self {
            NetworkSnapshot::Scanned { connections, .. } => *connections,
            NetworkSnapshot::Failed { .. } => 0,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            NetworkSnapshot::Scanned { .. } => None,
            NetworkSnapshot::Failed { error, .. } => Some(error),
        }
    }
}

/// Which reader produced a [`LogSnapshot`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LogOrigin {
    /// Always `"journalctl"`
    Journal { source: String },
    File { path: String },
}

impl LogOrigin {
    pub fn journal() -> Self {
        LogOrigin::Journal {
            source: "journalctl".to_string(),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        LogOrigin::File { path: path.into() }
    }
}

/// `GET /logs`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogSnapshot {
    /// Oldest first
    pub lines: Vec<String>,
    /// Retained count for the journal, full non-empty count for a file
    pub total_lines: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub origin: LogOrigin,
}

impl LogSnapshot {
    pub fn failed(origin: LogOrigin, error: impl ToString) -> Self {
        Self {
            lines: Vec::new(),
            total_lines: 0,
            error: Some(error.to_string()),
            origin,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelsInfo {
    pub primary: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Gateway fields pass through as written when truthy, whatever their JSON type.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GatewayInfo {
    pub port: Option<serde_json::Value>,
    pub mode: Option<serde_json::Value>,
    pub bind: Option<serde_json::Value>,
}

/// Projection of the watched service's JSON configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigSnapshot {
    pub models: ModelsInfo,
    pub channels: BTreeMap<String, ChannelInfo>,
    pub gateway: GatewayInfo,
    pub plugins: BTreeMap<String, bool>,
    /// Passed through untouched
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl ConfigSnapshot {
    pub fn last_touched_version(&self) -> Option<&str> {
        self.meta.get("lastTouchedVersion").and_then(|v| v.as_str())
    }
}

/// `GET /config`: either the full projection or only an `error`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConfigResponse {
    Failed { error: String },
    Loaded(ConfigSnapshot),
}

impl ConfigResponse {
    pub fn failed(error: impl ToString) -> Self {
        ConfigResponse::Failed {
            error: error.to_string(),
        }
    }
}
