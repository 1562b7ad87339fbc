//! Projection of the watched service's JSON configuration file

use std::collections::BTreeMap;
use serde_json::{Map, Value};
use crate::http::models::{ChannelInfo, ConfigResponse, ConfigSnapshot, GatewayInfo, ModelsInfo};
use crate::status::errors::ProbeError;

pub async fn read(path: &str) -> ConfigResponse {
    match load(path).await {
        Ok(value) => ConfigResponse::Loaded(project(&value)),
        Err(e) => {
            tracing::warn!("reading service config failed: {}", e);
            ConfigResponse::failed(e)
        }
    }
}

async fn load(path: &str) -> Result<Value, ProbeError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ProbeError::Read {
            path: path.to_string(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| ProbeError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Pick the dashboard fields out of a parsed config. Never fails: anything missing
/// or of the wrong type falls back to its empty value.
pub fn project(config: &Value) -> ConfigSnapshot {
    let primary = config
        .pointer("/agents/defaults/model/primary")
        .and_then(non_empty_str)
        .unwrap_or("unknown")
        .to_string();

    let channels = entries(config.get("channels"))
        .map(|(name, channel)| {
            let info = ChannelInfo {
                enabled: truthy(channel.get("enabled")),
                mode: channel.get("streamMode").and_then(non_empty_str).map(str::to_string),
            };
            (name.clone(), info)
        })
        .collect::<BTreeMap<_, _>>();

    let gateway = GatewayInfo {
        port: truthy_value(config.pointer("/gateway/port")),
        mode: truthy_value(config.pointer("/gateway/mode")),
        bind: truthy_value(config.pointer("/gateway/bind")),
    };

    let plugins = entries(config.pointer("/plugins/entries"))
        .map(|(name, plugin)| (name.clone(), truthy(plugin.get("enabled"))))
        .collect::<BTreeMap<_, _>>();

    let meta = config
        .get("meta")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    ConfigSnapshot {
        models: ModelsInfo { primary },
        channels,
        gateway,
        plugins,
        meta,
    }
}

fn entries(value: Option<&Value>) -> impl Iterator<Item = (&String, &Value)> {
    value
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(Map::iter)
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn truthy_value(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| truthy(Some(v))).cloned()
}

/// Loose truthiness: `null`, `false`, `0` and `""` are false, everything else true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
