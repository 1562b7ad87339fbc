//! Listener and connection state of the watched port via `ss`

use crate::config::NetworkConfig;
use crate::http::models::NetworkSnapshot;
use crate::status::command::CommandRunner;
use crate::status::errors::ProbeError;

const SS: &str = "ss";

pub async fn scan(runner: &dyn CommandRunner, network: &NetworkConfig) -> NetworkSnapshot {
    let listeners = match run_ss(runner, "-tlnp").await {
        Ok(stdout) => stdout,
        Err(e) => {
            tracing::warn!("listener scan for port {} failed: {}", network.port, e);
            return NetworkSnapshot::failed(network.port, e);
        }
    };

    let matched = lines_for_port(&listeners, network.port);
    let listening = !matched.is_empty();

    let connections = if listening {
        match run_ss(runner, "-tnp").await {
            Ok(stdout) => lines_for_port(&stdout, network.port).len() as u32,
            Err(e) => {
                tracing::debug!("connection count for port {} failed: {}", network.port, e);
                0
            }
        }
    } else {
        0
    };

    NetworkSnapshot::Scanned {
        listening,
        port: network.port,
        protocol: network.protocol.clone(),
        connections,
        details: if matched.is_empty() {
            None
        } else {
            Some(matched.join("\n"))
        },
    }
}

async fn run_ss(runner: &dyn CommandRunner, flags: &str) -> Result<String, ProbeError> {
    runner.run(SS, &[flags]).await?.into_stdout(SS)
}

/// Lines with an address column ending in `:<port>`, trimmed.
///
/// Matching on the column suffix keeps port 1878 from matching 18789.
pub fn lines_for_port(output: &str, port: u16) -> Vec<&str> {
    let suffix = format!(":{}", port);
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.split_whitespace().any(|col| col.ends_with(&suffix)))
        .collect()
}
