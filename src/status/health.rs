//! Service health via the service manager

use crate::config::ServiceConfig;
use crate::http::models::{HealthSnapshot, ServiceStatus};
use crate::status::command::CommandRunner;
use crate::status::errors::ProbeError;

const SYSTEMCTL: &str = "systemctl";

/// Ask the service manager whether the unit is active and, only when it is, best-effort
/// look up when it entered that state. systemd keeps the timestamp after a unit stops.
pub async fn check(runner: &dyn CommandRunner, service: &ServiceConfig) -> HealthSnapshot {
    let raw = match is_active(runner, service).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("health check for {} failed: {}", service.unit, e);
            return HealthSnapshot::failed(e);
        }
    };

    let status = status_of(&raw);
    let uptime = match status {
        ServiceStatus::Active => match active_since(runner, service).await {
            Ok(since) => since,
            Err(e) => {
                tracing::debug!("no start timestamp for {}: {}", service.unit, e);
                String::new()
            }
        },
        ServiceStatus::Inactive => String::new(),
    };

    HealthSnapshot {
        status,
        raw,
        uptime: Some(uptime),
        error: None,
    }
}

/// Only the exact answer `active` counts; `activating`, `reloading` etc. do not.
pub fn status_of(raw: &str) -> ServiceStatus {
    if raw == "active" {
        ServiceStatus::Active
    } else {
        ServiceStatus::Inactive
    }
}

fn systemctl_args<'a>(service: &'a ServiceConfig, rest: &[&'a str]) -> Vec<&'a str> {
    let mut args = Vec::with_capacity(rest.len() + 1);
    if service.user_scope {
        args.push("--user");
    }
    args.extend_from_slice(rest);
    args
}

// `is-active` exits non-zero for every state but active while still printing the
// state, so a non-zero exit only counts as failure when nothing was printed.
async fn is_active(runner: &dyn CommandRunner, service: &ServiceConfig) -> Result<String, ProbeError> {
    let args = systemctl_args(service, &["is-active", service.unit.as_str()]);
    let output = runner.run(SYSTEMCTL, &args).await?;
    let raw = output.stdout.trim().to_string();
    if !output.success && raw.is_empty() {
        return Err(ProbeError::Exited {
            program: SYSTEMCTL.to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(raw)
}

// `--timestamp=unix` prints `@<secs>`, so the host's zone abbreviation never has to
// be parsed.
async fn active_since(runner: &dyn CommandRunner, service: &ServiceConfig) -> Result<String, ProbeError> {
    let args = systemctl_args(
        service,
        &[
            "show",
            service.unit.as_str(),
            "--property=ActiveEnterTimestamp",
            "--value",
            "--timestamp=unix",
        ],
    );
    let stdout = runner.run(SYSTEMCTL, &args).await?.into_stdout(SYSTEMCTL)?;
    Ok(stdout.trim().to_string())
}
