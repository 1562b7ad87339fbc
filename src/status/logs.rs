//! Tail of the watched service's log, from the journal or from a flat file

use crate::config::{LogConfig, LogSourceKind, ServiceConfig};
use crate::http::models::{LogOrigin, LogSnapshot};
use crate::status::command::CommandRunner;
use crate::status::errors::ProbeError;

const JOURNALCTL: &str = "journalctl";

pub async fn tail(
    runner: &dyn CommandRunner,
    service: &ServiceConfig,
    log: &LogConfig,
) -> LogSnapshot {
    match log.source {
        LogSourceKind::Journal => tail_journal(runner, service, log.tail).await,
        LogSourceKind::File => tail_file(&log.path, log.tail).await,
    }
}

/// `totalLines` is the number of lines kept.
pub async fn tail_journal(runner: &dyn CommandRunner, service: &ServiceConfig, n: usize) -> LogSnapshot {
    match read_journal(runner, service, n).await {
        Ok(text) => {
            let (lines, _) = last_lines(&text, n);
            LogSnapshot {
                total_lines: lines.len(),
                lines,
                error: None,
                origin: LogOrigin::journal(),
            }
        }
        Err(e) => {
            tracing::warn!("reading journal of {} failed: {}", service.unit, e);
            LogSnapshot::failed(LogOrigin::journal(), e)
        }
    }
}

/// `totalLines` is the number of non-empty lines in the whole file.
pub async fn tail_file(path: &str, n: usize) -> LogSnapshot {
    match read_file(path).await {
        Ok(text) => {
            let (lines, total) = last_lines(&text, n);
            LogSnapshot {
                lines,
                total_lines: total,
                error: None,
                origin: LogOrigin::file(path),
            }
        }
        Err(e) => {
            tracing::warn!("reading log file failed: {}", e);
            LogSnapshot::failed(LogOrigin::file(path), e)
        }
    }
}

async fn read_journal(runner: &dyn CommandRunner, service: &ServiceConfig, n: usize) -> Result<String, ProbeError> {
    let count = n.to_string();
    let mut args = Vec::with_capacity(8);
    if service.user_scope {
        args.push("--user");
    }
    args.extend_from_slice(&[
        "-u",
        service.unit.as_str(),
        "--no-pager",
        "-n",
        count.as_str(),
        "--output=short-iso",
    ]);
    runner.run(JOURNALCTL, &args).await?.into_stdout(JOURNALCTL)
}

async fn read_file(path: &str) -> Result<String, ProbeError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ProbeError::Read {
        path: path.to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Last `n` lines that are not blank, oldest first, plus the count of all
/// non-blank lines.
pub fn last_lines(text: &str, n: usize) -> (Vec<String>, usize) {
    let all: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let skip = all.len().saturating_sub(n);
    let kept = all[skip..].iter().map(|l| l.to_string()).collect();
    (kept, all.len())
}
