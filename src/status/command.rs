//! External command execution behind a trait, so probes can be driven by scripted
//! output in tests.

use std::sync::Mutex;
use async_trait::async_trait;
use tokio::process::Command;
use crate::status::errors::ProbeError;

/// Captured result of one finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout of a successful run, the exit failure otherwise.
    pub fn into_stdout(self, program: &str) -> Result<String, ProbeError> {
        if self.success {
            return Ok(self.stdout);
        }
        Err(ProbeError::Exited {
            program: program.to_string(),
            code: self.code,
            stderr: self.stderr.trim().to_string(),
        })
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion. Only a failure to start the process
    /// is an error here; exit status is reported in the output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError>;
}

/// Spawns real processes on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError> {
        tracing::trace!("exec {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Canned answers keyed by command line, for tests and dry runs.
///
/// A key matches when the full command line (`program arg arg ...`) starts with it;
/// the first matching key wins. Unscripted commands fail as if the binary were missing.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Vec<(String, Option<CommandOutput>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful run printing `stdout`
    pub fn stdout(self, command: &str, stdout: &str) -> Self {
        self.exit(command, 0, stdout, "")
    }

    pub fn exit(mut self, command: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.responses.push((
            command.to_string(),
            Some(CommandOutput {
                success: code == 0,
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
        ));
        self
    }

    /// The program cannot be started
    pub fn missing(mut self, command: &str) -> Self {
        self.responses.push((command.to_string(), None));
        self
    }

    /// Command lines seen so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ProbeError> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.clone());

        let scripted = self
            .responses
            .iter()
            .find(|(key, _)| line.starts_with(key.as_str()))
            .and_then(|(_, output)| output.clone());
        scripted.ok_or_else(|| ProbeError::Spawn {
            program: program.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        })
    }
}
