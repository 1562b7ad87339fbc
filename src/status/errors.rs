//! Failures of the external reads behind the status endpoints

use std::fmt;
use std::fmt::Display;

/// Reasons a status probe could not read its source
#[derive(Debug)]
pub enum ProbeError {
    /// The program could not be started at all (missing binary, permissions)
    Spawn { program: String, source: std::io::Error },

    /// The program ran but exited unsuccessfully without usable output
    Exited { program: String, code: Option<i32>, stderr: String },

    /// A file could not be read
    Read { path: String, source: std::io::Error },

    /// A file was read but is not valid JSON
    Parse { path: String, source: serde_json::Error },
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Spawn { source, .. } | ProbeError::Read { source, .. } => Some(source),
            ProbeError::Parse { source, .. } => Some(source),
            ProbeError::Exited { .. } => None,
        }
    }
}

impl Display for ProbeError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProbeError::Spawn { program, source } => {
                write!(fmt, "failed to execute {}: {}", program, source)
            }
            ProbeError::Exited { program, code, stderr } => {
                match code {
                    Some(code) => write!(fmt, "{} exited with status {}", program, code)?,
                    None => write!(fmt, "{} terminated by signal", program)?,
                }
                if !stderr.is_empty() {
                    write!(fmt, ": {}", stderr)?;
                }
                Ok(())
            }
            ProbeError::Read { path, source } => write!(fmt, "{}: {}", path, source),
            ProbeError::Parse { path, source } => write!(fmt, "{}: {}", path, source),
        }
    }
}
