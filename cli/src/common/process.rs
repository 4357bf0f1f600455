//! # HostAtHome Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Runs external programs that take over the terminal: the user's editor for
//! `config`/`mods`, and `sudo dpkg -i` for `update`. The child inherits stdin,
//! stdout and stderr, and the call blocks until it exits.
//!
//! A non-zero exit status becomes `HostError::ExternalCommand`.
//!
use crate::core::error::{HostError, Result};
use anyhow::{anyhow, Context};
use std::ffi::OsStr;
use std::process::Command;
use tracing::{debug, instrument};

/// Runs `program` with `args` attached to the current terminal.
#[instrument(skip(program, args), fields(program = %program.as_ref().to_string_lossy()))]
pub fn run_interactive<S, I, A>(program: S, args: I) -> Result<()>
where
    S: AsRef<OsStr>,
    I: IntoIterator<Item = A>,
    A: AsRef<OsStr>,
{
    let mut command = Command::new(program.as_ref());
    command.args(args);
    let rendered = format!("{:?}", command);
    debug!("Running {}", rendered);

    let status = command
        .status()
        .with_context(|| format!("Failed to launch {}", program.as_ref().to_string_lossy()))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!(HostError::ExternalCommand {
            cmd: rendered,
            status: status.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_run_interactive_success() {
        assert!(run_interactive("true", std::iter::empty::<&str>()).is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn test_run_interactive_failure_status() {
        let err = run_interactive("sh", ["-c", "exit 3"]).unwrap_err();
        match err.downcast_ref::<HostError>() {
            Some(HostError::ExternalCommand { cmd, status }) => {
                assert!(cmd.contains("exit 3"));
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_run_interactive_missing_program() {
        let err = run_interactive("hostathome-no-such-program", ["x"]).unwrap_err();
        assert!(err.to_string().contains("Failed to launch"));
    }
}
