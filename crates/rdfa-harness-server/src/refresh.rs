// crates/rdfa-harness-server/src/refresh.rs
// ============================================================================
// Module: RDFa Harness Corpus Refresh
// Description: Runs the configured update command in the corpus root.
// Purpose: Pull template corpus updates on explicit request.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The refresh command is configuration, never request input. It runs to
//! completion with the corpus root as working directory; its output is
//! captured for display.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// Result of one refresh run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    /// Command line that ran.
    pub command: Vec<String>,
    /// Exit code; `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Whether the command exited successfully.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

/// Refresh failures.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// No program was configured.
    #[error("refresh command is empty")]
    EmptyCommand,
    /// The program could not be started.
    #[error("failed to run {program}: {message}")]
    Spawn {
        /// Program name.
        program: String,
        /// Spawn error.
        message: String,
    },
}

/// Runs `command` in `root` and captures its output.
///
/// # Errors
///
/// Returns [`RefreshError`] when the command is empty or cannot be started.
/// A command that runs and fails is reported in [`RefreshReport`].
pub fn run_refresh(root: &Path, command: &[String]) -> Result<RefreshReport, RefreshError> {
    let (program, args) = command.split_first().ok_or(RefreshError::EmptyCommand)?;
    let output = Command::new(program).args(args).current_dir(root).output().map_err(|err| {
        RefreshError::Spawn {
            program: program.clone(),
            message: err.to_string(),
        }
    })?;
    Ok(RefreshReport {
        command: command.to_vec(),
        exit_code: output.status.code(),
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
