//! Error helpers for gitbench-store
//!
//! Builds gitbench-core `ExError` values for the failure sources of this crate

use std::path::Path;

use gitbench_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path)
        .with_message(err.to_string())
}

/// An external tool exited unsuccessfully
///
/// The message is the tool's stderr, or its stdout when stderr is empty
/// (`git commit` reports on stdout). `exit_code` is `None` when the process
/// was killed by a signal.
pub fn tool_failed(
    operation: &str,
    tool: &str,
    exit_code: Option<i32>,
    stderr: &[u8],
    stdout: &[u8],
) -> ExError {
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();
    let message = if !stderr.is_empty() {
        stderr
    } else {
        let stdout = String::from_utf8_lossy(stdout).trim().to_string();
        if stdout.is_empty() {
            format!("{} exited unsuccessfully", tool)
        } else {
            stdout
        }
    };
    let err = ExError::new(ExErrorKind::ExternalTool)
        .with_op(operation.to_string())
        .with_tool(tool)
        .with_message(message);
    match exit_code {
        Some(code) => err.with_exit_code(code),
        None => err,
    }
}

/// An external tool could not be started
pub fn tool_missing(operation: &str, tool: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::ToolMissing)
        .with_op(operation.to_string())
        .with_tool(tool)
        .with_message(format!("cannot run {}: {}", tool, err))
}

/// Refusal to delete a directory that does not look like a bench work directory
pub fn unsafe_workdir(path: &Path) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("reset_workdir")
        .with_path(path)
        .with_message("refusing to delete a directory that does not look like a gitbench work directory")
}
