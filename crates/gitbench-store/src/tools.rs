//! External tool invocation
//!
//! Tools run to completion with captured output. A non-zero exit is an
//! error carrying the tool's stderr (or stdout, when stderr is empty);
//! nothing is retried.

#![allow(clippy::result_large_err)]

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::{io_error, tool_failed, tool_missing, Result};

/// Captured output of a successful tool run
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Run `cmd`, labelled `op` in logs and errors
pub fn run_tool(op: &str, cmd: &mut Command) -> Result<ToolOutput> {
    let tool = cmd.get_program().to_string_lossy().into_owned();
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    tracing::debug!(component = module_path!(), op, tool = %tool, ?args);

    let cwd = cmd
        .get_current_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let output = cmd.stdin(Stdio::null()).output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            tool_missing(op, &tool, e)
        } else {
            io_error(op, &cwd, e).with_tool(tool.clone())
        }
    })?;

    if !output.status.success() {
        return Err(tool_failed(
            op,
            &tool,
            output.status.code(),
            &output.stderr,
            &output.stdout,
        ));
    }

    Ok(ToolOutput {
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

/// Whether `program --version` can be run successfully
pub fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
