//! Disk usage of result files

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::errors::{io_error, Result};
use crate::tools::run_tool;

/// Human-readable usage as reported by `du -hs`
#[derive(Debug, Clone)]
pub struct DiskUsage {
    bin: String,
}

impl DiskUsage {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// `du -hs <path>` output line, e.g. `1.2M\t/path/.git`
    pub fn human(&self, path: &Path) -> Result<String> {
        let output = run_tool("disk_usage", Command::new(&self.bin).arg("-hs").arg(path))?;
        Ok(output.stdout_lossy().trim_end().to_string())
    }
}

impl Default for DiskUsage {
    fn default() -> Self {
        Self::new("du")
    }
}

/// Apparent size in bytes of a file, or of every file below a directory
///
/// Symlinks are counted by their own size and never followed.
pub fn size_bytes(path: &Path) -> Result<u64> {
    let meta = fs::symlink_metadata(path).map_err(|e| io_error("stat", path, e))?;
    if !meta.is_dir() {
        return Ok(meta.len());
    }
    let mut total = 0;
    for entry in fs::read_dir(path).map_err(|e| io_error("read_dir", path, e))? {
        let entry = entry.map_err(|e| io_error("read_dir", path, e))?;
        total += size_bytes(&entry.path())?;
    }
    Ok(total)
}
