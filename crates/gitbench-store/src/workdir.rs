//! Work directory layout
//!
//! Every run owns one directory holding the database, its dump, the git
//! repository and the result files. It is wiped at the start of a run.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{io_error, unsafe_workdir, Result};

pub const DB_FILE: &str = "bench.db";
pub const DUMP_FILE: &str = "bench.sql";
pub const GIT_DIR: &str = ".git";
pub const MILLISEC_FILE: &str = "millisec";
pub const SUMMARY_FILE: &str = "summary.json";

/// Every name a run creates in its work directory
const RUN_ENTRIES: &[&str] = &[
    DB_FILE,
    "bench.db-journal",
    DUMP_FILE,
    GIT_DIR,
    MILLISEC_FILE,
    SUMMARY_FILE,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchPaths {
    root: PathBuf,
}

impl BenchPaths {
    /// Resolve `root` against the current directory
    ///
    /// Paths are kept absolute because external tools run with the work
    /// directory as their current directory.
    pub fn resolve(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| io_error("current_dir", root, e))?
                .join(root)
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_file(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    pub fn dump_file(&self) -> PathBuf {
        self.root.join(DUMP_FILE)
    }

    pub fn git_dir(&self) -> PathBuf {
        self.root.join(GIT_DIR)
    }

    pub fn millisec_file(&self) -> PathBuf {
        self.root.join(MILLISEC_FILE)
    }

    pub fn summary_file(&self) -> PathBuf {
        self.root.join(SUMMARY_FILE)
    }

    /// Delete the directory (if present) and recreate it empty
    ///
    /// A non-empty directory is only deleted when it looks like a work
    /// directory: it holds a `bench.db` or `bench.sql`, or it holds nothing
    /// but entries a run creates (an interrupted run may leave only `.git`).
    /// A mistyped `--workdir` therefore cannot wipe unrelated files.
    pub fn reset(&self) -> Result<()> {
        if self.root.is_dir() {
            if !self.looks_like_workdir()? {
                return Err(unsafe_workdir(&self.root));
            }
            fs::remove_dir_all(&self.root).map_err(|e| io_error("remove_workdir", &self.root, e))?;
        }
        fs::create_dir_all(&self.root).map_err(|e| io_error("create_workdir", &self.root, e))?;
        tracing::debug!(
            component = module_path!(),
            op = "reset_workdir",
            path = %self.root.display(),
        );
        Ok(())
    }

    fn looks_like_workdir(&self) -> Result<bool> {
        if self.db_file().exists() || self.dump_file().exists() {
            return Ok(true);
        }
        let entries =
            fs::read_dir(&self.root).map_err(|e| io_error("read_workdir", &self.root, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_error("read_workdir", &self.root, e))?;
            let name = entry.file_name();
            if !RUN_ENTRIES.iter().any(|known| name == *known) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
