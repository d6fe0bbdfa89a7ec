//! SQL dump of the benchmark database

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::process::Command;

use crate::errors::Result;
use crate::fs::atomic_write;
use crate::tools::run_tool;

/// Produces a text dump of a database file
pub trait Dumper {
    /// Replace `dump_path` with a dump of `db_path`; returns the dump size in bytes
    fn dump(&self, db_path: &Path, dump_path: &Path) -> Result<u64>;
}

/// Dumps through the `sqlite3` command-line shell's `.dump` command
#[derive(Debug, Clone)]
pub struct Sqlite3Dumper {
    bin: String,
}

impl Sqlite3Dumper {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for Sqlite3Dumper {
    fn default() -> Self {
        Self::new("sqlite3")
    }
}

impl Dumper for Sqlite3Dumper {
    fn dump(&self, db_path: &Path, dump_path: &Path) -> Result<u64> {
        let output = run_tool(
            "sqlite3_dump",
            Command::new(&self.bin).arg(db_path).arg(".dump"),
        )?;
        atomic_write(dump_path, &output.stdout)?;
        Ok(output.stdout.len() as u64)
    }
}
