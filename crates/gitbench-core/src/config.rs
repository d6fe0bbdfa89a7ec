//! Run configuration
//!
//! Defaults reproduce the original harness: 2 tables of 10 integer fields,
//! 3 fields touched per update, values below 2^24, 1000 operations, all
//! files under `./work`.
//!
//! Precedence is defaults < TOML file < command-line flags; the CLI applies
//! the last layer through the public fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{BenchError, Result};

pub const DEFAULT_TABLES: usize = 2;
pub const DEFAULT_FIELDS: usize = 10;
pub const DEFAULT_UPDATE_FIELDS: usize = 3;
pub const DEFAULT_VALUE_BOUND: u32 = 1 << 24;
pub const DEFAULT_OPS: usize = 1000;
pub const DEFAULT_WORKDIR: &str = "work";

/// Which flavour of the benchmark to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Dump after every op, no version control
    Dump,
    /// Dump and commit after every op
    Commit,
    /// Dump and commit, record per-op timings and print final disk usage
    Timed,
}

impl Variant {
    pub fn commits(&self) -> bool {
        matches!(self, Variant::Commit | Variant::Timed)
    }

    pub fn records_timings(&self) -> bool {
        matches!(self, Variant::Timed)
    }

    pub fn reports_stats(&self) -> bool {
        matches!(self, Variant::Timed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Dump => "dump",
            Variant::Commit => "commit",
            Variant::Timed => "timed",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author/committer identity handed to git through its environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Number of tables in the schema
    pub tables: usize,
    /// Integer fields per table, excluding the key
    pub fields: usize,
    /// Distinct fields rewritten by each update
    pub update_fields: usize,
    /// Random values are drawn from `[0, value_bound)`
    pub value_bound: u32,
    /// Number of insert/update operations
    pub ops: usize,
    pub workdir: PathBuf,
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub sqlite3_bin: String,
    pub git_bin: String,
    pub du_bin: String,
    pub git_identity: Option<GitIdentity>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TABLES,
            fields: DEFAULT_FIELDS,
            update_fields: DEFAULT_UPDATE_FIELDS,
            value_bound: DEFAULT_VALUE_BOUND,
            ops: DEFAULT_OPS,
            workdir: PathBuf::from(DEFAULT_WORKDIR),
            seed: None,
            sqlite3_bin: "sqlite3".to_string(),
            git_bin: "git".to_string(),
            du_bin: "du".to_string(),
            git_identity: None,
        }
    }
}

impl BenchConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BenchError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject configurations the workload cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.tables == 0 {
            return Err(BenchError::InvalidConfig {
                reason: "tables must be at least 1".to_string(),
            });
        }
        if self.update_fields == 0 {
            return Err(BenchError::InvalidConfig {
                reason: "update_fields must be at least 1".to_string(),
            });
        }
        if self.fields < self.update_fields {
            return Err(BenchError::TooFewFields {
                fields: self.fields,
                required: self.update_fields,
            });
        }
        if self.value_bound == 0 {
            return Err(BenchError::InvalidConfig {
                reason: "value_bound must be positive".to_string(),
            });
        }
        Ok(())
    }
}
