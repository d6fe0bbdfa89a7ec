//! gitbench store - filesystem, database and external tool access
//!
//! Provides:
//! - Work directory layout and reset
//! - SQLite schema creation and one-connection-per-op execution
//! - `Dumper` (sqlite3 `.dump`) and `Vcs` (git) seams with CLI implementations
//! - Disk usage measurement and the per-op timings file

pub mod db;
pub mod disk_usage;
pub mod dump;
pub mod errors;
pub mod fs;
pub mod tools;
pub mod vcs;
pub mod workdir;

// Re-export key types
pub use dump::{Dumper, Sqlite3Dumper};
pub use errors::Result;
pub use vcs::{GitCli, NoVcs, Vcs};
pub use workdir::BenchPaths;
