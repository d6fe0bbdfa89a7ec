//! gitbench core - workload model and ambient facilities
//!
//! This crate holds everything that does not touch the filesystem or an
//! external process:
//! - Error facility (`ExError`, `ExErrorKind`) and the domain `BenchError`
//! - Structured logging facility with test capture
//! - Run configuration (`BenchConfig`, `Variant`)
//! - SQL statement generation for the randomized workload
//! - Row tracking and per-operation planning

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod sql;
pub mod workload;

// Macros reach the schema constants through this path
pub use gitbench_core_types as types;

// Re-export commonly used types
pub use config::{BenchConfig, GitIdentity, Variant};
pub use errors::{BenchError, ExError, ExErrorKind, Result};
pub use workload::{OpKind, Operation, RowTracker};
