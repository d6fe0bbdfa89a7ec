//! Final statistics
//!
//! Prints the dump size, the repository size, compacts the repository with
//! `git gc --aggressive` and prints its size again. The same numbers (as
//! byte counts) plus timing statistics are written to `summary.json`.

#![allow(clippy::result_large_err)]

use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, Utc};
use gitbench_core::{log_op_end, log_op_start, ExError, ExErrorKind, Variant};
use gitbench_core_types::RunId;
use gitbench_store::disk_usage::{size_bytes, DiskUsage};
use gitbench_store::fs::atomic_write;
use gitbench_store::{BenchPaths, Result, Vcs};
use serde::{Deserialize, Serialize};

use crate::bench::BenchOutcome;

/// Distribution of per-op timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingStats {
    pub count: usize,
    pub total_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub mean_ms: f64,
    pub p50_ms: u64,
    pub p95_ms: u64,
}

impl TimingStats {
    /// `None` for an empty run
    pub fn from_millis(millis: &[u64]) -> Option<Self> {
        if millis.is_empty() {
            return None;
        }
        let mut sorted = millis.to_vec();
        sorted.sort_unstable();
        let total_ms: u64 = sorted.iter().sum();
        Some(Self {
            count: sorted.len(),
            total_ms,
            min_ms: sorted[0],
            max_ms: sorted[sorted.len() - 1],
            mean_ms: total_ms as f64 / sorted.len() as f64,
            p50_ms: nearest_rank(&sorted, 50),
            p95_ms: nearest_rank(&sorted, 95),
        })
    }
}

/// Nearest-rank percentile of an ascending, non-empty slice
fn nearest_rank(sorted: &[u64], percentile: usize) -> u64 {
    let rank = (percentile * sorted.len()).div_ceil(100).max(1);
    sorted[rank - 1]
}

/// Contents of `summary.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchSummary {
    pub run_id: RunId,
    pub variant: Variant,
    pub seed: u64,
    pub ops: usize,
    pub inserts: usize,
    pub updates: usize,
    pub rows_per_table: Vec<u64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub db_bytes: u64,
    pub dump_bytes: u64,
    pub repo_bytes_before_gc: Option<u64>,
    pub repo_bytes_after_gc: Option<u64>,
    pub timings: Option<TimingStats>,
}

fn write_err(err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op("write_report")
        .with_message(err.to_string())
}

fn print_disk_usage(
    out: &mut dyn Write,
    du: &DiskUsage,
    title: &str,
    path: &std::path::Path,
) -> Result<()> {
    let line = du.human(path)?;
    writeln!(out, "{}", title).map_err(write_err)?;
    writeln!(out, "{}", line).map_err(write_err)?;
    Ok(())
}

/// Print final disk usage, compact the repository, and write `summary.json`
///
/// Repository sections are skipped when `vcs` keeps no repository.
pub fn crunch_final_stats(
    outcome: &BenchOutcome,
    paths: &BenchPaths,
    vcs: &dyn Vcs,
    du: &DiskUsage,
    out: &mut dyn Write,
) -> Result<BenchSummary> {
    let start = Instant::now();
    log_op_start!("crunch_final_stats", run_id = %outcome.run_id);

    let dump_file = paths.dump_file();
    writeln!(out).map_err(write_err)?;
    print_disk_usage(out, du, "Size of final SQL dump:", &dump_file)?;
    let dump_bytes = size_bytes(&dump_file)?;

    let mut repo_bytes_before_gc = None;
    let mut repo_bytes_after_gc = None;
    if let Some(repo_dir) = vcs.repo_dir() {
        writeln!(out).map_err(write_err)?;
        print_disk_usage(out, du, "Size of final .git dir:", &repo_dir)?;
        repo_bytes_before_gc = Some(size_bytes(&repo_dir)?);

        writeln!(out).map_err(write_err)?;
        vcs.gc_aggressive()?;

        writeln!(out).map_err(write_err)?;
        print_disk_usage(
            out,
            du,
            "Size of final .git dir after `git gc --aggressive`:",
            &repo_dir,
        )?;
        repo_bytes_after_gc = Some(size_bytes(&repo_dir)?);
    }
    out.flush().map_err(write_err)?;

    let summary = BenchSummary {
        run_id: outcome.run_id.clone(),
        variant: outcome.variant,
        seed: outcome.seed,
        ops: outcome.ops(),
        inserts: outcome.inserts,
        updates: outcome.updates,
        rows_per_table: outcome.rows_per_table.clone(),
        started_at: outcome.started_at,
        finished_at: outcome.finished_at,
        db_bytes: size_bytes(&paths.db_file())?,
        dump_bytes,
        repo_bytes_before_gc,
        repo_bytes_after_gc,
        timings: TimingStats::from_millis(&outcome.timings_ms),
    };

    let json = serde_json::to_vec_pretty(&summary).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("write_summary")
            .with_message(e.to_string())
    })?;
    atomic_write(&paths.summary_file(), &json)?;

    log_op_end!(
        "crunch_final_stats",
        duration_ms = start.elapsed().as_millis() as u64,
        dump_bytes = dump_bytes,
        repo_bytes_after_gc = repo_bytes_after_gc.unwrap_or(0),
    );
    Ok(summary)
}
