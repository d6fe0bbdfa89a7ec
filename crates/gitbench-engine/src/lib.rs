//! gitbench engine - run orchestration
//!
//! Drives one benchmark run (setup → per-op mutate/dump/commit → report)
//! over the `Dumper` and `Vcs` seams provided by gitbench-store.

pub mod bench;
pub mod report;

pub use bench::{run_bench, BenchOutcome};
pub use report::{crunch_final_stats, BenchSummary, TimingStats};
