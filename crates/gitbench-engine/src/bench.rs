//! Benchmark run orchestration
//!
//! ## Run pipeline (in order):
//! 1. Reset the work directory and initialize version control
//! 2. Create the schema in a fresh database, dump it, commit it
//! 3. Per op: plan, execute in its own connection, dump, commit, time
//! 4. Write the timings file when the variant records timings
//!
//! Any failure stops the run and is returned unchanged; there are no
//! retries and no partial-failure recovery.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use chrono::{DateTime, Utc};
use gitbench_core::sql::StatementShape;
use gitbench_core::workload::{OpKind, RowTracker, INITIAL_COMMIT_MESSAGE};
use gitbench_core::{log_op_end, log_op_error, log_op_start, BenchConfig, ExError, Variant};
use gitbench_core_types::RunId;
use gitbench_store::fs::write_timings;
use gitbench_store::{db, BenchPaths, Dumper, Result, Vcs};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Emit a progress event every this many operations
const PROGRESS_EVERY: usize = 100;

/// What a completed run observed
#[derive(Debug, Clone)]
pub struct BenchOutcome {
    pub run_id: RunId,
    pub variant: Variant,
    /// Seed of the workload RNG; rerunning with it replays the same statements
    pub seed: u64,
    /// Wall-clock milliseconds per op, covering execute, dump and commit
    pub timings_ms: Vec<u64>,
    pub inserts: usize,
    pub updates: usize,
    pub rows_per_table: Vec<u64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BenchOutcome {
    pub fn ops(&self) -> usize {
        self.inserts + self.updates
    }
}

/// Run the benchmark described by `config` in `paths`
///
/// `vcs` receives the initial commit plus one commit per op; pass `NoVcs`
/// for the dump-only variant.
pub fn run_bench(
    config: &BenchConfig,
    variant: Variant,
    paths: &BenchPaths,
    dumper: &dyn Dumper,
    vcs: &dyn Vcs,
) -> Result<BenchOutcome> {
    config.validate().map_err(ExError::from)?;

    let run_id = RunId::new();
    let seed = config.seed.unwrap_or_else(rand::random);
    let span = tracing::info_span!("bench_run", run_id = %run_id, variant = %variant);
    let _guard = span.enter();

    let start = Instant::now();
    log_op_start!(
        "run_bench",
        run_id = %run_id,
        variant = variant.as_str(),
        ops = config.ops,
        seed = seed,
        workdir = %paths.root().display(),
    );

    match execute_run(config, variant, paths, dumper, vcs, run_id.clone(), seed) {
        Ok(outcome) => {
            log_op_end!(
                "run_bench",
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = %run_id,
                inserts = outcome.inserts,
                updates = outcome.updates,
            );
            Ok(outcome)
        }
        Err(err) => {
            log_op_error!(
                "run_bench",
                err,
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = %run_id,
            );
            Err(err)
        }
    }
}

fn execute_run(
    config: &BenchConfig,
    variant: Variant,
    paths: &BenchPaths,
    dumper: &dyn Dumper,
    vcs: &dyn Vcs,
    run_id: RunId,
    seed: u64,
) -> Result<BenchOutcome> {
    let started_at = Utc::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let shape = StatementShape::from_config(config);
    let db_file = paths.db_file();
    let dump_file = paths.dump_file();

    paths.reset()?;
    vcs.init()?;

    db::create_schema(&db_file, config.tables, config.fields)?;
    dumper.dump(&db_file, &dump_file)?;
    vcs.commit(&dump_file, INITIAL_COMMIT_MESSAGE)?;

    let mut tracker = RowTracker::new(config.tables);
    let mut timings_ms = Vec::with_capacity(config.ops);
    let mut inserts = 0;
    let mut updates = 0;

    for _ in 0..config.ops {
        let op_start = Instant::now();

        let op = tracker.plan(&mut rng);
        let sql = tracker
            .statement(&mut rng, &op, &shape)
            .map_err(ExError::from)?;
        db::execute_op(&db_file, &sql)?;
        tracker.record(&op);
        match op.kind {
            OpKind::Insert => inserts += 1,
            OpKind::Update => updates += 1,
        }

        let dump_bytes = dumper.dump(&db_file, &dump_file)?;
        vcs.commit(&dump_file, &op.commit_message())?;

        let elapsed_ms = op_start.elapsed().as_millis() as u64;
        timings_ms.push(elapsed_ms);

        tracing::debug!(
            component = module_path!(),
            op = "bench_op",
            op_index = op.index,
            op_kind = op.kind.as_str(),
            table = op.table,
            dump_bytes,
            elapsed_ms,
        );
        if (op.index + 1) % PROGRESS_EVERY == 0 {
            tracing::info!(
                component = module_path!(),
                op = "bench_progress",
                done = op.index + 1,
                total = config.ops,
            );
        }
    }

    if variant.records_timings() {
        write_timings(&paths.millisec_file(), &timings_ms)?;
    }

    Ok(BenchOutcome {
        run_id,
        variant,
        seed,
        timings_ms,
        inserts,
        updates,
        rows_per_table: tracker.row_counts().to_vec(),
        started_at,
        finished_at: Utc::now(),
    })
}
