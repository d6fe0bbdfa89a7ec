//! Options and wiring shared by every variant

use clap::Args;
use gitbench_core::{BenchConfig, ExError, Variant};
use gitbench_engine::{run_bench, BenchOutcome};
use gitbench_store::{BenchPaths, GitCli, NoVcs, Sqlite3Dumper, Vcs};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// TOML configuration file; flags given here override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Work directory, wiped at the start of the run [default: ./work]
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Seed for the workload RNG (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CommonArgs {
    /// Defaults, then the config file, then flags
    pub fn load_config(&self) -> Result<BenchConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_file(path).map_err(ExError::from)?,
            None => BenchConfig::default(),
        };
        if let Some(workdir) = &self.workdir {
            config.workdir = workdir.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

/// Version control matching the variant
pub fn vcs_for(variant: Variant, config: &BenchConfig, paths: &BenchPaths) -> Box<dyn Vcs> {
    if variant.commits() {
        Box::new(
            GitCli::new(config.git_bin.clone(), paths.root())
                .with_identity(config.git_identity.clone()),
        )
    } else {
        Box::new(NoVcs)
    }
}

/// Run one variant with the real tools
pub fn run(
    config: &BenchConfig,
    variant: Variant,
    paths: &BenchPaths,
    vcs: &dyn Vcs,
) -> Result<BenchOutcome, Box<dyn std::error::Error>> {
    let dumper = Sqlite3Dumper::new(config.sqlite3_bin.clone());
    Ok(run_bench(config, variant, paths, &dumper, vcs)?)
}

pub fn print_completion(outcome: &BenchOutcome, paths: &BenchPaths) {
    println!(
        "Completed {} operations ({} inserts, {} updates) in {}",
        outcome.ops(),
        outcome.inserts,
        outcome.updates,
        paths.root().display()
    );
    println!("  seed: {}", outcome.seed);
}
