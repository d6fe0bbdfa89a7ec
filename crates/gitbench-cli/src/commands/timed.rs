//! Timed variant with final disk-usage statistics
//!
//! Usage: gitbench timed [N] [--config <FILE>] [--workdir <DIR>] [--seed <N>]

use clap::Args;
use gitbench_core::Variant;
use gitbench_engine::crunch_final_stats;
use gitbench_store::disk_usage::DiskUsage;
use gitbench_store::BenchPaths;

use super::common::{run, vcs_for, CommonArgs};

#[derive(Debug, Args)]
pub struct TimedArgs {
    /// Number of operations [default: 1000, or `ops` from the config file]
    pub n: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: TimedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = args.common.load_config()?;
    if let Some(n) = args.n {
        config.ops = n;
    }
    let paths = BenchPaths::resolve(&config.workdir)?;
    let vcs = vcs_for(Variant::Timed, &config, &paths);

    let outcome = run(&config, Variant::Timed, &paths, vcs.as_ref())?;

    let du = DiskUsage::new(config.du_bin.clone());
    let mut stdout = std::io::stdout().lock();
    crunch_final_stats(&outcome, &paths, vcs.as_ref(), &du, &mut stdout)?;
    Ok(())
}
