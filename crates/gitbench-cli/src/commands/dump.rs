//! Dump-only variant
//!
//! Usage: gitbench dump [--config <FILE>] [--workdir <DIR>] [--seed <N>]

use clap::Args;
use gitbench_core::Variant;
use gitbench_store::BenchPaths;

use super::common::{print_completion, run, vcs_for, CommonArgs};

#[derive(Debug, Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: DumpArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.common.load_config()?;
    let paths = BenchPaths::resolve(&config.workdir)?;
    let vcs = vcs_for(Variant::Dump, &config, &paths);

    let outcome = run(&config, Variant::Dump, &paths, vcs.as_ref())?;
    print_completion(&outcome, &paths);
    Ok(())
}
