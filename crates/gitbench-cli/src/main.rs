//! gitbench CLI
//!
//! Measures how a SQLite database and a git repository grow when a SQL dump
//! of the database is committed after every mutation.

use clap::{Parser, Subcommand};
use gitbench_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "gitbench")]
#[command(about = "Benchmark git repository growth from per-mutation SQLite dumps", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Dump the database after every operation, without version control
    Dump(commands::dump::DumpArgs),
    /// Dump and commit the dump to git after every operation
    Commit(commands::commit::CommitArgs),
    /// Dump and commit, record per-operation timings, report disk usage
    Timed(commands::timed::TimedArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Dump(args) => commands::dump::execute(args),
        Commands::Commit(args) => commands::commit::execute(args),
        Commands::Timed(args) => commands::timed::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
