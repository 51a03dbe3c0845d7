use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hook-stepper")]
#[command(about = "Replay engine hook traces through the stepping state machine", long_about = None)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `hook_stepper=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON hook trace and report every break
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Commands answered at each break, shell-quoted (e.g. "next in out")
        #[arg(short = 'c', long = "commands", default_value = "")]
        commands: String,
    },
}
