mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use hook_stepper::executor::{parse_commands, Replay, Trace};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay { trace, commands } => {
            let loaded = Trace::load(&trace)
                .with_context(|| format!("loading trace {}", trace.display()))?;
            let commands = parse_commands(&commands)?;

            let mut replay = Replay::new(commands);
            let report = replay.run(&loaded)?;

            for (i, (stop, answer)) in report.stops.iter().enumerate() {
                println!(
                    "#{} {} at {} (depth {}) -> {:?}",
                    i + 1,
                    stop.handle,
                    stop.location,
                    stop.depth,
                    answer
                );
            }
            if report.stops.is_empty() {
                println!("no breaks");
            }
        }
    }

    Ok(())
}
