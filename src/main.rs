use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Args, Config, Repl};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::from(&args);
    let table = config.load_table()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Repl::new(table, config, stdin.lock(), stdout.lock()).run()
}
