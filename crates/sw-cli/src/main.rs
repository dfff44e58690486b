//! Stepwise CLI - a stepwise database schema migration runner

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{new, status, up};
use sw_core::Verbosity;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // clap already rejects --verbose --quiet; from_flags also covers
    // callers that construct the flags programmatically.
    let verbosity = Verbosity::from_flags(cli.global.verbose, cli.global.quiet)?;
    env_logger::Builder::new()
        .filter_level(verbosity.level_filter())
        .format_timestamp(None)
        .init();

    match &cli.command {
        cli::Commands::Up(args) => up::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::New(args) => new::execute(args, &cli.global).await,
    }
}
