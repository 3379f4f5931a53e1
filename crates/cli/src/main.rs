// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cj: job status, cleanup and archiving for PBS clusters

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod output;
mod prompt;
mod table;

use anyhow::Result;
use cj_adapters::{CachedRunner, SystemRunner};
use cj_core::SystemClock;
use clap::{Parser, Subcommand};
use commands::archive::ArchiveArgs;
use commands::details::DetailsArgs;
use commands::Context;
use config::Config;
use exit_error::ExitError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cj",
    version,
    about = "Check job status. Without a subcommand, prints a summary of all jobs on the cluster.",
    styles = color::styles()
)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show running/queued/exiting counts per user and queue (the default)
    Summary,
    /// Show details of my jobs
    Details(DetailsArgs),
    /// Archive finished jobs into a compressed bundle
    Archive(ArchiveArgs),
    /// Delete all my queued and running jobs
    DeleteAll,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("{exit}");
            std::process::exit(exit.code);
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Warnings only by default; `-v` raises to debug, `CJ_LOG` overrides both.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let command = cli.command.unwrap_or(Command::Summary);

    // Deleting acts on what the scheduler reports right now
    let fresh = matches!(&command, Command::Details(args) if args.delete);
    let query = CachedRunner::new(SystemRunner, &config.cache_dir, &config.user, config.cache_max_age)
        .ignore_cache(fresh);
    let ctx = Context { config: &config, query: &query, action: &SystemRunner, clock: SystemClock };

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    match command {
        Command::Summary => commands::summary::run(&ctx, &mut stdout),
        Command::Details(args) => commands::details::run(&ctx, args, &mut stdin, &mut stdout),
        Command::Archive(args) => commands::archive::run(&ctx, args, &mut stdout),
        Command::DeleteAll => commands::delete_all::run(&ctx, &mut stdin, &mut stdout),
    }
}
