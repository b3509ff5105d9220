//! gemstage - default gem staging for a runtime's stdlib distribution
//!
//! Installs a flat list of gems into a gem home and merges their libraries,
//! executable stubs, and specifications into the shared stdlib tree. A second
//! command deploys a web archive to a local server and verifies the served pages.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod common;
mod config;
mod deploy;
mod dirinfo;
mod domain;
mod error;
mod fetch;
mod http;
mod installer;
mod process;
mod progress;
mod staging;

use cli::{Cli, Commands};

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "gemstage=debug"
    } else {
        "gemstage=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let properties = cli.properties();

    let result = match cli.command {
        Commands::Stage(args) => commands::stage::run(config, &properties, args),
        Commands::Deploy(args) => commands::deploy::run(config, &properties, args),
        Commands::DirInfo(args) => commands::dir_info::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
