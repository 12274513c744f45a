//! pairlab - administer and annotate text-pair datasets.
//!
//! A thin wrapper over the pairlab libraries. Network URLs talk to the
//! annotation server; `file://` URLs use a local store.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{account, annotators, datasets, tasks};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Login(args) => account::login::run(args).await,
        Commands::Whoami(args) => account::whoami::run(args).await,
        Commands::Logout(args) => account::logout::run(args).await,
        Commands::CreateAccount(args) => account::create_account::run(args).await,
        Commands::Datasets(cmd) => datasets::handle(cmd).await,
        Commands::Annotators(cmd) => annotators::handle(cmd).await,
        Commands::Tasks(cmd) => tasks::handle(cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so list output on stdout stays parseable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
