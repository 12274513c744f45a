//! Annotator administration commands.

mod add;
mod browse;
mod delete;
mod edit;
mod list;
mod stats;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AnnotatorsCommand {
    #[command(subcommand)]
    pub command: AnnotatorsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AnnotatorsSubcommand {
    /// List annotators with search, status filters and paging
    List(list::ListAnnotatorsArgs),

    /// Count active and inactive annotators
    Stats(stats::StatsArgs),

    /// Create an annotator
    Add(add::AddArgs),

    /// Update an annotator
    Edit(edit::EditArgs),

    /// Delete an annotator
    Delete(delete::DeleteArgs),

    /// Browse annotators interactively
    Browse(browse::BrowseArgs),
}

pub async fn handle(cmd: AnnotatorsCommand) -> Result<()> {
    match cmd.command {
        AnnotatorsSubcommand::List(args) => list::run(args).await,
        AnnotatorsSubcommand::Stats(args) => stats::run(args).await,
        AnnotatorsSubcommand::Add(args) => add::run(args).await,
        AnnotatorsSubcommand::Edit(args) => edit::run(args).await,
        AnnotatorsSubcommand::Delete(args) => delete::run(args).await,
        AnnotatorsSubcommand::Browse(args) => browse::run(args).await,
    }
}
