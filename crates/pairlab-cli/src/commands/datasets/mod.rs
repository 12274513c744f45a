//! Dataset administration commands.

mod assign;
mod browse;
mod create;
mod list;
mod show;
mod stats;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct DatasetsCommand {
    #[command(subcommand)]
    pub command: DatasetsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DatasetsSubcommand {
    /// List datasets with search, status filters and paging
    List(list::ListDatasetsArgs),

    /// Count datasets per status
    Stats(stats::StatsArgs),

    /// Show a dataset with its couples and annotators
    Show(show::ShowArgs),

    /// Upload a new dataset
    Create(create::CreateArgs),

    /// Assign a dataset to annotators
    Assign(assign::AssignArgs),

    /// Browse datasets interactively
    Browse(browse::BrowseArgs),
}

pub async fn handle(cmd: DatasetsCommand) -> Result<()> {
    match cmd.command {
        DatasetsSubcommand::List(args) => list::run(args).await,
        DatasetsSubcommand::Stats(args) => stats::run(args).await,
        DatasetsSubcommand::Show(args) => show::run(args).await,
        DatasetsSubcommand::Create(args) => create::run(args).await,
        DatasetsSubcommand::Assign(args) => assign::run(args).await,
        DatasetsSubcommand::Browse(args) => browse::run(args).await,
    }
}
