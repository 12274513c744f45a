//! Dataset statistics command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::model::DatasetStats;
use pairlab_core::traits::AdminSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print the counts as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StatsArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let datasets = session
        .list_datasets()
        .await
        .context("Failed to list datasets")?;
    let stats = DatasetStats::from_datasets(&datasets);

    if args.json {
        return output::json(&stats);
    }

    output::field("Total", &datasets.len().to_string());
    output::field("Completed", &stats.completed.to_string());
    output::field("In progress", &stats.in_progress.to_string());
    output::field("Unassigned", &stats.unassigned.to_string());

    Ok(())
}
