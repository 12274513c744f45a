//! Annotator statistics command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::model::AnnotatorStats;
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

    let annotators = session
        .list_annotators()
        .await
        .context("Failed to list annotators")?;
    let stats = AnnotatorStats::from_annotators(&annotators);

    if args.json {
        return output::json(&stats);
    }

    output::field("Total", &annotators.len().to_string());
    output::field("Active", &stats.active.to_string());
    output::field("Inactive", &stats.inactive.to_string());

    Ok(())
}
