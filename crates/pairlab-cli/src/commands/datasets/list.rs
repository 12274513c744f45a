//! List datasets command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pairlab_core::listing::{DATASET_PAGE_SIZE, DATASETS, ListView};
use pairlab_core::model::{Dataset, DatasetStatus};
use pairlab_core::traits::AdminSession;

use crate::commands::listing::ListArgs;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ListDatasetsArgs {
    /// Only show datasets with this status (repeatable): unassigned, in-progress, completed
    #[arg(long = "status")]
    pub statuses: Vec<DatasetStatus>,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn run(args: ListDatasetsArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let datasets = session
        .list_datasets()
        .await
        .context("Failed to list datasets")?;

    let view = args
        .list
        .view(DATASETS, DATASET_PAGE_SIZE, datasets, &args.statuses);

    if args.list.json {
        return output::json_pretty(&view);
    }

    print_page(&view);
    Ok(())
}

fn status_label(status: DatasetStatus) -> String {
    let label = format!("{:<11}", status.to_string());
    match status {
        DatasetStatus::Completed => label.green().to_string(),
        DatasetStatus::InProgress => label.yellow().to_string(),
        DatasetStatus::Unassigned => label.dimmed().to_string(),
    }
}

pub(super) fn print_row(dataset: &Dataset) {
    println!(
        "{:>4}  {:<28} {} {}  {} couples",
        dataset.id,
        dataset.name(),
        status_label(dataset.status()),
        output::progress_bar(dataset.progress()),
        dataset.total_couples()
    );
}

pub(super) fn print_page(view: &ListView<Dataset>) {
    if view.items.is_empty() {
        output::note("No datasets found.");
    }
    for dataset in &view.items {
        print_row(dataset);
    }
    output::page_footer(view);
}
