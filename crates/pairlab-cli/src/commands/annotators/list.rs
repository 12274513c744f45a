//! List annotators command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pairlab_core::listing::{ANNOTATOR_PAGE_SIZE, ANNOTATORS, ListView};
use pairlab_core::model::{Annotator, AnnotatorStatus};
use pairlab_core::traits::AdminSession;

use crate::commands::listing::ListArgs;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ListAnnotatorsArgs {
    /// Only show annotators with this status (repeatable): active, inactive
    #[arg(long = "status")]
    pub statuses: Vec<AnnotatorStatus>,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn run(args: ListAnnotatorsArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let annotators = session
        .list_annotators()
        .await
        .context("Failed to list annotators")?;

    let view = args
        .list
        .view(ANNOTATORS, ANNOTATOR_PAGE_SIZE, annotators, &args.statuses);

    if args.list.json {
        return output::json_pretty(&view);
    }

    print_page(&view);
    Ok(())
}

pub(super) fn print_page(view: &ListView<Annotator>) {
    if view.items.is_empty() {
        output::note("No annotators found.");
    }
    for annotator in &view.items {
        let status = match annotator.status() {
            AnnotatorStatus::Active => "Active".green(),
            AnnotatorStatus::Inactive => "Inactive".red(),
        };
        println!(
            "{:>4}  {:<24} {:<16} {}",
            annotator
                .id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            annotator.full_name(),
            annotator.login.as_deref().unwrap_or_default(),
            status
        );
    }
    output::page_footer(view);
}
