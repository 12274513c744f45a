//! List tasks command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::traits::AnnotatorSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the tasks as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let tasks = session.list_tasks().await.context("Failed to list tasks")?;

    if args.json {
        return output::json_pretty(&tasks);
    }

    output::field("Annotator", &tasks.user_name);
    if tasks.tasks.is_empty() {
        output::note("No tasks assigned.");
        return Ok(());
    }

    println!();
    for task in &tasks.tasks {
        let dataset = task
            .dataset
            .as_ref()
            .and_then(|d| d.name.as_deref())
            .unwrap_or_default();
        println!(
            "{:>4}  {:<28} due {:<12} {}",
            task.id,
            dataset,
            task.deadline.as_deref().unwrap_or("-"),
            output::progress_bar(tasks.progress_for(task.id))
        );
    }

    Ok(())
}
