//! Assign dataset command implementation.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;

use pairlab_core::model::{MIN_ANNOTATORS_PER_ASSIGNMENT, TaskAssignment, assignable};
use pairlab_core::traits::AdminSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Dataset id
    pub id: i64,

    /// Annotator id (repeat for each annotator; at least three)
    #[arg(long = "annotator")]
    pub annotators: Vec<i64>,

    /// Deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
}

pub async fn run(args: AssignArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let candidates = assignable(
        &session
            .list_annotators()
            .await
            .context("Failed to list annotators")?,
    );

    if args.annotators.is_empty() {
        output::note(&format!(
            "Pick at least {} annotators with --annotator <id>:",
            MIN_ANNOTATORS_PER_ASSIGNMENT
        ));
        for annotator in &candidates {
            println!(
                "{:>4}  {:<24} {}",
                annotator.id.unwrap_or_default(),
                annotator.full_name(),
                annotator.login.as_deref().unwrap_or_default()
            );
        }
        return Ok(());
    }

    let unknown: Vec<String> = args
        .annotators
        .iter()
        .filter(|id| !candidates.iter().any(|a| a.id == Some(**id)))
        .map(|id| id.to_string())
        .collect();
    if !unknown.is_empty() {
        bail!("Not active annotators: {}", unknown.join(", "));
    }

    let deadline = args.deadline.context("A deadline is required (--deadline YYYY-MM-DD)")?;
    let assignment = TaskAssignment::new(args.id, &args.annotators, deadline);

    session
        .assign_task(&assignment)
        .await
        .context("Failed to assign dataset")?;

    output::success(&format!(
        "Dataset {} assigned to {} annotators",
        args.id,
        assignment.annotator_ids.len()
    ));
    output::field("Deadline", &deadline.to_string());

    Ok(())
}
