//! Annotate command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::model::AnnotateRequest;
use pairlab_core::traits::AnnotatorSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Task id
    pub id: i64,

    /// Couple id
    #[arg(long)]
    pub couple: i64,

    /// Chosen class
    #[arg(long)]
    pub class: String,

    /// Position of the couple within the task (0-based)
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Free-text notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

pub async fn run(args: AnnotateArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let request = AnnotateRequest {
        couple_id: args.couple,
        class_selection: args.class,
        notes: args.notes,
        current_index: args.index,
    };

    let outcome = session
        .annotate(args.id, &request)
        .await
        .context("Failed to submit annotation")?;

    output::success(&format!(
        "Couple {} annotated as '{}'",
        request.couple_id, request.class_selection
    ));

    if outcome.completed {
        output::success(
            outcome
                .completion_message
                .as_deref()
                .unwrap_or("Task completed"),
        );
    } else if let Some(next) = outcome.next_index {
        output::note(&format!("Next: pairlab tasks show {} --index {}", args.id, next));
    }

    Ok(())
}
