//! Show task couple command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::model::CoupleCursor;
use pairlab_core::traits::AnnotatorSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task id
    pub id: i64,

    /// Position of the couple within the task (0-based)
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Print the couple as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShowArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let couple = session
        .task_couple(args.id, args.index)
        .await
        .with_context(|| format!("Failed to fetch couple {} of task {}", args.index, args.id))?;

    if args.json {
        return output::json_pretty(&couple);
    }

    let cursor = CoupleCursor::new(args.index, couple.total_couples);

    output::field(
        "Couple",
        &format!("{} ({}/{})", couple.current_couple.id, cursor.index() + 1, cursor.total()),
    );
    output::field("Text 1", &couple.current_couple.text_1);
    output::field("Text 2", &couple.current_couple.text_2);

    if let Some(previous) = cursor.previous() {
        output::note(&format!("Previous: --index {}", previous.index()));
    }
    if let Some(next) = cursor.next() {
        output::note(&format!("Next: --index {}", next.index()));
    }

    Ok(())
}
