//! Delete annotator command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::traits::AdminSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Annotator id
    pub id: i64,
}

pub async fn run(args: DeleteArgs) -> Result<()> {
    let session = storage::require_session().await?;

    session
        .delete_annotator(args.id)
        .await
        .with_context(|| format!("Failed to delete annotator {}", args.id))?;

    output::success(&format!("Annotator {} deleted", args.id));
    Ok(())
}
