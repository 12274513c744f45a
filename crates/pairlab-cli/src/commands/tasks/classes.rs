//! List task classes command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::traits::AnnotatorSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ClassesArgs {
    /// Task id
    pub id: i64,
}

pub async fn run(args: ClassesArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let classes = session
        .task_classes(args.id)
        .await
        .context("Failed to fetch classes")?;

    if classes.is_empty() {
        output::note("This task has no classes.");
    }
    for class in &classes {
        println!("{:>4}  {}", class.id, class.text_class);
    }

    Ok(())
}
