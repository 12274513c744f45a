//! Create dataset command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::model::NewDataset;
use pairlab_core::traits::AdminSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Dataset name
    #[arg(long)]
    pub name: String,

    /// Dataset description
    #[arg(long)]
    pub description: String,

    /// Comma-separated class labels (e.g. "same,different")
    #[arg(long)]
    pub classes: String,

    /// File holding the text pairs
    #[arg(long)]
    pub file: PathBuf,
}

pub async fn run(args: CreateArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let dataset = NewDataset {
        name: args.name,
        description: args.description,
        classes_raw: args.classes,
        file: args.file,
    };

    session
        .create_dataset(&dataset)
        .await
        .context("Failed to create dataset")?;

    output::success(&format!("Dataset '{}' created", dataset.name.trim()));
    output::field("Classes", &dataset.classes().join(", "));
    output::field("File", &dataset.file_name());

    Ok(())
}
