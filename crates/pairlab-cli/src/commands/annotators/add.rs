//! Add annotator command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::model::AnnotatorForm;
use pairlab_core::traits::AdminSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Login of the annotator
    #[arg(long)]
    pub login: String,

    /// First name
    #[arg(long)]
    pub first_name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,
}

pub async fn run(args: AddArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let form = AnnotatorForm {
        id: None,
        last_name: args.last_name,
        first_name: args.first_name,
        login: args.login,
    };

    session
        .save_annotator(&form)
        .await
        .context("Failed to create annotator")?;

    output::success(&format!("Annotator '{}' created", form.login));
    Ok(())
}
