//! Edit annotator command implementation.

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::model::AnnotatorForm;
use pairlab_core::traits::AdminSession;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Annotator id
    pub id: i64,

    /// New login
    #[arg(long)]
    pub login: Option<String>,

    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,
}

pub async fn run(args: EditArgs) -> Result<()> {
    let session = storage::require_session().await?;

    let annotators = session
        .list_annotators()
        .await
        .context("Failed to list annotators")?;
    let current = annotators
        .iter()
        .find(|a| a.id == Some(args.id))
        .with_context(|| format!("Annotator {} not found", args.id))?;

    let mut form = AnnotatorForm::edit(current);
    if let Some(login) = args.login {
        form.login = login;
    }
    if let Some(first_name) = args.first_name {
        form.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        form.last_name = last_name;
    }

    session
        .save_annotator(&form)
        .await
        .context("Failed to update annotator")?;

    output::success(&format!("Annotator {} updated", args.id));
    Ok(())
}
