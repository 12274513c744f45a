//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use pairlab_core::traits::Session;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let session = storage::require_session().await?;

    output::field("Login", session.login());
    output::field("Role", session.role().name());
    output::field("API", session.api_url().as_str());

    Ok(())
}
