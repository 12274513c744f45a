//! Subcommand implementations.

pub mod account;
pub mod annotators;
pub mod datasets;
pub mod tasks;

mod browse;
mod listing;

use anyhow::{Context, Result};
use clap::Args;

use pairlab_core::ApiUrl;

/// Where the annotation API lives.
#[derive(Args, Debug)]
pub struct ApiArgs {
    /// API base URL (`file://` selects the local store)
    #[arg(long, env = "PAIRLAB_API", default_value = ApiUrl::DEFAULT)]
    pub api: String,
}

impl ApiArgs {
    pub fn url(&self) -> Result<ApiUrl> {
        ApiUrl::new(&self.api).context("Invalid API URL")
    }
}
