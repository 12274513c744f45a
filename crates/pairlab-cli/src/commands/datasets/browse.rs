//! Interactive dataset browser.

use anyhow::Result;
use clap::Args;

use pairlab_core::listing::{DATASET_PAGE_SIZE, DATASETS};
use pairlab_core::model::DatasetStatus;
use pairlab_core::traits::AdminSession;

use crate::commands::browse;
use crate::session::storage;

use super::list::print_page;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Items per page
    #[arg(long, default_value_t = DATASET_PAGE_SIZE)]
    pub page_size: usize,
}

pub async fn run(args: BrowseArgs) -> Result<()> {
    let session = storage::require_session().await?;

    browse::run(
        DATASETS,
        args.page_size,
        || {
            let session = session.clone();
            async move { session.list_datasets().await }
        },
        |flag: &str| flag.parse::<DatasetStatus>(),
        print_page,
    )
    .await
}
