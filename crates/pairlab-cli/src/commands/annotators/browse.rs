//! Interactive annotator browser.

use anyhow::Result;
use clap::Args;

use pairlab_core::listing::{ANNOTATOR_PAGE_SIZE, ANNOTATORS};
use pairlab_core::model::AnnotatorStatus;
use pairlab_core::traits::AdminSession;

use crate::commands::browse;
use crate::session::storage;

use super::list::print_page;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Items per page
    #[arg(long, default_value_t = ANNOTATOR_PAGE_SIZE)]
    pub page_size: usize,
}

pub async fn run(args: BrowseArgs) -> Result<()> {
    let session = storage::require_session().await?;

    browse::run(
        ANNOTATORS,
        args.page_size,
        || {
            let session = session.clone();
            async move { session.list_annotators().await }
        },
        |flag: &str| flag.parse::<AnnotatorStatus>(),
        print_page,
    )
    .await
}
