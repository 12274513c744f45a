//! Options shared by the list commands.

use clap::Args;

use pairlab_core::listing::{
    FilterState, ListController, ListEvent, ListSchema, ListView, PageRequest, SortKey,
};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only show records matching this text
    #[arg(long)]
    pub search: Option<String>,

    /// Sort order: original, name or status
    #[arg(long, default_value_t = SortKey::Original)]
    pub sort: SortKey,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Filter state selected on the command line.
    pub fn filter<C: Copy + Ord>(&self, flags: &[C]) -> FilterState<C> {
        flags.iter().fold(
            FilterState::new()
                .with_search_term(self.search.clone().unwrap_or_default())
                .with_sort_key(self.sort),
            |state, flag| state.with_flag(*flag, true),
        )
    }

    /// Run the records through a controller and return the requested page.
    pub fn view<R, C>(
        &self,
        schema: ListSchema<R, C>,
        default_page_size: usize,
        records: Vec<R>,
        flags: &[C],
    ) -> ListView<R>
    where
        R: Clone,
        C: Copy + Ord,
    {
        let page_size = self.page_size.unwrap_or(default_page_size);
        let mut controller =
            ListController::new(schema, page_size).with_filter(self.filter(flags));
        controller.handle(ListEvent::RecordsLoaded(records));
        controller.handle(ListEvent::PageChanged(PageRequest::GoTo(self.page)))
    }
}
