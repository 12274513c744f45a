//! Client-side list views: filtering, sorting and paging of fetched records.
//!
//! One generic implementation serves every list screen. A [`ListSchema`]
//! supplies the field accessors for a record type; [`apply_filters`] and
//! [`paginate`] are pure; [`ListController`] turns interaction events into
//! fresh [`ListView`]s; [`drive`] runs a controller behind a search
//! [`Debouncer`].

mod controller;
mod debounce;
mod driver;
mod filter;
mod page;
mod schema;

pub use controller::{FilterSummary, ListController, ListEvent, ListView, PageRequest};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use driver::drive;
pub use filter::{FilterState, SortKey, apply_filters, filter_dataset_annotators, matches_search};
pub use page::{
    ANNOTATOR_PAGE_SIZE, COUPLE_PAGE_SIZE, DATASET_PAGE_SIZE, PageState, paginate,
};
pub use schema::{ANNOTATORS, DATASETS, ListSchema, collate};
