//! List controller: turns interaction events into fresh derived views.

use serde::Serialize;
use tracing::{debug, warn};

use super::filter::{FilterState, SortKey, apply_filters};
use super::page::{PageState, paginate};
use super::schema::ListSchema;

/// Page navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Next,
    Previous,
    GoTo(usize),
}

/// An interaction or data event delivered to a list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<R, C> {
    SearchTermChanged(String),
    CategoryFlagToggled(C),
    SortKeyChanged(SortKey),
    PageChanged(PageRequest),
    FiltersCleared,
    /// A fetch delivered a fresh collection.
    RecordsLoaded(Vec<R>),
    /// A fetch failed; the held collection stays.
    LoadFailed(String),
}

/// Active predicates, as shown next to a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub search_term: Option<String>,
    pub flags: Vec<&'static str>,
    pub sort: SortKey,
}

impl FilterSummary {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_none() && self.flags.is_empty()
    }
}

/// One rendered page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<R> {
    pub items: Vec<R>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub summary: FilterSummary,
}

/// Holds the latest collection and list state for one list screen.
///
/// Every handled event replaces the filtered sequence wholesale.
#[derive(Debug, Clone)]
pub struct ListController<R, C> {
    schema: ListSchema<R, C>,
    records: Vec<R>,
    filtered: Vec<R>,
    filter: FilterState<C>,
    page: PageState,
}

impl<R, C> ListController<R, C>
where
    R: Clone,
    C: Copy + Ord,
{
    /// An empty list with default filters.
    pub fn new(schema: ListSchema<R, C>, page_size: usize) -> Self {
        Self {
            schema,
            records: Vec::new(),
            filtered: Vec::new(),
            filter: FilterState::new(),
            page: PageState::new(page_size),
        }
    }

    /// Start from an already-known filter state.
    pub fn with_filter(mut self, filter: FilterState<C>) -> Self {
        self.filter = filter;
        self.refilter();
        self
    }

    pub fn filter(&self) -> &FilterState<C> {
        &self.filter
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// The full filtered, sorted sequence.
    pub fn filtered(&self) -> &[R] {
        &self.filtered
    }

    /// Handle one event and return the view that replaces the previous one.
    pub fn handle(&mut self, event: ListEvent<R, C>) -> ListView<R> {
        match event {
            ListEvent::SearchTermChanged(term) => {
                self.set_filter(self.filter.with_search_term(term));
            }
            ListEvent::CategoryFlagToggled(flag) => {
                self.set_filter(self.filter.toggled(flag));
            }
            ListEvent::SortKeyChanged(key) => {
                self.set_filter(self.filter.with_sort_key(key));
            }
            ListEvent::FiltersCleared => {
                self.set_filter(self.filter.cleared());
            }
            ListEvent::PageChanged(request) => {
                let total = self.filtered.len();
                self.page = match request {
                    PageRequest::Next => self.page.next(total),
                    PageRequest::Previous => self.page.previous(total),
                    PageRequest::GoTo(n) => self.page.go_to(n, total),
                };
            }
            ListEvent::RecordsLoaded(records) => {
                debug!(list = self.schema.name, count = records.len(), "Records loaded");
                self.records = records;
                self.refilter();
                self.page = self.page.first();
            }
            ListEvent::LoadFailed(reason) => {
                warn!(list = self.schema.name, %reason, "Reload failed, keeping current records");
            }
        }
        self.view()
    }

    /// The current page of the filtered sequence.
    pub fn view(&self) -> ListView<R> {
        let page = self.page.clamp(self.filtered.len());
        ListView {
            items: paginate(&self.filtered, &page).to_vec(),
            current_page: page.current(),
            total_pages: page.total_pages(self.filtered.len()),
            total_items: self.filtered.len(),
            summary: self.summary(),
        }
    }

    pub fn summary(&self) -> FilterSummary {
        FilterSummary {
            search_term: self.filter.needle().map(|_| self.filter.search_term().trim().to_string()),
            flags: self
                .filter
                .flags()
                .map(|flag| (self.schema.flag_name)(&flag))
                .collect(),
            sort: self.filter.sort_key(),
        }
    }

    fn set_filter(&mut self, filter: FilterState<C>) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.refilter();
        self.page = self.page.first();
    }

    fn refilter(&mut self) {
        self.filtered = apply_filters(&self.records, &self.filter, &self.schema);
        self.page = self.page.clamp(self.filtered.len());
    }
}
