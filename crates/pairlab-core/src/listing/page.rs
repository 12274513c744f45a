//! Page state and slicing.

use serde::Serialize;

/// Rows per page on the dataset list.
pub const DATASET_PAGE_SIZE: usize = 5;

/// Rows per page on the annotator list.
pub const ANNOTATOR_PAGE_SIZE: usize = 5;

/// Couples per page on the dataset detail screen.
pub const COUPLE_PAGE_SIZE: usize = 20;

/// Current page of a list.
///
/// `current` is 1-based and, once clamped against a total, always satisfies
/// `1 <= current <= total_pages(total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current: usize,
    size: usize,
}

impl PageState {
    /// First page with the given page size (at least 1).
    pub fn new(size: usize) -> Self {
        Self {
            current: 1,
            size: size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of pages for `total` items; never less than 1.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.size).max(1)
    }

    /// Bring `current` back into range for `total` items.
    pub fn clamp(self, total: usize) -> Self {
        Self {
            current: self.current.clamp(1, self.total_pages(total)),
            ..self
        }
    }

    pub fn first(self) -> Self {
        Self { current: 1, ..self }
    }

    /// Jump to `page`, clamped into range.
    pub fn go_to(self, page: usize, total: usize) -> Self {
        Self {
            current: page,
            ..self
        }
        .clamp(total)
    }

    /// Next page; stays on the last page.
    pub fn next(self, total: usize) -> Self {
        self.go_to(self.current + 1, total)
    }

    /// Previous page; stays on the first page.
    pub fn previous(self, total: usize) -> Self {
        self.go_to(self.current.saturating_sub(1), total)
    }
}

/// The slice of `items` shown on `page`, clipped to bounds.
///
/// Empty when `page` lies past the end; callers clamp first.
pub fn paginate<'a, T>(items: &'a [T], page: &PageState) -> &'a [T] {
    let start = (page.current - 1).saturating_mul(page.size).min(items.len());
    let end = start.saturating_add(page.size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_page_of_twelve_holds_two_items() {
        let items: Vec<u32> = (0..12).collect();
        let page = PageState::new(5).go_to(3, items.len());
        assert_eq!(paginate(&items, &page), &[10, 11]);
        assert_eq!(page.total_pages(items.len()), 3);
    }

    #[test]
    fn pages_reconstruct_sequence() {
        let items: Vec<u32> = (0..23).collect();
        let mut page = PageState::new(5);
        let mut rebuilt = Vec::new();
        for n in 1..=page.total_pages(items.len()) {
            page = page.go_to(n, items.len());
            let slice = paginate(&items, &page);
            assert!(slice.len() <= page.size());
            rebuilt.extend_from_slice(slice);
        }
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn empty_list_has_one_page() {
        let page = PageState::new(5);
        assert_eq!(page.total_pages(0), 1);
        assert!(paginate::<u32>(&[], &page).is_empty());
        assert_eq!(page.next(0).current(), 1);
    }

    #[test]
    fn clamp_pulls_back_after_shrink() {
        let page = PageState::new(5).go_to(4, 20);
        assert_eq!(page.current(), 4);
        let items = [0u8; 7];
        assert!(paginate(&items, &page).is_empty());
        let clamped = page.clamp(items.len());
        assert_eq!(clamped.current(), 2);
        assert_eq!(paginate(&items, &clamped).len(), 2);
    }

    #[test]
    fn navigation_stays_in_range() {
        let page = PageState::new(5);
        assert_eq!(page.previous(12).current(), 1);
        assert_eq!(page.next(12).next(12).next(12).current(), 3);
        assert_eq!(page.go_to(0, 12).current(), 1);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        assert_eq!(PageState::new(0).size(), 1);
    }
}
