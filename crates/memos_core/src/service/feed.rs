//! Paginated memo feed.
//!
//! # Invariants
//! - Input order is preserved; filtering never reorders.
//! - Pages are 1-based; out-of-range pages are empty, not errors.

use crate::filter::evaluator::should_show;
use crate::filter::spec::FilterSpec;
use crate::model::memo::Memo;

/// Page size used when a caller passes `0`.
pub const DEFAULT_PAGE_SIZE: usize = 10;
const PAGE_WINDOW_MAX_PLAIN: usize = 7;

/// One page of the filtered feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
    pub items: Vec<Memo>,
    pub total_pages: usize,
    /// Count of memos passing the filter across all pages.
    pub total_items: usize,
    pub page: usize,
}

/// Filters `memos` and returns page `page` of size `page_size`.
pub fn assemble(
    memos: &[Memo],
    spec: &FilterSpec,
    hide_done_tasks: bool,
    page: usize,
    page_size: usize,
) -> FeedPage {
    let page_size = if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    let shown: Vec<&Memo> = memos
        .iter()
        .filter(|memo| should_show(memo, spec, hide_done_tasks))
        .collect();

    let total_items = shown.len();
    let items = match page.checked_sub(1) {
        Some(index) => shown
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    FeedPage {
        items,
        total_pages: total_items.div_ceil(page_size),
        total_items,
        page,
    }
}

/// One slot of a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(usize),
    Ellipsis,
}

/// Page numbers to render around `current`.
///
/// Up to seven pages are listed in full. Beyond that the bar keeps the
/// first and last page and elides the rest around the current page.
/// A single page (or none) renders no bar.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageSlot> {
    if total_pages <= 1 {
        return Vec::new();
    }
    if total_pages <= PAGE_WINDOW_MAX_PLAIN {
        return (1..=total_pages).map(PageSlot::Page).collect();
    }

    let mut slots = Vec::with_capacity(PAGE_WINDOW_MAX_PLAIN);
    if current <= 4 {
        slots.extend((1..=5).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(total_pages));
    } else if current >= total_pages - 3 {
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((total_pages - 4..=total_pages).map(PageSlot::Page));
    } else {
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((current - 1..=current + 1).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(total_pages));
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::{page_window, PageSlot};
    use PageSlot::{Ellipsis, Page};

    #[test]
    fn short_ranges_list_every_page() {
        assert!(page_window(1, 1).is_empty());
        assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn long_ranges_elide_around_current() {
        assert_eq!(
            page_window(2, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(9, 10),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }
}
