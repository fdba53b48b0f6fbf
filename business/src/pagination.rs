//! Page windowing for the table pager.

use std::fmt;

/// Number of pages shown on each side of the current page.
pub const DEFAULT_SIBLING_COUNT: usize = 1;

/// Largest sibling count the console accepts from configuration.
pub const MAX_SIBLING_COUNT: usize = 10;

/// One slot of a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A 1-based page number.
    Page(usize),
    /// A gap of one or more pages.
    Ellipsis,
}

impl PageItem {
    /// Returns the page number, or `None` for an ellipsis.
    pub fn page(self) -> Option<usize> {
        match self {
            Self::Page(page) => Some(page),
            Self::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// Computes which page numbers and ellipses a pager should show.
///
/// `current` is 1-based and is clamped into `1..=total`. When the whole range
/// fits into `sibling_count * 2 + 5` slots every page is listed. Otherwise the
/// first and last pages are always present, the pages around `current` are
/// shown, and the gaps collapse into [`PageItem::Ellipsis`]. A side that does
/// not need an ellipsis is padded so the pager keeps a constant width.
pub fn page_range(current: usize, total: usize, sibling_count: usize) -> Vec<PageItem> {
    let total_page_numbers = sibling_count.saturating_mul(2).saturating_add(5);

    if total <= total_page_numbers {
        return (1..=total).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total);
    let left_sibling = current.saturating_sub(sibling_count).max(1);
    let right_sibling = current.saturating_add(sibling_count).min(total);

    let show_left_dots = left_sibling > 2;
    let show_right_dots = right_sibling < total - 2;

    // Pages shown on the side without an ellipsis.
    let edge_item_count = total_page_numbers - 2;

    match (show_left_dots, show_right_dots) {
        (false, true) => (1..=edge_item_count)
            .map(PageItem::Page)
            .chain([PageItem::Ellipsis, PageItem::Page(total)])
            .collect(),
        (true, false) => [PageItem::Page(1), PageItem::Ellipsis]
            .into_iter()
            .chain((total - edge_item_count + 1..=total).map(PageItem::Page))
            .collect(),
        _ => [PageItem::Page(1), PageItem::Ellipsis]
            .into_iter()
            .chain((left_sibling..=right_sibling).map(PageItem::Page))
            .chain([PageItem::Ellipsis, PageItem::Page(total)])
            .collect(),
    }
}
