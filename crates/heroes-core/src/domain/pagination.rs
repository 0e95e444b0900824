use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 12;

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    item_count.div_ceil(page_size).max(1)
}

pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = i64::try_from(total_pages.max(1)).unwrap_or(i64::MAX);
    // `clamp` keeps the value in [1, last], so the conversion cannot fail.
    usize::try_from(requested.clamp(1, last)).unwrap_or(1)
}

/// Page that keeps the item at `first_index` visible after a page size change.
pub fn page_for_index(first_index: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    first_index / page_size + 1
}

pub fn page_window(page: usize, page_size: usize, item_count: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(item_count);
    let end = start.saturating_add(page_size).min(item_count);
    start..end
}
