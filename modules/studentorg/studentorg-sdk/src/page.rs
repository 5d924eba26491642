//! Fixed-size page envelope returned by every listing.

/// Every listing in the module pages by this many records.
pub const PAGE_SIZE: u64 = 5;

/// Pagination metadata. `number` is 1-based and always within
/// `1..=num_pages`; an empty result set still has one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
}

impl PageInfo {
    /// Number of pages needed for `total_items` at [`PAGE_SIZE`], never zero.
    #[must_use]
    pub fn pages_for(total_items: u64) -> u64 {
        total_items.div_ceil(PAGE_SIZE).max(1)
    }

    /// Metadata for page `number` (clamped into range) of `total_items`.
    #[must_use]
    pub fn new(number: u64, total_items: u64) -> Self {
        let num_pages = Self::pages_for(total_items);
        Self {
            number: number.clamp(1, num_pages),
            num_pages,
            total_items,
            page_size: PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// One page of records plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Convert the items while keeping the metadata.
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}
