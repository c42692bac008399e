//! Page/limit handling shared by every list endpoint.
//!
//! Pages are 1-based on the wire. `limit` defaults to 10 and is clamped to 100.

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Upper bound on the page number, keeping `index * limit` far from `u64` overflow.
pub const MAX_PAGE: u64 = u32::MAX as u64;

pub fn default_page() -> u64 {
    1
}

pub fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Normalized pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Clamps raw query values: page is kept within `1..=MAX_PAGE`, limit within
    /// `1..=MAX_LIMIT`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.clamp(1, MAX_PAGE),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Zero-based page index as expected by SeaORM's paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    pub fn offset(&self) -> usize {
        usize::try_from(self.index().saturating_mul(self.limit)).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(default_page(), DEFAULT_LIMIT)
    }
}

/// One page of results with totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total, request.limit),
        }
    }

    /// Slices an already filtered, fully loaded result set.
    pub fn from_vec(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.limit as usize)
            .collect();

        Self::new(items, total, request)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit > 0 {
        total.div_ceil(limit)
    } else {
        0
    }
}
