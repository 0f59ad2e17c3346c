//! Pagination metadata for Huntress API responses.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Page number used when none is reported.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none is reported.
pub const DEFAULT_PER_PAGE: u32 = 20;

const PAGE_HEADER: &str = "x-page";
const PER_PAGE_HEADER: &str = "x-per-page";
const TOTAL_PAGES_HEADER: &str = "x-total-pages";
const TOTAL_COUNT_HEADERS: [&str; 2] = ["x-total-count", "x-total-items"];

/// Where a response sits in a paginated collection.
///
/// Purely informational: it never influences retries or rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_items: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl Pagination {
    /// Read pagination headers, falling back to defaults for anything
    /// missing or unparseable. Never fails.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let page = header_number::<u32>(headers, PAGE_HEADER).filter(|&p| p > 0);
        let per_page = header_number::<u32>(headers, PER_PAGE_HEADER).filter(|&p| p > 0);
        let total_items = TOTAL_COUNT_HEADERS
            .iter()
            .find_map(|name| header_number::<u64>(headers, name));
        let total_pages = header_number::<u32>(headers, TOTAL_PAGES_HEADER)
            .filter(|&p| p > 0)
            .or_else(|| Some(pages_for(total_items?, per_page?)));

        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
            total_pages: total_pages.unwrap_or(1),
            total_items: total_items.unwrap_or(0),
        }
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Number of the following page, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}

/// The `pagination` object Huntress embeds in list bodies.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BodyPagination {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

impl BodyPagination {
    /// Overlay body values on header-derived pagination.
    pub(crate) fn apply(&self, base: Pagination) -> Pagination {
        let page = self.current_page.filter(|&p| p > 0).unwrap_or(base.page);
        let per_page = self.limit.filter(|&l| l > 0).unwrap_or(base.per_page);
        let total_items = self.total_count.unwrap_or(base.total_items);
        let total_pages = match (self.total_count, self.next_page) {
            (Some(total), _) => pages_for(total, per_page),
            (None, Some(next)) => next.max(base.total_pages),
            (None, None) => base.total_pages,
        };
        Pagination {
            page,
            per_page,
            total_pages,
            total_items,
        }
    }
}

fn header_number<N: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<N> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

fn pages_for(total_items: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total_items.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// A page of results from the Huntress API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Position within the collection.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Whether there are more pages.
    pub fn has_more(&self) -> bool {
        self.pagination.has_next()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
