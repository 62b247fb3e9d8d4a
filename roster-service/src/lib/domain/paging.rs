use serde::Serialize;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_SIZE: i64 = 1;

/// Normalized pagination input shared by every paginated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Normalize raw query parameters: `page` defaults to 1 when missing or
    /// non-positive, `size` likewise.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p > 0 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match size {
            Some(s) if s > 0 => s,
            _ => DEFAULT_SIZE,
        };

        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Response envelope for paginated queries.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_items: i64,
    pub results: Vec<T>,
    pub total_pages: i64,
    pub current_page: i64,
}

impl<T> Page<T> {
    /// Assemble the envelope from one page of rows and an independent total
    /// count.
    ///
    /// An empty page reports `totalPages = 0` even when the count query saw
    /// rows; `currentPage` always echoes the normalized request.
    pub fn new(results: Vec<T>, total_items: i64, request: PageRequest) -> Self {
        let total_pages = if results.is_empty() {
            0
        } else {
            (total_items + request.limit - 1) / request.limit
        };

        Self {
            total_items,
            results,
            total_pages,
            current_page: request.page,
        }
    }

    /// Re-project the rows, keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_items: self.total_items,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            current_page: self.current_page,
        }
    }
}
