use serde::{Deserialize, Serialize};

/// Windowed query response carrying both the window and the total match
/// count. `total_count` always reflects the full match set for the
/// predicate, even when the window returns fewer items; the two reads are
/// not transactional with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i32,
    pub page_size: i32,
    pub total_pages: i32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> PagedResult<T> {
    /// Assemble a page envelope, deriving the page-count fields.
    /// `page` and `page_size` are assumed already clamped to >= 1.
    pub fn new(items: Vec<T>, total_count: i64, page: i32, page_size: i32) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            ((total_count + page_size as i64 - 1) / page_size as i64) as i32
        };

        Self {
            items,
            total_count,
            page,
            page_size,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// Convert the windowed items while keeping the envelope intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }
}
