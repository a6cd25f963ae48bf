//! Page state for server-paged lists and a pager for client-paged ones.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Position within a paged list. `current` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current: usize,
    pub page_size: usize,
    pub total_elements: usize,
}

impl PageState {
    /// A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 0,
            page_size: page_size.max(1),
            total_elements: 0,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_elements.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One page of rows as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<R> {
    #[serde(default = "Vec::new")]
    pub content: Vec<R>,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub total_element: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<usize>,
}

impl<R> PageResponse<R> {
    pub fn single(content: Vec<R>) -> Self {
        let total = content.len();
        Self {
            content,
            total_pages: usize::from(total > 0),
            total_element: total,
            page_size: None,
            current_page: None,
        }
    }
}

/// Client-side paging over a fully loaded collection.
#[derive(Debug, Clone)]
pub struct ClientPager<R> {
    items: Vec<R>,
    page_size: usize,
    current: usize,
}

impl<R> ClientPager<R> {
    pub fn new(items: Vec<R>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            current: 0,
        }
    }

    /// Swap in a new collection (after refiltering or resorting) and go back
    /// to the first page.
    pub fn replace(&mut self, items: Vec<R>) {
        self.items = items;
        self.current = 0;
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn total_elements(&self) -> usize {
        self.items.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Rows `[n*size, (n+1)*size)`, clipped to the collection.
    pub fn page(&self, n: usize) -> &[R] {
        let start = n.saturating_mul(self.page_size).min(self.items.len());
        let end = start.saturating_add(self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn current_page(&self) -> &[R] {
        self.page(self.current)
    }

    /// Move to page `n`, clamped to the last page.
    pub fn go_to(&mut self, n: usize) {
        self.current = n.min(self.total_pages().saturating_sub(1));
    }

    pub fn state(&self) -> PageState {
        PageState {
            current: self.current,
            page_size: self.page_size,
            total_elements: self.items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let mut state = PageState::new(10);
        assert_eq!(state.total_pages(), 0);
        state.total_elements = 25;
        assert_eq!(state.total_pages(), 3);
        state.total_elements = 30;
        assert_eq!(state.total_pages(), 3);
    }

    #[test]
    fn zero_page_size_is_bumped() {
        assert_eq!(PageState::new(0).page_size, 1);
        assert_eq!(ClientPager::new(vec![1, 2], 0).total_pages(), 2);
    }

    #[test]
    fn has_next_and_prev() {
        let mut state = PageState::new(10);
        state.total_elements = 25;
        assert!(state.has_next());
        assert!(!state.has_prev());
        state.current = 2;
        assert!(!state.has_next());
        assert!(state.has_prev());
    }

    #[test]
    fn twenty_five_items_page_into_ten_ten_five() {
        let pager = ClientPager::new((0..25).collect::<Vec<_>>(), 10);
        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.page(0).len(), 10);
        assert_eq!(pager.page(1)[0], 10);
        assert_eq!(pager.page(2), &[20, 21, 22, 23, 24]);
        assert!(pager.page(3).is_empty());
    }

    #[test]
    fn replace_resets_to_first_page() {
        let mut pager = ClientPager::new((0..25).collect::<Vec<_>>(), 10);
        pager.go_to(2);
        assert_eq!(pager.current(), 2);
        pager.replace((0..5).collect());
        assert_eq!(pager.current(), 0);
        assert_eq!(pager.current_page().len(), 5);
    }

    #[test]
    fn go_to_clamps() {
        let mut pager = ClientPager::new((0..25).collect::<Vec<_>>(), 10);
        pager.go_to(99);
        assert_eq!(pager.current(), 2);
        let mut empty: ClientPager<i32> = ClientPager::new(vec![], 10);
        empty.go_to(3);
        assert_eq!(empty.current(), 0);
    }

    #[test]
    fn page_response_reads_camel_case() {
        let json = r#"{"content":[1,2],"totalPages":4,"totalElement":38,"currentPage":1}"#;
        let page: PageResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_element, 38);
        assert_eq!(page.current_page, Some(1));
        assert_eq!(page.page_size, None);
    }
}
