//! Table state: checked rows, paging and client-side sorting.

mod pagination;
mod selection;
mod sorting;

pub use pagination::{ClientPager, PageResponse, PageState, DEFAULT_PAGE_SIZE};
pub use selection::SelectionStore;
pub use sorting::{SortDirection, SortSpec};
