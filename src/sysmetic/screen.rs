//! # List Screens
//!
//! A [`ListScreen`] is one server-paged table together with its filter bar:
//! the committed filter values, an optional sort, the page position, the
//! checked rows and the rows of the page last received.
//!
//! ## Reset Rules
//!
//! - Any filter set or clear, and any sort change, goes back to page 0
//! - Page-only navigation keeps the filters
//! - The selection is cleared whenever the rows it indexes change: filter,
//!   sort and page changes, a newly applied response, a successful mutation
//!
//! ## Requests
//!
//! Fetching is split in two so the screen stays free of I/O:
//! [`ListScreen::begin_request`] snapshots the query and hands out a ticket,
//! the caller talks to the data source, and [`ListScreen::complete`] applies
//! the outcome. Only the most recently issued ticket is applied; anything
//! older is dropped, so a slow response can never overwrite a newer one.

use crate::error::{Result, SysmeticError};
use crate::filters::{
    FilterChange, FilterContext, FilterField, FilterValue, FilterValues, QueryParams,
};
use crate::table::{PageResponse, PageState, SelectionStore, SortSpec};
use tracing::debug;

/// Identifies one issued request. Tickets increase monotonically per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Snapshot of everything a data source needs to fetch one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub ticket: RequestTicket,
    pub context: FilterContext,
    pub params: QueryParams,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone)]
pub struct ListScreen<R> {
    context: FilterContext,
    fields: Vec<FilterField>,
    filters: FilterValues,
    sort: Option<SortSpec>,
    page: PageState,
    total_pages: usize,
    selection: SelectionStore,
    rows: Vec<R>,
    stale: bool,
    issued: u64,
}

impl<R> ListScreen<R> {
    pub fn new(context: FilterContext, fields: &[FilterField], page_size: usize) -> Self {
        Self {
            context,
            fields: fields.to_vec(),
            filters: FilterValues::new(),
            sort: None,
            page: PageState::new(page_size),
            total_pages: 0,
            selection: SelectionStore::new(),
            rows: Vec::new(),
            stale: true,
            issued: 0,
        }
    }

    pub fn context(&self) -> FilterContext {
        self.context
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn filters(&self) -> &FilterValues {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    /// Page count as last reported by the server.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// True until the rows reflect the current filters, sort and page.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Apply a change emitted by a filter control.
    ///
    /// Every set or clear puts the screen back on page 0 with nothing
    /// selected and the rows stale, even when the value is unchanged.
    /// Returns true when a value actually changed.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let changed = self.filters.apply(change);
        self.rows_changed(true);
        changed
    }

    pub fn set_filter(&mut self, field_id: &str, value: FilterValue) -> bool {
        self.apply(FilterChange::set(field_id, value))
    }

    pub fn clear_filter(&mut self, field_id: &str) -> bool {
        self.apply(FilterChange::clear(field_id))
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.rows_changed(true);
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        if self.sort != sort {
            self.sort = sort;
            self.rows_changed(true);
        }
    }

    /// Navigate without touching the filters.
    pub fn go_to_page(&mut self, page: usize) {
        if self.page.current != page {
            self.page.current = page;
            self.rows_changed(false);
        }
    }

    pub fn next_page(&mut self) -> bool {
        if self.page.current + 1 < self.total_pages {
            self.go_to_page(self.page.current + 1);
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page.current > 0 {
            self.go_to_page(self.page.current - 1);
            true
        } else {
            false
        }
    }

    pub fn toggle(&mut self, index: usize) {
        self.selection.toggle(index);
    }

    pub fn toggle_all(&mut self) {
        self.selection.toggle_all(self.rows.len());
    }

    /// Rows behind the checked indices.
    pub fn selected(&self) -> Vec<&R> {
        self.selection.selected(&self.rows)
    }

    /// Checked rows for a bulk action; fails when nothing is checked.
    pub fn require_selection(&self, action: &'static str) -> Result<Vec<&R>> {
        let selected = self.selected();
        if selected.is_empty() {
            return Err(SysmeticError::EmptySelection(action));
        }
        Ok(selected)
    }

    /// Snapshot the current query and issue a new ticket.
    ///
    /// Issuing a ticket invalidates every earlier one.
    pub fn begin_request(&mut self) -> ListQuery {
        self.issued += 1;
        let params = QueryParams::from_filters(&self.fields, &self.filters, self.page.current);
        debug!(
            context = %self.context,
            ticket = self.issued,
            page = self.page.current,
            ?params,
            "list request issued"
        );
        ListQuery {
            ticket: RequestTicket(self.issued),
            context: self.context,
            params,
            sort: self.sort.clone(),
            page: self.page.current,
            page_size: self.page.page_size,
        }
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply the outcome of a request.
    ///
    /// Returns `Ok(true)` when a page was applied and `Ok(false)` when the
    /// ticket was superseded. A failure of the latest request is returned and
    /// leaves the current rows in place.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<PageResponse<R>>,
    ) -> Result<bool> {
        if !self.is_latest(ticket) {
            debug!(
                context = %self.context,
                ticket = ticket.0,
                latest = self.issued,
                ok = result.is_ok(),
                "dropping stale list response"
            );
            return Ok(false);
        }

        let response = result?;
        self.page.total_elements = response.total_element;
        self.total_pages = response.total_pages;
        self.rows = response.content;
        self.selection.reset();
        self.stale = false;
        Ok(true)
    }

    /// Call after a mutation succeeded: the loaded rows no longer match the server.
    pub fn after_mutation(&mut self) {
        self.rows_changed(false);
    }

    fn rows_changed(&mut self, back_to_first_page: bool) {
        if back_to_first_page {
            self.page.current = 0;
        }
        self.selection.reset();
        self.stale = true;
    }
}
