//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every list screen, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the data source and the filter registry (with remote options
//!   merged in once they are loaded)
//! - **Builds** screens for a context with the configured page size
//! - **Normalizes inputs** (row selectors such as `2-4` become page indices)
//! - **Dispatches** to the command functions and returns their results
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: no stdout, stderr or formatting
//!
//! ## Generic Over DataSource
//!
//! `SysmeticApi<S: DataSource>` runs against any backend:
//! - Production: `SysmeticApi<HttpSource>`
//! - Testing: `SysmeticApi<InMemorySource>`

use crate::commands::{self, questions::QuestionBoard, CmdResult};
use crate::error::{Result, SysmeticError};
use crate::filters::{FilterContext, FilterRegistry};
use crate::model::{
    AdminStrategyRow, CatalogItem, CatalogKind, InquiryRow, MemberRole, MemberRow, NoticeRow,
    StrategySummary,
};
use crate::rows::{resolve_rows, RowSelector};
use crate::screen::ListScreen;
use crate::store::{DataSource, IconFile};
use crate::table::DEFAULT_PAGE_SIZE;

pub struct SysmeticApi<S: DataSource> {
    source: S,
    registry: FilterRegistry,
    page_size: usize,
}

impl<S: DataSource> SysmeticApi<S> {
    pub fn new(source: S) -> Self {
        Self::with_page_size(source, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(source: S, page_size: usize) -> Self {
        Self {
            source,
            registry: FilterRegistry::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// A fresh, unloaded screen for `context`.
    pub fn screen<R>(&self, context: FilterContext) -> ListScreen<R> {
        ListScreen::new(context, self.registry.fields(context), self.page_size)
    }

    pub fn question_board(&self) -> QuestionBoard {
        QuestionBoard::new(self.page_size)
    }

    /// Check the rows named by `inputs` (1-based, ranges allowed) on `screen`.
    pub fn select<R, I: AsRef<str>>(&self, screen: &mut ListScreen<R>, inputs: &[I]) -> Result<()> {
        let selectors = parse_selectors(inputs)?;
        for index in resolve_rows(&selectors, screen.rows().len())? {
            if !screen.selection().is_checked(index) {
                screen.toggle(index);
            }
        }
        Ok(())
    }

    pub async fn load_options(&mut self) -> Result<CmdResult> {
        commands::options::load(&self.source, &mut self.registry).await
    }

    pub async fn search(&self, screen: &mut ListScreen<StrategySummary>) -> Result<bool> {
        commands::strategies::list(&self.source, screen).await
    }

    pub async fn catalog(
        &self,
        kind: CatalogKind,
        screen: &mut ListScreen<CatalogItem>,
    ) -> Result<bool> {
        commands::catalog::list(&self.source, kind, screen).await
    }

    pub async fn create_catalog_item(
        &self,
        kind: CatalogKind,
        screen: &mut ListScreen<CatalogItem>,
        name: &str,
        icon: Option<IconFile>,
    ) -> Result<CmdResult> {
        commands::catalog::create(&self.source, kind, screen, name, icon).await
    }

    pub async fn update_catalog_item(
        &self,
        kind: CatalogKind,
        screen: &mut ListScreen<CatalogItem>,
        row: &str,
        name: &str,
        icon: Option<IconFile>,
    ) -> Result<CmdResult> {
        let index = single_row(row, screen.rows().len())?;
        commands::catalog::update(&self.source, kind, screen, index, name, icon).await
    }

    pub async fn delete_catalog_items(
        &self,
        kind: CatalogKind,
        screen: &mut ListScreen<CatalogItem>,
    ) -> Result<CmdResult> {
        commands::catalog::delete(&self.source, kind, screen).await
    }

    pub async fn admin_strategies(
        &self,
        screen: &mut ListScreen<AdminStrategyRow>,
    ) -> Result<bool> {
        commands::review::list(&self.source, screen).await
    }

    pub async fn approve(&self, screen: &mut ListScreen<AdminStrategyRow>) -> Result<CmdResult> {
        commands::review::approve(&self.source, screen).await
    }

    pub async fn reject(
        &self,
        screen: &mut ListScreen<AdminStrategyRow>,
        row: &str,
        reason: &str,
    ) -> Result<CmdResult> {
        let index = single_row(row, screen.rows().len())?;
        commands::review::reject(&self.source, screen, index, reason).await
    }

    pub async fn members(&self, screen: &mut ListScreen<MemberRow>) -> Result<bool> {
        commands::members::list(&self.source, screen).await
    }

    pub async fn change_role(
        &self,
        screen: &mut ListScreen<MemberRow>,
        role: MemberRole,
    ) -> Result<CmdResult> {
        commands::members::change_role(&self.source, screen, role).await
    }

    pub async fn delete_members(&self, screen: &mut ListScreen<MemberRow>) -> Result<CmdResult> {
        commands::members::delete(&self.source, screen).await
    }

    pub async fn notices(&self, screen: &mut ListScreen<NoticeRow>) -> Result<bool> {
        commands::notices::list(&self.source, screen).await
    }

    pub async fn delete_notices(&self, screen: &mut ListScreen<NoticeRow>) -> Result<CmdResult> {
        commands::notices::delete(&self.source, screen).await
    }

    pub async fn toggle_notice(
        &self,
        screen: &mut ListScreen<NoticeRow>,
        row: &str,
    ) -> Result<CmdResult> {
        let index = single_row(row, screen.rows().len())?;
        commands::notices::toggle_visibility(&self.source, screen, index).await
    }

    pub async fn inquiries(&self, screen: &mut ListScreen<InquiryRow>) -> Result<bool> {
        commands::inquiries::list(&self.source, screen).await
    }

    pub async fn delete_inquiries(&self, screen: &mut ListScreen<InquiryRow>) -> Result<CmdResult> {
        commands::inquiries::delete(&self.source, screen).await
    }

    pub async fn my_strategies(&self, screen: &mut ListScreen<StrategySummary>) -> Result<bool> {
        commands::mine::list(&self.source, screen).await
    }

    pub async fn delete_my_strategies(
        &self,
        screen: &mut ListScreen<StrategySummary>,
    ) -> Result<CmdResult> {
        commands::mine::delete(&self.source, screen).await
    }

    pub async fn questions(&self, board: &mut QuestionBoard) -> Result<usize> {
        commands::questions::load(&self.source, board).await
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<RowSelector>> {
    if inputs.is_empty() {
        return Err(SysmeticError::InvalidInput("No rows given".to_string()));
    }
    inputs
        .iter()
        .map(|s| s.as_ref().parse::<RowSelector>().map_err(SysmeticError::InvalidInput))
        .collect()
}

/// A selector that must name exactly one row.
fn single_row(input: &str, page_len: usize) -> Result<usize> {
    let selectors = parse_selectors(&[input])?;
    match resolve_rows(&selectors, page_len)?.as_slice() {
        [index] => Ok(*index),
        _ => Err(SysmeticError::InvalidInput(format!(
            "Expected a single row, got '{}'",
            input
        ))),
    }
}

pub use crate::commands::questions::SORT_KEYS as QUESTION_SORT_KEYS;
pub use crate::commands::{CmdMessage, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{catalog_item, notice};
    use crate::store::memory::InMemorySource;

    #[tokio::test]
    async fn select_accepts_numbers_and_ranges() {
        let source =
            InMemorySource::new().with_notices((1..=6).map(|i| notice(i, "n", true)).collect());
        let api = SysmeticApi::new(source);
        let mut screen = api.screen(FilterContext::Notices);
        api.notices(&mut screen).await.unwrap();

        api.select(&mut screen, &["2-3", "5", "3"]).unwrap();

        assert_eq!(
            screen.selection().indices().collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
    }

    #[tokio::test]
    async fn select_past_the_page_fails() {
        let source = InMemorySource::new().with_notices(vec![notice(1, "n", true)]);
        let api = SysmeticApi::new(source);
        let mut screen = api.screen(FilterContext::Notices);
        api.notices(&mut screen).await.unwrap();

        assert!(matches!(
            api.select(&mut screen, &["2"]),
            Err(SysmeticError::NotFound(_))
        ));
        assert!(matches!(
            api.select(&mut screen, &["x"]),
            Err(SysmeticError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn single_row_actions_refuse_ranges() {
        let source = InMemorySource::new().with_catalog(
            CatalogKind::Method,
            vec![catalog_item(1, "Auto"), catalog_item(2, "Manual")],
        );
        let api = SysmeticApi::new(source);
        let mut screen = api.screen(FilterContext::Catalog);
        api.catalog(CatalogKind::Method, &mut screen).await.unwrap();

        let err = api
            .update_catalog_item(CatalogKind::Method, &mut screen, "1-2", "X", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SysmeticError::InvalidInput(_)));

        api.update_catalog_item(CatalogKind::Method, &mut screen, "2", "Semi-auto", None)
            .await
            .unwrap();
        assert_eq!(
            api.source().catalog(CatalogKind::Method)[1].name,
            "Semi-auto"
        );
    }

    #[tokio::test]
    async fn loaded_options_reach_new_screens() {
        let source = InMemorySource::new().with_options(&["Auto"], &["KOSPI200"]);
        let mut api = SysmeticApi::with_page_size(source, 5);
        api.load_options().await.unwrap();

        let screen: ListScreen<StrategySummary> = api.screen(FilterContext::StrategyConditions);
        let stocks = screen.field(crate::filters::ids::STOCK_NAMES).unwrap();
        assert_eq!(stocks.options[0].value, "KOSPI200");
        assert_eq!(screen.page().page_size, 5);
    }
}
