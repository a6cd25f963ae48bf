//! # Data Sources
//!
//! The marketplace API sits behind the [`DataSource`] trait so the command
//! layer can run against a real server or an in-process fake.
//!
//! ## Implementations
//!
//! - [`http::HttpSource`]: `reqwest` client for the REST API
//!   - Unwraps the `{"data": ...}` response envelope
//!   - Forwards a bearer token when one is configured
//!   - Uploads catalog icons as multipart forms
//!
//! - [`memory::InMemorySource`]: in-memory fake for tests
//!   - Applies the server's filters and paging, except the operating period,
//!     which needs start dates the rows do not carry
//!   - Can be told to fail the next call
//!
//! ## Queries
//!
//! List methods take the [`ListQuery`] a screen issued. The source reads the
//! flattened parameters, the page and page size from it; the ticket only
//! matters to the screen that applies the answer.
//!
//! Nothing here retries. A failed call is returned to the caller as is.

use crate::error::{Result, SysmeticError};
use crate::model::{
    AdminStrategyRow, CatalogItem, CatalogKind, InquiryRow, MemberRole, MemberRow,
    MethodAndStock, NoticeRow, QuestionRow, StrategySummary,
};
use crate::screen::ListQuery;
use crate::table::PageResponse;
use async_trait::async_trait;
use std::path::Path;

pub mod http;
pub mod memory;

/// An icon image to upload with a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl IconFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).to_string();
        Self {
            file_name,
            bytes,
            mime,
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SysmeticError::InvalidInput(format!("Not a file: {}", path.display())))?;
        Ok(Self::new(file_name, bytes))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Name and icon for creating or updating a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDraft {
    pub name: String,
    pub icon: Option<IconFile>,
}

/// Abstract interface to the marketplace API.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Method and instrument names for the strategy search checkboxes
    async fn method_and_stock(&self) -> Result<MethodAndStock>;

    /// Strategy search, either tab (the query's context decides which)
    async fn search_strategies(&self, query: &ListQuery) -> Result<PageResponse<StrategySummary>>;

    async fn list_catalog(
        &self,
        kind: CatalogKind,
        query: &ListQuery,
    ) -> Result<PageResponse<CatalogItem>>;
    async fn create_catalog_item(&self, kind: CatalogKind, draft: &CatalogDraft) -> Result<()>;
    async fn update_catalog_item(
        &self,
        kind: CatalogKind,
        id: i64,
        draft: &CatalogDraft,
    ) -> Result<()>;
    async fn delete_catalog_items(&self, kind: CatalogKind, ids: &[i64]) -> Result<()>;

    async fn admin_strategies(&self, query: &ListQuery) -> Result<PageResponse<AdminStrategyRow>>;
    async fn approve_strategies(&self, ids: &[i64]) -> Result<()>;
    async fn reject_strategy(&self, id: i64, reason: &str) -> Result<()>;

    async fn members(&self, query: &ListQuery) -> Result<PageResponse<MemberRow>>;
    async fn change_member_roles(&self, ids: &[i64], role: MemberRole) -> Result<()>;
    async fn delete_members(&self, ids: &[i64]) -> Result<()>;

    async fn notices(&self, query: &ListQuery) -> Result<PageResponse<NoticeRow>>;
    async fn delete_notices(&self, ids: &[i64]) -> Result<()>;
    /// Flip a notice between public and hidden
    async fn toggle_notice_visibility(&self, id: i64) -> Result<()>;

    async fn inquiries(&self, query: &ListQuery) -> Result<PageResponse<InquiryRow>>;
    async fn delete_inquiries(&self, ids: &[i64]) -> Result<()>;

    async fn my_strategies(&self, query: &ListQuery) -> Result<PageResponse<StrategySummary>>;
    async fn delete_my_strategies(&self, ids: &[i64]) -> Result<()>;

    /// Every question of the current user; paged client-side
    async fn my_questions(&self) -> Result<Vec<QuestionRow>>;
}
