use super::{CatalogDraft, DataSource};
use crate::error::{Result, SysmeticError};
use crate::filters::{ids, FilterContext, QueryParams};
use crate::model::{
    AdminStrategyRow, ApprovalStatus, CatalogItem, CatalogKind, InquiryRow, MemberRole, MemberRow,
    MethodAndStock, NamedOption, NoticeRow, QuestionRow, StrategySummary,
};
use crate::screen::ListQuery;
use crate::table::PageResponse;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    methods: Vec<NamedOption>,
    stocks: Vec<NamedOption>,
    strategies: Vec<StrategySummary>,
    catalog: BTreeMap<CatalogKind, Vec<CatalogItem>>,
    admin_strategies: Vec<AdminStrategyRow>,
    rejections: Vec<(i64, String)>,
    members: Vec<MemberRow>,
    notices: Vec<NoticeRow>,
    inquiries: Vec<InquiryRow>,
    my_strategies: Vec<StrategySummary>,
    questions: Vec<QuestionRow>,
    fail_next: Option<(u16, String)>,
    calls: Vec<String>,
}

/// In-process stand-in for the marketplace API.
///
/// Applies filters and paging the way the server does, so screen and command
/// logic can be exercised end to end without a network.
#[derive(Debug, Default)]
pub struct InMemorySource {
    state: Mutex<MemoryState>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| SysmeticError::Store("in-memory state poisoned".to_string()))
    }

    /// Record the call and honor a pending injected failure.
    fn begin(&self, call: String) -> Result<MutexGuard<'_, MemoryState>> {
        let mut state = self.state()?;
        state.calls.push(call);
        if let Some((status, message)) = state.fail_next.take() {
            return Err(SysmeticError::Api { status, message });
        }
        Ok(state)
    }

    pub fn with_options(self, methods: &[&str], stocks: &[&str]) -> Self {
        if let Ok(mut state) = self.state() {
            state.methods = named(methods);
            state.stocks = named(stocks);
        }
        self
    }

    pub fn with_strategies(self, rows: Vec<StrategySummary>) -> Self {
        if let Ok(mut state) = self.state() {
            state.strategies = rows;
        }
        self
    }

    pub fn with_catalog(self, kind: CatalogKind, rows: Vec<CatalogItem>) -> Self {
        if let Ok(mut state) = self.state() {
            state.catalog.insert(kind, rows);
        }
        self
    }

    pub fn with_admin_strategies(self, rows: Vec<AdminStrategyRow>) -> Self {
        if let Ok(mut state) = self.state() {
            state.admin_strategies = rows;
        }
        self
    }

    pub fn with_members(self, rows: Vec<MemberRow>) -> Self {
        if let Ok(mut state) = self.state() {
            state.members = rows;
        }
        self
    }

    pub fn with_notices(self, rows: Vec<NoticeRow>) -> Self {
        if let Ok(mut state) = self.state() {
            state.notices = rows;
        }
        self
    }

    pub fn with_inquiries(self, rows: Vec<InquiryRow>) -> Self {
        if let Ok(mut state) = self.state() {
            state.inquiries = rows;
        }
        self
    }

    pub fn with_my_strategies(self, rows: Vec<StrategySummary>) -> Self {
        if let Ok(mut state) = self.state() {
            state.my_strategies = rows;
        }
        self
    }

    pub fn with_questions(self, rows: Vec<QuestionRow>) -> Self {
        if let Ok(mut state) = self.state() {
            state.questions = rows;
        }
        self
    }

    /// Make the next call fail with the given status.
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        if let Ok(mut state) = self.state() {
            state.fail_next = Some((status, message.into()));
        }
    }

    /// Calls received so far, e.g. `"approve [1, 2]"`.
    pub fn calls(&self) -> Vec<String> {
        self.state().map(|s| s.calls.clone()).unwrap_or_default()
    }

    pub fn rejections(&self) -> Vec<(i64, String)> {
        self.state().map(|s| s.rejections.clone()).unwrap_or_default()
    }

    pub fn catalog(&self, kind: CatalogKind) -> Vec<CatalogItem> {
        self.state()
            .map(|s| s.catalog.get(&kind).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn admin_strategy_rows(&self) -> Vec<AdminStrategyRow> {
        self.state()
            .map(|s| s.admin_strategies.clone())
            .unwrap_or_default()
    }

    pub fn member_rows(&self) -> Vec<MemberRow> {
        self.state().map(|s| s.members.clone()).unwrap_or_default()
    }

    pub fn notice_rows(&self) -> Vec<NoticeRow> {
        self.state().map(|s| s.notices.clone()).unwrap_or_default()
    }

    pub fn inquiry_rows(&self) -> Vec<InquiryRow> {
        self.state().map(|s| s.inquiries.clone()).unwrap_or_default()
    }

    pub fn my_strategy_rows(&self) -> Vec<StrategySummary> {
        self.state()
            .map(|s| s.my_strategies.clone())
            .unwrap_or_default()
    }
}

fn named(names: &[&str]) -> Vec<NamedOption> {
    names
        .iter()
        .zip(1..)
        .map(|(name, id)| NamedOption {
            id,
            name: name.to_string(),
        })
        .collect()
}

fn paginate<R: Clone>(rows: Vec<R>, query: &ListQuery) -> PageResponse<R> {
    let size = query.page_size.max(1);
    let total = rows.len();
    let content = rows
        .into_iter()
        .skip(query.page.saturating_mul(size))
        .take(size)
        .collect();
    PageResponse {
        content,
        total_pages: total.div_ceil(size),
        total_element: total,
        page_size: Some(size),
        current_page: Some(query.page),
    }
}

/// A parameter that is missing or set to `ALL` does not filter.
fn active<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("ALL"))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn bound(params: &QueryParams, key: &str) -> Option<f64> {
    params.get(key).and_then(|v| v.parse().ok())
}

/// Rows carry no start date, so the `period` parameter is not applied here.
fn matches_conditions(
    row: &StrategySummary,
    params: &QueryParams,
    methods: &[NamedOption],
) -> bool {
    let wanted: Vec<_> = params.get_all(ids::METHODS).collect();
    if !wanted.is_empty() {
        let method = methods
            .iter()
            .find(|m| m.id == row.method_id)
            .map(|m| m.name.as_str());
        if !method.is_some_and(|name| wanted.contains(&name)) {
            return false;
        }
    }
    let cycles: Vec<_> = params.get_all(ids::CYCLE).collect();
    if !cycles.is_empty() && !cycles.contains(&row.cycle.as_str()) {
        return false;
    }
    let stocks: Vec<_> = params.get_all(ids::STOCK_NAMES).collect();
    if !stocks.is_empty()
        && !row
            .stock_list
            .stock_names
            .iter()
            .any(|s| stocks.contains(&s.as_str()))
    {
        return false;
    }
    let rate = row.accumulated_profit_loss_rate;
    let lower = bound(params, "accumulatedProfitLossRateRangeStart");
    let upper = bound(params, "accumulatedProfitLossRateRangeEnd");
    lower.is_none_or(|lo| rate >= lo) && upper.is_none_or(|hi| rate <= hi)
}

fn algorithm_score(row: &StrategySummary, algorithm: &str) -> f64 {
    match algorithm {
        "OFFENSIVE" => row.accumulated_profit_loss_rate,
        "DEFENSIVE" => -row.mdd.abs(),
        _ => row.accumulated_profit_loss_rate / row.mdd.abs().max(1.0),
    }
}

fn search_field<'a>(search_type: Option<&str>, candidates: &[(&str, &'a str)]) -> Vec<&'a str> {
    match search_type {
        None => candidates.iter().map(|(_, v)| *v).collect(),
        Some(kind) => candidates
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(kind))
            .map(|(_, v)| *v)
            .collect(),
    }
}

fn text_matches(params: &QueryParams, candidates: &[(&str, &str)]) -> bool {
    let Some(text) = active(params, ids::SEARCH_TEXT) else {
        return true;
    };
    search_field(active(params, ids::SEARCH_TYPE), candidates)
        .into_iter()
        .any(|v| contains_ci(v, text))
}

fn remove_ids<R>(rows: &mut Vec<R>, ids: &[i64], id_of: impl Fn(&R) -> i64) -> Result<()> {
    if let Some(missing) = ids.iter().find(|id| !rows.iter().any(|r| id_of(r) == **id)) {
        return Err(SysmeticError::NotFound(format!("id {}", missing)));
    }
    rows.retain(|r| !ids.contains(&id_of(r)));
    Ok(())
}

#[async_trait]
impl DataSource for InMemorySource {
    async fn method_and_stock(&self) -> Result<MethodAndStock> {
        let state = self.begin("method_and_stock".to_string())?;
        Ok(MethodAndStock {
            method_list: state.methods.clone(),
            stock_list: state.stocks.clone(),
        })
    }

    async fn search_strategies(&self, query: &ListQuery) -> Result<PageResponse<StrategySummary>> {
        let state = self.begin(format!("search {}", query.context))?;
        let mut rows: Vec<_> = state.strategies.clone();
        match query.context {
            FilterContext::StrategyAlgorithm => {
                let algorithm = query.params.get(ids::ALGORITHM).unwrap_or("EFFICIENCY");
                rows.sort_by(|a, b| {
                    algorithm_score(b, algorithm).total_cmp(&algorithm_score(a, algorithm))
                });
            }
            _ => rows.retain(|row| matches_conditions(row, &query.params, &state.methods)),
        }
        Ok(paginate(rows, query))
    }

    async fn list_catalog(
        &self,
        kind: CatalogKind,
        query: &ListQuery,
    ) -> Result<PageResponse<CatalogItem>> {
        let state = self.begin(format!("list {}", kind))?;
        let rows = state.catalog.get(&kind).cloned().unwrap_or_default();
        Ok(paginate(rows, query))
    }

    async fn create_catalog_item(&self, kind: CatalogKind, draft: &CatalogDraft) -> Result<()> {
        let mut state = self.begin(format!("create {} {}", kind, draft.name))?;
        let icon = draft
            .icon
            .as_ref()
            .ok_or_else(|| SysmeticError::Api {
                status: 400,
                message: "icon file is required".to_string(),
            })?;
        let rows = state.catalog.entry(kind).or_default();
        if rows.iter().any(|r| r.name == draft.name) {
            return Err(SysmeticError::Api {
                status: 409,
                message: format!("{} already exists", draft.name),
            });
        }
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(CatalogItem {
            id,
            name: draft.name.clone(),
            file_path: format!("/icons/{}", icon.file_name),
        });
        Ok(())
    }

    async fn update_catalog_item(
        &self,
        kind: CatalogKind,
        id: i64,
        draft: &CatalogDraft,
    ) -> Result<()> {
        let mut state = self.begin(format!("update {} {}", kind, id))?;
        let rows = state.catalog.entry(kind).or_default();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SysmeticError::NotFound(format!("{} {}", kind.label(), id)))?;
        row.name = draft.name.clone();
        if let Some(icon) = &draft.icon {
            row.file_path = format!("/icons/{}", icon.file_name);
        }
        Ok(())
    }

    async fn delete_catalog_items(&self, kind: CatalogKind, ids: &[i64]) -> Result<()> {
        let mut state = self.begin(format!("delete {} {:?}", kind, ids))?;
        let rows = state.catalog.entry(kind).or_default();
        remove_ids(rows, ids, |r| r.id)
    }

    async fn admin_strategies(&self, query: &ListQuery) -> Result<PageResponse<AdminStrategyRow>> {
        let state = self.begin("admin_strategies".to_string())?;
        let params = &query.params;
        let open = active(params, ids::OPEN_STATUS);
        let approval = active(params, ids::APPROVAL_STATUS);
        let keyword = active(params, ids::KEYWORD);
        let rows: Vec<_> = state
            .admin_strategies
            .iter()
            .filter(|r| open.is_none_or(|v| r.open_status.as_str() == v))
            .filter(|r| approval.is_none_or(|v| r.approval_status_code.as_str() == v))
            .filter(|r| keyword.is_none_or(|k| contains_ci(&r.strategy_name, k)))
            .cloned()
            .collect();
        Ok(paginate(rows, query))
    }

    async fn approve_strategies(&self, ids: &[i64]) -> Result<()> {
        let mut state = self.begin(format!("approve {:?}", ids))?;
        for id in ids {
            let row = state
                .admin_strategies
                .iter_mut()
                .find(|r| r.strategy_id == *id)
                .ok_or_else(|| SysmeticError::NotFound(format!("strategy {}", id)))?;
            row.approval_status_code = ApprovalStatus::Approved;
        }
        Ok(())
    }

    async fn reject_strategy(&self, id: i64, reason: &str) -> Result<()> {
        let mut state = self.begin(format!("reject {}", id))?;
        let row = state
            .admin_strategies
            .iter_mut()
            .find(|r| r.strategy_id == id)
            .ok_or_else(|| SysmeticError::NotFound(format!("strategy {}", id)))?;
        row.approval_status_code = ApprovalStatus::Rejected;
        state.rejections.push((id, reason.to_string()));
        Ok(())
    }

    async fn members(&self, query: &ListQuery) -> Result<PageResponse<MemberRow>> {
        let state = self.begin("members".to_string())?;
        let params = &query.params;
        let role = active(params, ids::ROLE);
        let rows: Vec<_> = state
            .members
            .iter()
            .filter(|r| role.is_none_or(|v| r.role_code.as_str() == v))
            .filter(|r| {
                text_matches(
                    params,
                    &[
                        ("EMAIL", r.email.as_str()),
                        ("NAME", r.name.as_str()),
                        ("NICKNAME", r.nickname.as_str()),
                        ("PHONE", r.phone_number.as_str()),
                    ],
                )
            })
            .cloned()
            .collect();
        Ok(paginate(rows, query))
    }

    async fn change_member_roles(&self, ids: &[i64], role: MemberRole) -> Result<()> {
        let mut state = self.begin(format!("role {:?} {}", ids, role))?;
        for id in ids {
            let row = state
                .members
                .iter_mut()
                .find(|r| r.id == *id)
                .ok_or_else(|| SysmeticError::NotFound(format!("member {}", id)))?;
            row.role_code = role;
        }
        Ok(())
    }

    async fn delete_members(&self, ids: &[i64]) -> Result<()> {
        let mut state = self.begin(format!("delete members {:?}", ids))?;
        remove_ids(&mut state.members, ids, |r| r.id)
    }

    async fn notices(&self, query: &ListQuery) -> Result<PageResponse<NoticeRow>> {
        let state = self.begin("notices".to_string())?;
        let rows: Vec<_> = state
            .notices
            .iter()
            .filter(|r| {
                text_matches(
                    &query.params,
                    &[
                        ("TITLE", r.notice_title.as_str()),
                        ("TITLE_CONTENT", r.notice_title.as_str()),
                        ("WRITER", r.writer_nickname.as_str()),
                    ],
                )
            })
            .cloned()
            .collect();
        Ok(paginate(rows, query))
    }

    async fn delete_notices(&self, ids: &[i64]) -> Result<()> {
        let mut state = self.begin(format!("delete notices {:?}", ids))?;
        remove_ids(&mut state.notices, ids, |r| r.notice_id)
    }

    async fn toggle_notice_visibility(&self, id: i64) -> Result<()> {
        let mut state = self.begin(format!("toggle notice {}", id))?;
        let row = state
            .notices
            .iter_mut()
            .find(|r| r.notice_id == id)
            .ok_or_else(|| SysmeticError::NotFound(format!("notice {}", id)))?;
        row.is_open = !row.is_open;
        Ok(())
    }

    async fn inquiries(&self, query: &ListQuery) -> Result<PageResponse<InquiryRow>> {
        let state = self.begin("inquiries".to_string())?;
        let closed = active(&query.params, ids::CLOSED);
        let rows: Vec<_> = state
            .inquiries
            .iter()
            .filter(|r| closed.is_none_or(|v| r.inquiry_status.eq_ignore_ascii_case(v)))
            .filter(|r| {
                text_matches(
                    &query.params,
                    &[
                        ("STRATEGY", r.strategy_name.as_str()),
                        ("TRADER", r.trader_nickname.as_str()),
                        ("INQUIRER", r.inquirer_nickname.as_str()),
                    ],
                )
            })
            .cloned()
            .collect();
        Ok(paginate(rows, query))
    }

    async fn delete_inquiries(&self, ids: &[i64]) -> Result<()> {
        let mut state = self.begin(format!("delete inquiries {:?}", ids))?;
        remove_ids(&mut state.inquiries, ids, |r| r.inquiry_id)
    }

    async fn my_strategies(&self, query: &ListQuery) -> Result<PageResponse<StrategySummary>> {
        let state = self.begin("my_strategies".to_string())?;
        Ok(paginate(state.my_strategies.clone(), query))
    }

    async fn delete_my_strategies(&self, ids: &[i64]) -> Result<()> {
        let mut state = self.begin(format!("delete my strategies {:?}", ids))?;
        remove_ids(&mut state.my_strategies, ids, |r| r.strategy_id)
    }

    async fn my_questions(&self) -> Result<Vec<QuestionRow>> {
        let state = self.begin("my_questions".to_string())?;
        Ok(state.questions.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::*;

    pub fn strategy(
        id: i64,
        name: &str,
        cycle: Cycle,
        rate: f64,
        mdd: f64,
        stocks: &[&str],
    ) -> StrategySummary {
        StrategySummary {
            strategy_id: id,
            name: name.to_string(),
            trader_id: 100 + id,
            trader_nickname: format!("trader{}", id),
            method_id: 1,
            method_icon_path: String::new(),
            stock_list: StockList {
                stock_ids: (1..=stocks.len() as i64).collect(),
                stock_names: stocks.iter().map(|s| s.to_string()).collect(),
                stock_icon_path: Vec::new(),
            },
            cycle,
            mdd,
            sm_score: 50.0,
            accumulated_profit_loss_rate: rate,
            follower_count: Some(0),
            ranking: None,
        }
    }

    pub fn strategies(count: i64) -> Vec<StrategySummary> {
        (1..=count)
            .map(|i| {
                let cycle = if i % 2 == 0 {
                    Cycle::Position
                } else {
                    Cycle::Day
                };
                strategy(
                    i,
                    &format!("Strategy {}", i),
                    cycle,
                    (i * 7 % 120 - 40) as f64,
                    -(i as f64),
                    &["KOSPI200"],
                )
            })
            .collect()
    }

    pub fn catalog_item(id: i64, name: &str) -> CatalogItem {
        CatalogItem {
            id,
            name: name.to_string(),
            file_path: format!("/icons/{}.png", id),
        }
    }

    pub fn admin_strategy(
        id: i64,
        name: &str,
        open: OpenStatus,
        approval: ApprovalStatus,
    ) -> AdminStrategyRow {
        AdminStrategyRow {
            strategy_id: id,
            strategy_name: name.to_string(),
            trader_name: "trader".to_string(),
            open_status: open,
            strategy_create_date: "2024-05-01".to_string(),
            method_icon_path: String::new(),
            stock_list: StockList::default(),
            approval_status_code: approval,
        }
    }

    pub fn member(id: i64, email: &str, nickname: &str, role: MemberRole) -> MemberRow {
        MemberRow {
            id,
            email: email.to_string(),
            name: format!("Member {}", id),
            nickname: nickname.to_string(),
            phone_number: format!("010-0000-{:04}", id),
            role_code: role,
            birth: None,
        }
    }

    pub fn notice(id: i64, title: &str, is_open: bool) -> NoticeRow {
        NoticeRow {
            notice_id: id,
            notice_title: title.to_string(),
            writer_nickname: "admin".to_string(),
            write_date: "2024-05-01T09:00:00".to_string(),
            hits: 0,
            file_exists: false,
            is_open,
        }
    }

    pub fn inquiry(id: i64, strategy: &str, status: &str) -> InquiryRow {
        InquiryRow {
            inquiry_id: id,
            inquiry_title: format!("Question {}", id),
            strategy_name: strategy.to_string(),
            trader_nickname: "trader".to_string(),
            inquirer_nickname: format!("user{}", id),
            inquiry_registration_date: "2024-05-01".to_string(),
            inquiry_status: status.to_string(),
        }
    }

    pub fn question(name: &str, strategy: &str, date: &str, status: QuestionStatus) -> QuestionRow {
        QuestionRow {
            question_name: name.to_string(),
            strategy_name: strategy.to_string(),
            date: date.to_string(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::filters::{FilterRegistry, FilterValue};
    use crate::model::{Cycle, OpenStatus};
    use crate::screen::ListScreen;

    fn query_for(ctx: FilterContext, set: &[(&str, FilterValue)], page: usize) -> ListQuery {
        let registry = FilterRegistry::default();
        let mut screen: ListScreen<()> = ListScreen::new(ctx, registry.fields(ctx), 10);
        for (id, value) in set {
            screen.set_filter(id, value.clone());
        }
        screen.go_to_page(page);
        screen.begin_request()
    }

    #[tokio::test]
    async fn pages_like_the_server() {
        let source = InMemorySource::new().with_strategies(strategies(25));
        let query = query_for(FilterContext::StrategyConditions, &[], 2);
        let page = source.search_strategies(&query).await.unwrap();
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_element, 25);
    }

    #[tokio::test]
    async fn filters_by_cycle() {
        let source = InMemorySource::new().with_strategies(strategies(10));
        let query = query_for(
            FilterContext::StrategyConditions,
            &[(ids::CYCLE, FilterValue::multi(["P"]))],
            0,
        );
        let page = source.search_strategies(&query).await.unwrap();
        assert_eq!(page.total_element, 5);
        assert!(page.content.iter().all(|s| s.cycle == Cycle::Position));
    }

    #[tokio::test]
    async fn filters_by_method_name() {
        let mut rows = strategies(6);
        for row in rows.iter_mut().filter(|r| r.strategy_id > 4) {
            row.method_id = 2;
        }
        let source = InMemorySource::new()
            .with_options(&["Auto", "Manual"], &["KOSPI200"])
            .with_strategies(rows);
        let query = query_for(
            FilterContext::StrategyConditions,
            &[(ids::METHODS, FilterValue::multi(["Manual"]))],
            0,
        );
        let page = source.search_strategies(&query).await.unwrap();
        let found: Vec<_> = page.content.iter().map(|s| s.strategy_id).collect();
        assert_eq!(found, vec![5, 6]);
    }

    #[tokio::test]
    async fn admin_filters_combine() {
        let source = InMemorySource::new().with_admin_strategies(vec![
            admin_strategy(1, "Alpha", OpenStatus::Public, ApprovalStatus::Requested),
            admin_strategy(2, "Beta", OpenStatus::Private, ApprovalStatus::Requested),
            admin_strategy(3, "Alphabet", OpenStatus::Public, ApprovalStatus::Approved),
        ]);
        let query = query_for(
            FilterContext::AdminStrategies,
            &[
                (ids::OPEN_STATUS, FilterValue::Single("PUBLIC".into())),
                (ids::KEYWORD, FilterValue::Text("alpha".into())),
            ],
            0,
        );
        let page = source.admin_strategies(&query).await.unwrap();
        assert_eq!(page.total_element, 2);
    }

    #[tokio::test]
    async fn injected_failure_hits_next_call_only() {
        let source = InMemorySource::new();
        source.fail_next(500, "down");
        let err = source.method_and_stock().await.unwrap_err();
        assert!(matches!(err, SysmeticError::Api { status: 500, .. }));
        assert!(source.method_and_stock().await.is_ok());
        assert_eq!(source.calls(), vec!["method_and_stock", "method_and_stock"]);
    }

    #[tokio::test]
    async fn deleting_unknown_id_fails_without_removing_anything() {
        let source = InMemorySource::new().with_notices(vec![notice(1, "a", true)]);
        let err = source.delete_notices(&[1, 9]).await.unwrap_err();
        assert!(matches!(err, SysmeticError::NotFound(_)));
        assert_eq!(source.notice_rows().len(), 1);
    }
}
