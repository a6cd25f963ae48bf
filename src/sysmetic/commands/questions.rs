use crate::error::{Result, SysmeticError};
use crate::filters::{ids, FilterContext, FilterRegistry};
use crate::model::{QuestionRow, QuestionStatus};
use crate::store::DataSource;
use crate::table::{ClientPager, PageState, SortDirection, SortSpec};
use std::cmp::Ordering;

pub const SORT_KEYS: [&str; 2] = ["date", "strategyName"];

fn compare(key: &str, a: &QuestionRow, b: &QuestionRow) -> Ordering {
    match key {
        "strategyName" => a.strategy_name.cmp(&b.strategy_name),
        _ => a.date.cmp(&b.date),
    }
}

/// The current user's questions, loaded once and then filtered, sorted and
/// paged locally.
#[derive(Debug, Clone)]
pub struct QuestionBoard {
    all: Vec<QuestionRow>,
    status: Option<QuestionStatus>,
    sort: SortSpec,
    pager: ClientPager<QuestionRow>,
}

impl QuestionBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            status: None,
            sort: SortSpec::new("date", SortDirection::Desc),
            pager: ClientPager::new(Vec::new(), page_size),
        }
    }

    pub fn status(&self) -> Option<QuestionStatus> {
        self.status
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Restrict to one answer state; `all` lifts the restriction.
    pub fn set_status(&mut self, value: &str) -> Result<()> {
        let field = FilterRegistry::builtin()
            .field(FilterContext::MyQuestions, ids::STATUS)
            .ok_or_else(|| SysmeticError::NotFound(ids::STATUS.to_string()))?;
        if !field.accepts(value) {
            return Err(SysmeticError::InvalidInput(format!(
                "Unknown status '{}' (choose from: {})",
                value,
                field
                    .options
                    .iter()
                    .map(|o| o.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        self.status = match value {
            "all" => None,
            other => Some(other.parse().map_err(SysmeticError::InvalidInput)?),
        };
        self.refresh();
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortSpec) -> Result<()> {
        if !SORT_KEYS.contains(&sort.key.as_str()) {
            return Err(SysmeticError::InvalidInput(format!(
                "Cannot sort questions by '{}' (choose from: {})",
                sort.key,
                SORT_KEYS.join(", ")
            )));
        }
        self.sort = sort;
        self.refresh();
        Ok(())
    }

    /// Swap in a freshly fetched collection.
    pub fn replace_all(&mut self, rows: Vec<QuestionRow>) {
        self.all = rows;
        self.refresh();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pager.go_to(page);
    }

    pub fn rows(&self) -> &[QuestionRow] {
        self.pager.current_page()
    }

    pub fn page(&self) -> PageState {
        self.pager.state()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages()
    }

    fn refresh(&mut self) {
        let mut visible: Vec<_> = self
            .all
            .iter()
            .filter(|q| self.status.is_none_or(|s| q.status == s))
            .cloned()
            .collect();
        self.sort.sort(&mut visible, compare);
        self.pager.replace(visible);
    }
}

/// Fetch every question into `board`, returning how many there are.
pub async fn load<S: DataSource>(source: &S, board: &mut QuestionBoard) -> Result<usize> {
    let rows = source.my_questions().await?;
    let count = rows.len();
    board.replace_all(rows);
    Ok(count)
}
