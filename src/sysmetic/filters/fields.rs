//! Filter field definitions and the built-in registry.
//!
//! This module declares which filter fields each list screen offers: their
//! ids, labels, how they are edited and which options they carry. The
//! registry is read-mostly; the only mutation is replacing the options of a
//! field once a remote option list has been loaded.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field ids shared between the registry, the screens and the query layer.
pub mod ids {
    pub const METHODS: &str = "methods";
    pub const CYCLE: &str = "cycle";
    pub const STOCK_NAMES: &str = "stockNames";
    pub const PERIOD: &str = "period";
    pub const PROFIT_RATE: &str = "accumProfitLossRate";
    pub const ALGORITHM: &str = "algorithm";
    pub const OPEN_STATUS: &str = "openStatus";
    pub const APPROVAL_STATUS: &str = "approvalStatus";
    pub const KEYWORD: &str = "keyword";
    pub const ROLE: &str = "role";
    pub const SEARCH_TYPE: &str = "searchType";
    pub const SEARCH_TEXT: &str = "searchText";
    pub const CLOSED: &str = "closed";
    pub const STATUS: &str = "status";
}

/// How a filter field is edited, and therefore which value shape it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterKind {
    /// Checkbox set; holds every checked option value.
    MultiSelect,

    /// Radio group or select box; holds exactly one option value.
    SingleSelect,

    /// Two free-text bounds committed together after validation.
    NumericRange,

    /// Free-text search box.
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub tooltip: Option<String>,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Specification for a single filter field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterField {
    /// Unique within its context
    pub id: &'static str,

    pub label: &'static str,

    pub kind: FilterKind,

    /// Ordered options; empty for ranges, keywords and not-yet-loaded lists
    pub options: Vec<FilterOption>,

    /// Query parameter name used when the value is sent to the API
    pub param: &'static str,
}

impl FilterField {
    fn new(id: &'static str, label: &'static str, kind: FilterKind) -> Self {
        Self {
            id,
            label,
            kind,
            options: Vec::new(),
            param: id,
        }
    }

    fn param(mut self, param: &'static str) -> Self {
        self.param = param;
        self
    }

    fn option(mut self, value: &str, label: &str) -> Self {
        self.options.push(FilterOption::new(value, label));
        self
    }

    fn option_with_tooltip(mut self, value: &str, label: &str, tooltip: &str) -> Self {
        self.options
            .push(FilterOption::new(value, label).with_tooltip(tooltip));
        self
    }

    /// Whether `value` is one of the declared options.
    ///
    /// Fields whose options have not been loaded yet accept anything.
    pub fn accepts(&self, value: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|o| o.value == value)
    }

    pub fn first_option(&self) -> Option<&FilterOption> {
        self.options.first()
    }
}

/// The list screens that own a set of filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FilterContext {
    /// Strategy search, "by conditions" tab
    StrategyConditions,
    /// Strategy search, "by algorithm" tab
    StrategyAlgorithm,
    AdminStrategies,
    Members,
    Notices,
    Inquiries,
    MyQuestions,
    /// Admin stock and trading-method tables
    Catalog,
    MyStrategies,
}

impl FilterContext {
    pub const ALL: [FilterContext; 9] = [
        FilterContext::StrategyConditions,
        FilterContext::StrategyAlgorithm,
        FilterContext::AdminStrategies,
        FilterContext::Members,
        FilterContext::Notices,
        FilterContext::Inquiries,
        FilterContext::MyQuestions,
        FilterContext::Catalog,
        FilterContext::MyStrategies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterContext::StrategyConditions => "conditions",
            FilterContext::StrategyAlgorithm => "algorithm",
            FilterContext::AdminStrategies => "admin-strategies",
            FilterContext::Members => "members",
            FilterContext::Notices => "notices",
            FilterContext::Inquiries => "inquiries",
            FilterContext::MyQuestions => "questions",
            FilterContext::Catalog => "catalog",
            FilterContext::MyStrategies => "mine",
        }
    }
}

impl fmt::Display for FilterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterContext::ALL
            .into_iter()
            .find(|ctx| ctx.as_str() == s)
            .ok_or_else(|| format!("Unknown filter context: {}", s))
    }
}

static BUILTIN: Lazy<FilterRegistry> = Lazy::new(FilterRegistry::build);

/// Filter fields for every list screen, keyed by context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRegistry {
    contexts: BTreeMap<FilterContext, Vec<FilterField>>,
}

impl FilterRegistry {
    /// The process-wide registry as declared, before any remote options are merged.
    pub fn builtin() -> &'static FilterRegistry {
        &BUILTIN
    }

    fn build() -> Self {
        let mut contexts = BTreeMap::new();

        contexts.insert(
            FilterContext::StrategyConditions,
            vec![
                FilterField::new(ids::METHODS, "Trading method", FilterKind::MultiSelect),
                FilterField::new(ids::CYCLE, "Cycle", FilterKind::MultiSelect)
                    .option("D", "Day")
                    .option("P", "Position"),
                FilterField::new(ids::STOCK_NAMES, "Instruments", FilterKind::MultiSelect),
                FilterField::new(ids::PERIOD, "Operating period", FilterKind::SingleSelect)
                    .option("ALL", "All")
                    .option("LESS_THAN_YEAR", "Up to 1 year")
                    .option("ONE_TO_TWO_YEAR", "1 to 2 years")
                    .option("TWO_TO_THREE_YEAR", "2 to 3 years")
                    .option("THREE_YEAR_MORE", "3 years or more"),
                FilterField::new(
                    ids::PROFIT_RATE,
                    "Cumulative P/L rate",
                    FilterKind::NumericRange,
                )
                .param("accumulatedProfitLossRate"),
            ],
        );

        contexts.insert(
            FilterContext::StrategyAlgorithm,
            vec![
                FilterField::new(ids::ALGORITHM, "Algorithm", FilterKind::SingleSelect)
                    .option_with_tooltip(
                        "EFFICIENCY",
                        "Efficiency",
                        "Sorted by cumulative return / MDD, highest first",
                    )
                    .option_with_tooltip(
                        "OFFENSIVE",
                        "Offensive",
                        "Sorted by cumulative return / (1 - win rate), highest first",
                    )
                    .option_with_tooltip(
                        "DEFENSIVE",
                        "Defensive",
                        "(MDD rank + std-dev rank + win-rate rank) / 3",
                    ),
            ],
        );

        contexts.insert(
            FilterContext::AdminStrategies,
            vec![
                FilterField::new(ids::OPEN_STATUS, "Visibility", FilterKind::SingleSelect)
                    .option("PUBLIC", "Public")
                    .option("PRIVATE", "Private"),
                FilterField::new(ids::APPROVAL_STATUS, "Approval", FilterKind::SingleSelect)
                    .option("APPROVED", "Approved")
                    .option("REJECTED", "Rejected")
                    .option("NOT_REQUESTED", "Not requested")
                    .option("REQUESTED", "Requested"),
                FilterField::new(ids::KEYWORD, "Strategy name", FilterKind::Keyword),
            ],
        );

        contexts.insert(
            FilterContext::Members,
            vec![
                FilterField::new(ids::ROLE, "Role", FilterKind::SingleSelect)
                    .option("ALL", "All")
                    .option("USER", "User")
                    .option("TRADER", "Trader")
                    .option("MANAGER", "Manager"),
                FilterField::new(ids::SEARCH_TYPE, "Search by", FilterKind::SingleSelect)
                    .option("ALL", "All")
                    .option("EMAIL", "Email")
                    .option("NAME", "Name")
                    .option("NICKNAME", "Nickname")
                    .option("PHONE", "Phone"),
                FilterField::new(ids::SEARCH_TEXT, "Search", FilterKind::Keyword),
            ],
        );

        contexts.insert(
            FilterContext::Notices,
            vec![
                FilterField::new(ids::SEARCH_TYPE, "Search by", FilterKind::SingleSelect)
                    .option("TITLE", "Title")
                    .option("CONTENT", "Content")
                    .option("TITLE_CONTENT", "Title + content")
                    .option("WRITER", "Writer"),
                FilterField::new(ids::SEARCH_TEXT, "Search", FilterKind::Keyword),
            ],
        );

        contexts.insert(
            FilterContext::Inquiries,
            vec![
                FilterField::new(ids::CLOSED, "Answer state", FilterKind::SingleSelect)
                    .option("ALL", "All")
                    .option("CLOSED", "Answered")
                    .option("OPEN", "Waiting"),
                FilterField::new(ids::SEARCH_TYPE, "Search by", FilterKind::SingleSelect)
                    .option("STRATEGY", "Strategy")
                    .option("TRADER", "Trader")
                    .option("INQUIRER", "Inquirer"),
                FilterField::new(ids::SEARCH_TEXT, "Search", FilterKind::Keyword),
            ],
        );

        contexts.insert(
            FilterContext::MyQuestions,
            vec![FilterField::new(ids::STATUS, "Answer state", FilterKind::SingleSelect)
                .option("all", "All")
                .option("waiting", "Waiting")
                .option("answered", "Answered")],
        );

        // Unfiltered tables
        contexts.insert(FilterContext::Catalog, Vec::new());
        contexts.insert(FilterContext::MyStrategies, Vec::new());

        Self { contexts }
    }

    /// Fields of one context in declaration order.
    pub fn fields(&self, context: FilterContext) -> &[FilterField] {
        self.contexts
            .get(&context)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn field(&self, context: FilterContext, id: &str) -> Option<&FilterField> {
        self.fields(context).iter().find(|field| field.id == id)
    }

    /// Replace the options of every field with the given id.
    ///
    /// Returns how many fields were updated; zero means the id is unknown.
    pub fn replace_options(&mut self, id: &str, options: Vec<FilterOption>) -> usize {
        let mut updated = 0;
        for field in self.contexts.values_mut().flatten() {
            if field.id == id {
                field.options = options.clone();
                updated += 1;
            }
        }
        updated
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        FilterRegistry::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_tab_has_expected_fields_in_order() {
        let registry = FilterRegistry::default();
        let ids: Vec<_> = registry
            .fields(FilterContext::StrategyConditions)
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                ids::METHODS,
                ids::CYCLE,
                ids::STOCK_NAMES,
                ids::PERIOD,
                ids::PROFIT_RATE
            ]
        );
    }

    #[test]
    fn remote_lists_start_empty() {
        let registry = FilterRegistry::default();
        let ctx = FilterContext::StrategyConditions;
        assert!(registry
            .field(ctx, ids::METHODS)
            .unwrap()
            .options
            .is_empty());
        assert!(registry
            .field(ctx, ids::STOCK_NAMES)
            .unwrap()
            .options
            .is_empty());
    }

    #[test]
    fn profit_rate_field_is_correct() {
        let registry = FilterRegistry::default();
        let field = registry
            .field(FilterContext::StrategyConditions, ids::PROFIT_RATE)
            .unwrap();
        assert_eq!(field.kind, FilterKind::NumericRange);
        assert_eq!(field.param, "accumulatedProfitLossRate");
    }

    #[test]
    fn algorithm_options_carry_tooltips() {
        let registry = FilterRegistry::default();
        let field = registry
            .field(FilterContext::StrategyAlgorithm, ids::ALGORITHM)
            .unwrap();
        assert_eq!(field.kind, FilterKind::SingleSelect);
        assert_eq!(field.options.len(), 3);
        assert!(field.options.iter().all(|o| o.tooltip.is_some()));
        assert_eq!(field.first_option().unwrap().value, "EFFICIENCY");
    }

    #[test]
    fn every_context_is_registered() {
        let registry = FilterRegistry::default();
        assert_eq!(registry.contexts.len(), FilterContext::ALL.len());
        assert!(registry.fields(FilterContext::Catalog).is_empty());
    }

    #[test]
    fn unknown_field_returns_none() {
        let registry = FilterRegistry::default();
        assert!(registry
            .field(FilterContext::StrategyConditions, "nonexistent")
            .is_none());
    }

    #[test]
    fn replace_options_updates_only_matching_field() {
        let mut registry = FilterRegistry::default();
        let updated = registry.replace_options(
            ids::METHODS,
            vec![FilterOption::new("Auto", "Auto")],
        );
        assert_eq!(updated, 1);

        let ctx = FilterContext::StrategyConditions;
        assert_eq!(registry.field(ctx, ids::METHODS).unwrap().options.len(), 1);
        assert!(registry
            .field(ctx, ids::STOCK_NAMES)
            .unwrap()
            .options
            .is_empty());
        // The shared registry is untouched
        assert!(FilterRegistry::builtin()
            .field(ctx, ids::METHODS)
            .unwrap()
            .options
            .is_empty());
    }

    #[test]
    fn replace_options_on_unknown_id_is_a_no_op() {
        let mut registry = FilterRegistry::default();
        assert_eq!(registry.replace_options("nope", vec![]), 0);
        assert_eq!(registry, FilterRegistry::default());
    }

    #[test]
    fn accepts_checks_declared_options() {
        let registry = FilterRegistry::default();
        let ctx = FilterContext::StrategyConditions;
        let period = registry.field(ctx, ids::PERIOD).unwrap();
        assert!(period.accepts("ALL"));
        assert!(!period.accepts("FOREVER"));

        // Not loaded yet: anything goes
        let methods = registry.field(ctx, ids::METHODS).unwrap();
        assert!(methods.accepts("Anything"));
    }

    #[test]
    fn context_names_round_trip() {
        for ctx in FilterContext::ALL {
            assert_eq!(ctx.as_str().parse::<FilterContext>().unwrap(), ctx);
        }
        assert!("bogus".parse::<FilterContext>().is_err());
    }
}
