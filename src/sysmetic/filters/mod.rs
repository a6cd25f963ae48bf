//! # Filter System
//!
//! Every list screen offers a set of filters. Rather than hand-coding each
//! screen's filter bar, the filter system splits the work into:
//!
//! - **Specifications**: which fields a screen offers, how each is edited,
//!   which options it carries ([`FilterRegistry`])
//! - **Values**: the committed value per field id ([`FilterValues`])
//! - **Controls**: value-bound inputs that emit [`FilterChange`]s ([`render`])
//! - **Validation**: numeric ranges checked before commit ([`validate_range`])
//! - **Query flattening**: values turned into request parameters ([`QueryParams`])
//!
//! ## Field Kinds
//!
//! | Kind | Examples | Value |
//! |------|----------|-------|
//! | `MultiSelect` | `cycle`, `methods` | `Multi(["D", "P"])` |
//! | `SingleSelect` | `period`, `algorithm` | `Single("ALL")` |
//! | `NumericRange` | `accumProfitLossRate` | `Range("-20".."50")` |
//! | `Keyword` | `keyword`, `searchText` | `Text("momentum")` |
//!
//! ## Usage
//!
//! ```ignore
//! let registry = FilterRegistry::default();
//! let field = registry.field(FilterContext::StrategyConditions, ids::CYCLE).unwrap();
//!
//! if let FilterControl::MultiSelect(mut control) = render(field, values.get(field.id)) {
//!     values.apply(control.toggle("D")?);
//! }
//!
//! let params = QueryParams::from_filters(registry.fields(ctx), &values, 0);
//! ```

mod fields;
mod input;
mod params;
mod range;
mod value;

pub use fields::{ids, FilterContext, FilterField, FilterKind, FilterOption, FilterRegistry};
pub use input::{
    render, FilterControl, KeywordControl, MultiSelectControl, RangeControl, SingleSelectControl,
};
pub use params::QueryParams;
pub use range::{
    is_draft_text, validate_range, RangeDraft, RangeError, RangeValue, RANGE_MAX, RANGE_MIN,
};
pub use value::{FilterChange, FilterValue, FilterValues};
