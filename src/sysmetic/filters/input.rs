//! Filter input controls.
//!
//! [`render`] turns a field definition plus its committed value into a control bound
//! to that value. Controls never write to the store themselves: every user
//! action returns a [`FilterChange`] that the owning screen applies. Range
//! controls keep their own draft text and only emit once the draft validates.

use super::fields::{FilterField, FilterKind, FilterOption};
use super::range::{RangeDraft, RangeError};
use super::value::{FilterChange, FilterValue};
use crate::error::{Result, SysmeticError};

/// A control for one filter field, shaped by the field's kind.
#[derive(Debug, Clone)]
pub enum FilterControl<'a> {
    MultiSelect(MultiSelectControl<'a>),
    SingleSelect(SingleSelectControl<'a>),
    NumericRange(RangeControl<'a>),
    Keyword(KeywordControl<'a>),
}

/// Build the control for `field`, initialized from its committed value.
///
/// A committed value of the wrong shape is ignored and the control starts
/// blank.
pub fn render<'a>(field: &'a FilterField, current: Option<&FilterValue>) -> FilterControl<'a> {
    match field.kind {
        FilterKind::MultiSelect => FilterControl::MultiSelect(MultiSelectControl {
            field,
            selected: current
                .and_then(FilterValue::as_multi)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        }),
        FilterKind::SingleSelect => FilterControl::SingleSelect(SingleSelectControl {
            field,
            chosen: current
                .and_then(FilterValue::as_single)
                .map(str::to_string),
        }),
        FilterKind::NumericRange => FilterControl::NumericRange(RangeControl {
            field,
            draft: current
                .and_then(FilterValue::as_range)
                .map(RangeDraft::from_committed)
                .unwrap_or_default(),
        }),
        FilterKind::Keyword => FilterControl::Keyword(KeywordControl {
            field,
            text: current
                .and_then(FilterValue::as_text)
                .unwrap_or_default()
                .to_string(),
        }),
    }
}

impl<'a> FilterControl<'a> {
    pub fn field(&self) -> &'a FilterField {
        match self {
            FilterControl::MultiSelect(c) => c.field,
            FilterControl::SingleSelect(c) => c.field,
            FilterControl::NumericRange(c) => c.field,
            FilterControl::Keyword(c) => c.field,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.field().kind
    }
}

/// Checkbox set.
#[derive(Debug, Clone)]
pub struct MultiSelectControl<'a> {
    field: &'a FilterField,
    selected: Vec<String>,
}

impl<'a> MultiSelectControl<'a> {
    /// Every declared option with its checked flag, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = (&'a FilterOption, bool)> + '_ {
        self.field
            .options
            .iter()
            .map(move |option| (option, self.selected.contains(&option.value)))
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Check or uncheck `value` and emit the whole selection.
    ///
    /// Checking a value outside the loaded options fails; unchecking always
    /// works.
    pub fn toggle(&mut self, value: &str) -> Result<FilterChange> {
        if let Some(pos) = self.selected.iter().position(|v| v == value) {
            self.selected.remove(pos);
        } else if self.field.accepts(value) {
            self.selected.push(value.to_string());
        } else {
            return Err(SysmeticError::InvalidInput(format!(
                "'{}' is not an option of {}",
                value, self.field.label
            )));
        }
        Ok(FilterChange::set(
            self.field.id,
            FilterValue::Multi(self.selected.clone()),
        ))
    }
}

/// Radio group or select box.
#[derive(Debug, Clone)]
pub struct SingleSelectControl<'a> {
    field: &'a FilterField,
    chosen: Option<String>,
}

impl<'a> SingleSelectControl<'a> {
    pub fn options(&self) -> impl Iterator<Item = (&'a FilterOption, bool)> + '_ {
        let effective = self.effective();
        self.field
            .options
            .iter()
            .map(move |option| (option, Some(option.value.as_str()) == effective))
    }

    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    /// The chosen value, or the first declared option when nothing is chosen.
    ///
    /// The fallback is for display only and is never written to the store.
    pub fn effective(&self) -> Option<&str> {
        self.chosen
            .as_deref()
            .or_else(|| self.field.first_option().map(|o| o.value.as_str()))
    }

    pub fn choose(&mut self, value: &str) -> Result<FilterChange> {
        if !self.field.accepts(value) {
            return Err(SysmeticError::InvalidInput(format!(
                "'{}' is not an option of {}",
                value, self.field.label
            )));
        }
        self.chosen = Some(value.to_string());
        Ok(FilterChange::set(
            self.field.id,
            FilterValue::Single(value.to_string()),
        ))
    }
}

/// Two-sided numeric range with draft text.
#[derive(Debug, Clone)]
pub struct RangeControl<'a> {
    field: &'a FilterField,
    draft: RangeDraft,
}

impl<'a> RangeControl<'a> {
    pub fn draft(&self) -> &RangeDraft {
        &self.draft
    }

    pub fn set_start(&mut self, text: &str) -> bool {
        self.draft.set_start(text)
    }

    pub fn set_end(&mut self, text: &str) -> bool {
        self.draft.set_end(text)
    }

    /// Validate the drafts; emits a change only when they pass.
    pub fn submit(&mut self) -> std::result::Result<FilterChange, RangeError> {
        let value = self.draft.submit()?;
        Ok(FilterChange::set(self.field.id, FilterValue::Range(value)))
    }

    /// Key handler for the draft inputs. Only `Enter` submits.
    pub fn key(&mut self, key: &str) -> Option<std::result::Result<FilterChange, RangeError>> {
        (key == "Enter").then(|| self.submit())
    }

    pub fn clear(&mut self) -> FilterChange {
        self.draft.sync(None);
        FilterChange::clear(self.field.id)
    }
}

/// Free-text search box.
#[derive(Debug, Clone)]
pub struct KeywordControl<'a> {
    field: &'a FilterField,
    text: String,
}

impl<'a> KeywordControl<'a> {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Commit the search text. Blank text clears the field.
    pub fn enter(&mut self, text: &str) -> FilterChange {
        self.text = text.trim().to_string();
        if self.text.is_empty() {
            FilterChange::clear(self.field.id)
        } else {
            FilterChange::set(self.field.id, FilterValue::Text(self.text.clone()))
        }
    }
}
