//! Filter values and the per-screen value store.
//!
//! The store maps a field id to its current [`FilterValue`]. A missing key
//! means "no filter applied" for that field; values that carry no constraint
//! (an empty checkbox set, a blank keyword) are normalized to absence so the
//! store never holds a value the query layer would have to skip.

use super::range::RangeValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// Runtime representation of a committed filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FilterValue {
    /// Checked option values in the order they were checked, without duplicates
    Multi(Vec<String>),

    /// One chosen option value
    Single(String),

    /// A validated numeric range
    Range(RangeValue),

    /// Free-text search
    Text(String),
}

impl FilterValue {
    /// Build a multi value, dropping duplicates while keeping first-seen order.
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !out.contains(&value) {
                out.push(value);
            }
        }
        FilterValue::Multi(out)
    }

    /// Whether the value constrains nothing and should be stored as absence.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Multi(values) => values.is_empty(),
            FilterValue::Single(_) | FilterValue::Range(_) => false,
            FilterValue::Text(text) => text.trim().is_empty(),
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            FilterValue::Multi(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            FilterValue::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeValue> {
        match self {
            FilterValue::Range(range) => Some(range),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A `(field id, new value)` pair emitted by a filter control.
///
/// `value: None` clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    pub field_id: String,
    pub value: Option<FilterValue>,
}

impl FilterChange {
    pub fn set(field_id: impl Into<String>, value: FilterValue) -> Self {
        Self {
            field_id: field_id.into(),
            value: Some(value),
        }
    }

    pub fn clear(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            value: None,
        }
    }
}

/// Current filter values of one screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterValues {
    values: BTreeMap<String, FilterValue>,
    revision: u64,
}

impl FilterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&FilterValue> {
        self.values.get(field_id)
    }

    /// Replace the value of one field. Other fields are untouched.
    ///
    /// Returns the previous value. Empty values clear the field instead.
    pub fn set(&mut self, field_id: &str, value: FilterValue) -> Option<FilterValue> {
        if value.is_empty() {
            return self.clear(field_id);
        }
        if self.values.get(field_id) == Some(&value) {
            return Some(value);
        }
        self.revision += 1;
        self.values.insert(field_id.to_string(), value)
    }

    pub fn clear(&mut self, field_id: &str) -> Option<FilterValue> {
        let previous = self.values.remove(field_id);
        if previous.is_some() {
            self.revision += 1;
        }
        previous
    }

    pub fn clear_all(&mut self) {
        if !self.values.is_empty() {
            self.values.clear();
            self.revision += 1;
        }
    }

    /// Apply a change emitted by a control. Returns true when the store changed.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let before = self.revision;
        match change.value {
            Some(value) => {
                self.set(&change.field_id, value);
            }
            None => {
                self.clear(&change.field_id);
            }
        }
        self.revision != before
    }

    /// Bumped by every mutation that actually changed a value.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Entries ordered by field id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
