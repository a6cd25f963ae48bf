//! Flattening filter values into query parameters.

use super::fields::FilterField;
use super::value::{FilterValue, FilterValues};
use serde::Serialize;

/// Ordered query parameters. Keys may repeat (one pair per checked option).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a value snapshot, then append the page index.
    ///
    /// Parameter names come from the matching field; values for ids the
    /// fields do not declare fall back to the id itself.
    pub fn from_filters(fields: &[FilterField], values: &FilterValues, page: usize) -> Self {
        let mut params = Self::new();
        for (id, value) in values.iter() {
            let param = fields
                .iter()
                .find(|field| field.id == id)
                .map(|field| field.param)
                .unwrap_or(id);
            params.push_value(param, value);
        }
        params.push("page", page.to_string());
        params
    }

    fn push_value(&mut self, param: &str, value: &FilterValue) {
        match value {
            FilterValue::Multi(values) => {
                for v in values {
                    self.push(param, v.clone());
                }
            }
            FilterValue::Single(v) | FilterValue::Text(v) => self.push(param, v.clone()),
            FilterValue::Range(range) => {
                if !range.start().is_empty() {
                    self.push(format!("{}RangeStart", param), range.start().to_string());
                }
                if !range.end().is_empty() {
                    self.push(format!("{}RangeEnd", param), range.end().to_string());
                }
            }
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
