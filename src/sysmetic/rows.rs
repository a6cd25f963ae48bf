//! # Row Selectors
//!
//! Table rows are addressed from the command line by their 1-based position
//! on the listed page, the same numbers the list output prints in its first
//! column. A selector is either a single number (`3`) or an inclusive range
//! (`2-5`). Selectors resolve to 0-based page indices, which is what the
//! selection store holds.

use crate::error::{Result, SysmeticError};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelector {
    Single(usize),
    Range(usize, usize),
}

impl fmt::Display for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelector::Single(n) => write!(f, "{}", n),
            RowSelector::Range(a, b) => write!(f, "{}-{}", a, b),
        }
    }
}

fn parse_row_number(s: &str) -> std::result::Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row number: '{}'", s))?;
    if n == 0 {
        return Err("Row numbers start at 1".to_string());
    }
    Ok(n)
}

impl FromStr for RowSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some((start, end)) = s.split_once('-') {
            let start = parse_row_number(start)?;
            let end = parse_row_number(end)?;
            if start > end {
                return Err(format!("Invalid row range '{}': start after end", s));
            }
            return Ok(RowSelector::Range(start, end));
        }
        parse_row_number(s).map(RowSelector::Single)
    }
}

/// Resolve selectors against a page of `page_len` rows.
///
/// Returns sorted, de-duplicated 0-based indices. Any row past the end of the
/// page is an error.
pub fn resolve_rows(selectors: &[RowSelector], page_len: usize) -> Result<Vec<usize>> {
    let mut out = BTreeSet::new();
    for selector in selectors {
        let (start, end) = match *selector {
            RowSelector::Single(n) => (n, n),
            RowSelector::Range(a, b) => (a, b),
        };
        if end > page_len {
            return Err(SysmeticError::NotFound(format!(
                "row {} (the page has {} rows)",
                selector, page_len
            )));
        }
        out.extend((start - 1)..end);
    }
    Ok(out.into_iter().collect())
}
