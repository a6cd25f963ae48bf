//! Sort specs for client-side ordered lists.
//!
//! A spec is written `key_direction`, e.g. `date_desc` or `strategyName_asc`.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient an ascending comparison.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Sort `rows` in place with `compare` giving the ascending order for this key.
    pub fn sort<R, F>(&self, rows: &mut [R], compare: F)
    where
        F: Fn(&str, &R, &R) -> Ordering,
    {
        rows.sort_by(|a, b| self.direction.apply(compare(&self.key, a, b)));
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}_{}", self.key, dir)
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, dir) = s
            .rsplit_once('_')
            .ok_or_else(|| format!("Invalid sort '{}': expected key_asc or key_desc", s))?;
        let direction = match dir {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(format!("Invalid sort direction '{}' in '{}'", dir, s)),
        };
        if key.is_empty() {
            return Err(format!("Invalid sort '{}': missing key", s));
        }
        Ok(SortSpec::new(key, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_and_direction() {
        let spec: SortSpec = "strategyName_asc".parse().unwrap();
        assert_eq!(spec.key, "strategyName");
        assert_eq!(spec.direction, SortDirection::Asc);
        assert_eq!(spec.to_string(), "strategyName_asc");
    }

    #[test]
    fn rejects_bad_specs() {
        assert!("date".parse::<SortSpec>().is_err());
        assert!("date_sideways".parse::<SortSpec>().is_err());
        assert!("_asc".parse::<SortSpec>().is_err());
    }

    #[test]
    fn sort_respects_direction() {
        let mut rows = vec![2, 3, 1];
        let spec: SortSpec = "n_desc".parse().unwrap();
        spec.sort(&mut rows, |_, a, b| a.cmp(b));
        assert_eq!(rows, vec![3, 2, 1]);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(SortDirection::Asc.toggle(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggle(), SortDirection::Asc);
    }
}
