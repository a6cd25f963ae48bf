//! Numeric range validation and the two-phase range draft.
//!
//! A range is edited as two free-text drafts and only becomes a filter value
//! once [`validate_range`] accepts it. Valid committed ranges:
//! - At least one side present
//! - Each present side is an optional `-` followed by digits
//! - Start strictly below end when both are present
//! - Every present side within `[RANGE_MIN, RANGE_MAX]` (percent)

use serde::Serialize;
use thiserror::Error;

pub const RANGE_MIN: i64 = -100;
pub const RANGE_MAX: i64 = 100;

/// Error type for range validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Both sides are empty
    #[error("range required")]
    Required,
    /// A side is not an integer
    #[error("range values must be whole numbers")]
    Malformed,
    /// Start is not below end
    #[error("start must be less than end")]
    Order,
    /// A side lies outside the allowed bounds
    #[error("value out of bounds: enter a value between -100 and 100")]
    OutOfBounds,
}

/// A validated range. Empty text on a side means unbounded on that side.
///
/// Only [`validate_range`] builds one, so every instance holds the invariants
/// listed in the module docs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeValue {
    start: String,
    end: String,
}

impl RangeValue {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn lower(&self) -> Option<i64> {
        parse_bound(&self.start)
    }

    pub fn upper(&self) -> Option<i64> {
        parse_bound(&self.end)
    }

    /// Whether `value` falls inside the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        let above = self.lower().is_none_or(|lo| value >= lo as f64);
        let below = self.upper().is_none_or(|hi| value <= hi as f64);
        above && below
    }
}

/// Validates a pair of draft texts.
///
/// # Examples
/// ```
/// use sysmetic::filters::{validate_range, RangeError};
///
/// let range = validate_range("-20", "50").unwrap();
/// assert_eq!((range.start(), range.end()), ("-20", "50"));
///
/// assert_eq!(validate_range("", ""), Err(RangeError::Required));
/// assert_eq!(validate_range("10", "5"), Err(RangeError::Order));
/// assert_eq!(validate_range("-150", "50"), Err(RangeError::OutOfBounds));
/// ```
pub fn validate_range(start: &str, end: &str) -> Result<RangeValue, RangeError> {
    let start = start.trim();
    let end = end.trim();

    if start.is_empty() && end.is_empty() {
        return Err(RangeError::Required);
    }

    let lower = side(start)?;
    let upper = side(end)?;

    if let (Some(lo), Some(hi)) = (lower, upper) {
        if lo >= hi {
            return Err(RangeError::Order);
        }
    }

    let in_bounds = |v: Option<i64>| v.is_none_or(|v| (RANGE_MIN..=RANGE_MAX).contains(&v));
    if !in_bounds(lower) || !in_bounds(upper) {
        return Err(RangeError::OutOfBounds);
    }

    Ok(RangeValue {
        start: start.to_string(),
        end: end.to_string(),
    })
}

fn side(text: &str) -> Result<Option<i64>, RangeError> {
    if text.is_empty() {
        return Ok(None);
    }
    if !is_integer_text(text) {
        return Err(RangeError::Malformed);
    }
    Ok(parse_bound(text))
}

/// `-?\d+`
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Parses an integer text, saturating instead of overflowing.
fn parse_bound(text: &str) -> Option<i64> {
    if !is_integer_text(text) {
        return None;
    }
    match text.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) if text.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Whether a keystroke result may stand as draft text: `^-?\d*$`.
pub fn is_draft_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    digits.chars().all(|c| c.is_ascii_digit())
}

/// The editable side of a range filter.
///
/// Keystrokes only touch the draft; [`RangeDraft::submit`] is the single
/// transition to a committed [`RangeValue`], and a failed submit leaves the
/// draft as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeDraft {
    start: String,
    end: String,
    error: Option<RangeError>,
}

impl RangeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft mirroring an already committed range.
    pub fn from_committed(value: &RangeValue) -> Self {
        Self {
            start: value.start.clone(),
            end: value.end.clone(),
            error: None,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// The message of the last failed submit, cleared by the next success.
    pub fn error(&self) -> Option<RangeError> {
        self.error
    }

    /// Replace the start text. Returns false (and keeps the old text) when
    /// the new text is not a partial integer.
    pub fn set_start(&mut self, text: &str) -> bool {
        if !is_draft_text(text) {
            return false;
        }
        self.start = text.to_string();
        true
    }

    pub fn set_end(&mut self, text: &str) -> bool {
        if !is_draft_text(text) {
            return false;
        }
        self.end = text.to_string();
        true
    }

    /// Validate the drafts and return the value to commit.
    pub fn submit(&mut self) -> Result<RangeValue, RangeError> {
        match validate_range(&self.start, &self.end) {
            Ok(value) => {
                self.error = None;
                Ok(value)
            }
            Err(err) => {
                self.error = Some(err);
                Err(err)
            }
        }
    }

    /// Resynchronize with the committed value, or blank the drafts when the
    /// field was cleared.
    pub fn sync(&mut self, committed: Option<&RangeValue>) {
        match committed {
            Some(value) => *self = Self::from_committed(value),
            None => *self = Self::default(),
        }
    }
}
