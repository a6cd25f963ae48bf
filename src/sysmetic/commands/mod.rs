//! # Command Layer
//!
//! This module contains the **business operations** of each list screen. Each
//! screen lives in its own submodule and exposes async functions that take a
//! [`DataSource`](crate::store::DataSource) and the screen state they act on.
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Fetch pages into a [`ListScreen`](crate::screen::ListScreen) through its
//!   ticketed request cycle
//! - Check preconditions before any remote call (something selected, a
//!   non-empty reason, no duplicate name, an icon attached)
//! - Run the mutation, then clear the selection and refetch
//! - Return a [`CmdResult`] with structured messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal output**: no stdout, stderr or colors
//! - **Argument parsing**: the CLI turns row numbers into page indices
//! - **Retries**: a failed remote call is returned as is
//!
//! ## Refetch After Mutation
//!
//! A mutation that succeeded stays successful even when the refetch that
//! follows fails; the refetch failure is reported as a warning message.
//!
//! ## Testing Strategy
//!
//! Command tests run against [`InMemorySource`](crate::store::memory::InMemorySource)
//! on a tokio test runtime and check both the returned result and the screen
//! state left behind.
//!
//! ## Command Modules
//!
//! - [`options`]: Load remote method/instrument option lists
//! - [`strategies`]: Strategy search (conditions and algorithm tabs)
//! - [`catalog`]: Admin stock and trading-method tables
//! - [`review`]: Admin strategy approval
//! - [`members`]: Admin member table
//! - [`notices`]: Admin notice table
//! - [`inquiries`]: Admin inquiry table
//! - [`mine`]: The current user's strategies
//! - [`questions`]: The current user's questions, paged client-side

use crate::error::Result;
use serde::Serialize;
use tracing::info;

pub mod catalog;
pub mod inquiries;
pub mod members;
pub mod mine;
pub mod notices;
pub mod options;
pub mod questions;
pub mod review;
pub mod strategies;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Server ids of the rows the command changed
    pub affected_ids: Vec<i64>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_ids(mut self, ids: Vec<i64>) -> Self {
        self.affected_ids = ids;
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}

/// Result of a successful mutation on `ids`.
pub(crate) fn mutated(ids: Vec<i64>, message: String) -> CmdResult {
    info!(ids = ?ids, "{}", message);
    let mut result = CmdResult::default().with_affected_ids(ids);
    result.add_message(CmdMessage::success(message));
    result
}

/// Record the outcome of the refetch that follows a mutation.
pub(crate) fn note_refresh(result: &mut CmdResult, refresh: Result<bool>) {
    if let Err(e) = refresh {
        result.add_message(CmdMessage::warning(format!("List not refreshed: {}", e)));
    }
}

/// "1 stock" / "3 stocks"
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else if let Some(stem) = noun.strip_suffix('y') {
        format!("{} {}ies", count, stem)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SysmeticError;

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "member"), "1 member");
        assert_eq!(plural(0, "member"), "0 members");
        assert_eq!(plural(2, "notice"), "2 notices");
        assert_eq!(plural(3, "strategy"), "3 strategies");
    }

    #[test]
    fn failed_refresh_becomes_warning() {
        let mut result = mutated(vec![1], "Deleted 1 notice".to_string());
        note_refresh(&mut result, Err(SysmeticError::Store("gone".into())));
        assert!(result.has_level(MessageLevel::Success));
        assert!(result.has_level(MessageLevel::Warning));
        assert_eq!(result.affected_ids, vec![1]);
    }
}
