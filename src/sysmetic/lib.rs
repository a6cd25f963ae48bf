//! # Sysmetic Architecture
//!
//! Sysmetic is a **UI-agnostic list-screen library** for a trading-strategy
//! marketplace: strategy search, admin tables (stocks, trading methods,
//! strategy approval, members, notices, inquiries) and the user's own
//! strategies and questions. The bundled CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints tables, owns the tokio runtime  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (row selectors → page indices)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Fetch, mutate, refetch; returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                          │
//!                  ▼                          ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Screen State                 │ │  Data Source (store/)     │
//! │  screen, filters, table       │ │  HttpSource, InMemory     │
//! │  synchronous, no I/O          │ │  async trait              │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Key Principle: State Is Synchronous
//!
//! Filter values, range drafts, the selection and the page position change
//! synchronously through `&mut` methods. Only data source calls are async, and
//! a screen's ticketed request cycle makes sure the last request issued is
//! the one whose answer is shown.
//!
//! ## Testing Strategy
//!
//! 1. **State** (`filters`, `table`, `screen`): unit tests and `proptest`
//!    properties beside the code
//! 2. **Commands**: `tokio::test` against `InMemorySource`
//! 3. **CLI**: `assert_cmd` tests in `tests/`
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Operations of each screen
//! - [`screen`]: One server-paged list with its filter bar
//! - [`filters`]: Filter specs, values, controls, range validation, query flattening
//! - [`table`]: Selection, paging and sorting
//! - [`store`]: Data source trait, HTTP client and in-memory fake
//! - [`model`]: Rows and enums as the API sends them
//! - [`chart`]: Period filtering of chart series
//! - [`rows`]: 1-based row selectors
//! - [`config`]: Configuration management
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod chart;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod logging;
pub mod model;
pub mod rows;
pub mod screen;
pub mod store;
pub mod table;
