//! # CLI Layer
//!
//! This module is **one possible UI client** for sysmetic; it is not the
//! library itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Builds the tokio runtime that drives the async data source
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## One Invocation, One Screen
//!
//! Every list command builds the screen for its context, applies the filters
//! given as flags through the same controls a UI would use, moves to the
//! requested page and fetches it. An action subcommand then checks the named
//! rows and runs the mutation, which refetches the page it acted on.
//!
//! Filters are applied before anything touches the network, so an invalid
//! range or an unknown option fails without a request.

use super::print::{
    print_admin_strategies, print_catalog, print_fields, print_footer, print_inquiries,
    print_members, print_messages, print_notices, print_questions, print_series,
    print_strategies,
};
use super::setup::{
    CatalogAction, Cli, Commands, DeleteAction, MemberAction, NoticeAction, PageArg,
    ReviewAction, SearchArgs,
};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use colored::Colorize;
use std::future::Future;
use std::path::Path;
use sysmetic::api::SysmeticApi;
use sysmetic::chart::{ChartPeriod, DualSeries};
use sysmetic::config::{self, SysmeticConfig};
use sysmetic::error::{Result, SysmeticError};
use sysmetic::filters::{
    ids, render, FilterChange, FilterContext, FilterControl, FilterValue, RangeError,
};
use sysmetic::logging;
use sysmetic::model::{CatalogKind, MemberRole};
use sysmetic::screen::ListScreen;
use sysmetic::store::http::HttpSource;
use sysmetic::store::IconFile;

struct AppContext {
    api: SysmeticApi<HttpSource>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Config { key, value } => handle_config(key, value),
        Commands::Chart {
            file,
            period,
            today,
        } => handle_chart(&file, &period, today.as_deref()),
        command => {
            let mut ctx = init_context()?;
            block_on(dispatch(&mut ctx, command))
        }
    }
}

fn init_context() -> Result<AppContext> {
    let config = SysmeticConfig::resolve(config::data_dir()?)?;
    let source = HttpSource::new(&config)?;
    Ok(AppContext {
        api: SysmeticApi::with_page_size(source, config.page_size),
    })
}

fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

async fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Filters { context, remote } => handle_filters(ctx, context, remote).await,
        Commands::Strategies {
            algorithm,
            method,
            cycle,
            stock,
            period,
            range,
            page,
        } => {
            let filters = StrategyFilters {
                algorithm,
                method,
                cycle,
                stock,
                period,
                range,
            };
            handle_strategies(ctx, filters, page).await
        }
        Commands::Catalog { kind, page, action } => {
            handle_catalog(ctx, kind.into(), page, action).await
        }
        Commands::Review {
            open,
            approval,
            keyword,
            page,
            action,
        } => handle_review(ctx, open, approval, keyword, page, action).await,
        Commands::Members {
            role,
            search,
            page,
            action,
        } => handle_members(ctx, role, search, page, action).await,
        Commands::Notices {
            search,
            page,
            action,
        } => handle_notices(ctx, search, page, action).await,
        Commands::Inquiries {
            closed,
            search,
            page,
            action,
        } => handle_inquiries(ctx, closed, search, page, action).await,
        Commands::Mine { page, action } => handle_mine(ctx, page, action).await,
        Commands::Questions { status, sort, page } => {
            handle_questions(ctx, &status, &sort, page).await
        }
        Commands::Config { .. } | Commands::Chart { .. } => Ok(()),
    }
}

// --- Filter flags ---

/// Run `act` on the control for field `id` and apply the change it emits.
fn apply_control<R>(
    screen: &mut ListScreen<R>,
    id: &str,
    act: impl FnOnce(FilterControl<'_>) -> Result<FilterChange>,
) -> Result<()> {
    let field = screen
        .field(id)
        .cloned()
        .ok_or_else(|| SysmeticError::NotFound(format!("filter '{}'", id)))?;
    let change = act(render(&field, screen.filters().get(id)))?;
    screen.apply(change);
    Ok(())
}

fn kind_mismatch(id: &str) -> SysmeticError {
    SysmeticError::InvalidInput(format!("filter '{}' does not take this kind of value", id))
}

fn choose<R>(screen: &mut ListScreen<R>, id: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else { return Ok(()) };
    apply_control(screen, id, |control| match control {
        FilterControl::SingleSelect(mut c) => c.choose(value),
        _ => Err(kind_mismatch(id)),
    })
}

/// Check every value given on the command line. Repeats are ignored, so a
/// flag given twice never unchecks its value.
fn check_all<R>(screen: &mut ListScreen<R>, id: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    apply_control(screen, id, |control| match control {
        FilterControl::MultiSelect(mut c) => {
            for value in values {
                if !c.selected().contains(value) {
                    c.toggle(value)?;
                }
            }
            Ok(FilterChange::set(id, FilterValue::Multi(c.selected().to_vec())))
        }
        _ => Err(kind_mismatch(id)),
    })
}

fn search_for<R>(screen: &mut ListScreen<R>, search: &SearchArgs) -> Result<()> {
    choose(screen, ids::SEARCH_TYPE, search.search_type.as_deref())?;
    if let Some(text) = &search.search {
        keyword(screen, ids::SEARCH_TEXT, text)?;
    }
    Ok(())
}

fn keyword<R>(screen: &mut ListScreen<R>, id: &str, text: &str) -> Result<()> {
    apply_control(screen, id, |control| match control {
        FilterControl::Keyword(mut c) => Ok(c.enter(text)),
        _ => Err(kind_mismatch(id)),
    })
}

fn range<R>(screen: &mut ListScreen<R>, id: &str, start: &str, end: &str) -> Result<()> {
    apply_control(screen, id, |control| match control {
        FilterControl::NumericRange(mut c) => {
            if !c.set_start(start) || !c.set_end(end) {
                return Err(RangeError::Malformed.into());
            }
            Ok(c.submit()?)
        }
        _ => Err(kind_mismatch(id)),
    })
}

fn go_to<R>(screen: &mut ListScreen<R>, page: PageArg) {
    screen.go_to_page(page.page.saturating_sub(1));
}

// --- Handlers ---

async fn handle_filters(
    ctx: &mut AppContext,
    context: Option<String>,
    remote: bool,
) -> Result<()> {
    let contexts = match context {
        Some(name) => vec![name
            .parse::<FilterContext>()
            .map_err(SysmeticError::InvalidInput)?],
        None => FilterContext::ALL.to_vec(),
    };
    if remote {
        let result = ctx.api.load_options().await?;
        print_messages(&result.messages);
    }
    for (i, context) in contexts.iter().enumerate() {
        if contexts.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("{}", format!("== {} ==", context).cyan());
        }
        print_fields(ctx.api.registry().fields(*context));
    }
    Ok(())
}

struct StrategyFilters {
    algorithm: Option<String>,
    method: Vec<String>,
    cycle: Vec<String>,
    stock: Vec<String>,
    period: Option<String>,
    range: Option<Vec<String>>,
}

async fn handle_strategies(
    ctx: &mut AppContext,
    filters: StrategyFilters,
    page: PageArg,
) -> Result<()> {
    let mut screen = match &filters.algorithm {
        Some(algorithm) => {
            let mut screen = ctx.api.screen(FilterContext::StrategyAlgorithm);
            choose(&mut screen, ids::ALGORITHM, Some(algorithm.as_str()))?;
            screen
        }
        None => {
            let mut screen = ctx.api.screen(FilterContext::StrategyConditions);
            if let Some([start, end]) = filters.range.as_deref() {
                range(&mut screen, ids::PROFIT_RATE, start, end)?;
            }
            check_all(&mut screen, ids::METHODS, &filters.method)?;
            check_all(&mut screen, ids::CYCLE, &filters.cycle)?;
            check_all(&mut screen, ids::STOCK_NAMES, &filters.stock)?;
            choose(&mut screen, ids::PERIOD, filters.period.as_deref())?;
            screen
        }
    };
    go_to(&mut screen, page);

    ctx.api.search(&mut screen).await?;
    print_strategies(screen.rows());
    print_footer(screen.page(), screen.total_pages());
    Ok(())
}

async fn handle_catalog(
    ctx: &mut AppContext,
    kind: CatalogKind,
    page: PageArg,
    action: Option<CatalogAction>,
) -> Result<()> {
    let mut screen = ctx.api.screen(FilterContext::Catalog);
    go_to(&mut screen, page);
    ctx.api.catalog(kind, &mut screen).await?;

    if let Some(action) = action {
        let result = match action {
            CatalogAction::Add { name, icon } => {
                let icon = IconFile::read(&icon)?;
                ctx.api
                    .create_catalog_item(kind, &mut screen, &name, Some(icon))
                    .await?
            }
            CatalogAction::Edit { row, name, icon } => {
                let icon = icon.as_deref().map(IconFile::read).transpose()?;
                ctx.api
                    .update_catalog_item(kind, &mut screen, &row, &name, icon)
                    .await?
            }
            CatalogAction::Delete { rows } => {
                ctx.api.select(&mut screen, &rows)?;
                ctx.api.delete_catalog_items(kind, &mut screen).await?
            }
        };
        print_messages(&result.messages);
    }

    print_catalog(screen.rows());
    print_footer(screen.page(), screen.total_pages());
    Ok(())
}

async fn handle_review(
    ctx: &mut AppContext,
    open: Option<String>,
    approval: Option<String>,
    keyword_text: Option<String>,
    page: PageArg,
    action: Option<ReviewAction>,
) -> Result<()> {
    let mut screen = ctx.api.screen(FilterContext::AdminStrategies);
    choose(&mut screen, ids::OPEN_STATUS, open.as_deref())?;
    choose(&mut screen, ids::APPROVAL_STATUS, approval.as_deref())?;
    if let Some(text) = &keyword_text {
        keyword(&mut screen, ids::KEYWORD, text)?;
    }
    go_to(&mut screen, page);
    ctx.api.admin_strategies(&mut screen).await?;

    if let Some(action) = action {
        let result = match action {
            ReviewAction::Approve { rows } => {
                ctx.api.select(&mut screen, &rows)?;
                ctx.api.approve(&mut screen).await?
            }
            ReviewAction::Reject { row, reason } => {
                ctx.api
                    .reject(&mut screen, &row, &reason.join(" "))
                    .await?
            }
        };
        print_messages(&result.messages);
    }

    print_admin_strategies(screen.rows());
    print_footer(screen.page(), screen.total_pages());
    Ok(())
}

async fn handle_members(
    ctx: &mut AppContext,
    role: Option<String>,
    search: SearchArgs,
    page: PageArg,
    action: Option<MemberAction>,
) -> Result<()> {
    let mut screen = ctx.api.screen(FilterContext::Members);
    choose(&mut screen, ids::ROLE, role.as_deref())?;
    search_for(&mut screen, &search)?;
    go_to(&mut screen, page);

    // Parse the role before anything is fetched
    let action = match action {
        Some(MemberAction::Role { role, rows }) => {
            let role: MemberRole = role.parse().map_err(SysmeticError::InvalidInput)?;
            Some((Some(role), rows))
        }
        Some(MemberAction::Delete { rows }) => Some((None, rows)),
        None => None,
    };

    ctx.api.members(&mut screen).await?;

    if let Some((role, rows)) = action {
        ctx.api.select(&mut screen, &rows)?;
        let result = match role {
            Some(role) => ctx.api.change_role(&mut screen, role).await?,
            None => ctx.api.delete_members(&mut screen).await?,
        };
        print_messages(&result.messages);
    }

    print_members(screen.rows());
    print_footer(screen.page(), screen.total_pages());
    Ok(())
}

async fn handle_notices(
    ctx: &mut AppContext,
    search: SearchArgs,
    page: PageArg,
    action: Option<NoticeAction>,
) -> Result<()> {
    let mut screen = ctx.api.screen(FilterContext::Notices);
    search_for(&mut screen, &search)?;
    go_to(&mut screen, page);
    ctx.api.notices(&mut screen).await?;

    if let Some(action) = action {
        let result = match action {
            NoticeAction::Toggle { row } => ctx.api.toggle_notice(&mut screen, &row).await?,
            NoticeAction::Delete { rows } => {
                ctx.api.select(&mut screen, &rows)?;
                ctx.api.delete_notices(&mut screen).await?
            }
        };
        print_messages(&result.messages);
    }

    print_notices(screen.rows());
    print_footer(screen.page(), screen.total_pages());
    Ok(())
}

async fn handle_inquiries(
    ctx: &mut AppContext,
    closed: Option<String>,
    search: SearchArgs,
    page: PageArg,
    action: Option<DeleteAction>,
) -> Result<()> {
    let mut screen = ctx.api.screen(FilterContext::Inquiries);
    choose(&mut screen, ids::CLOSED, closed.as_deref())?;
    search_for(&mut screen, &search)?;
    go_to(&mut screen, page);
    ctx.api.inquiries(&mut screen).await?;

    if let Some(DeleteAction::Delete { rows }) = action {
        ctx.api.select(&mut screen, &rows)?;
        let result = ctx.api.delete_inquiries(&mut screen).await?;
        print_messages(&result.messages);
    }

    print_inquiries(screen.rows());
    print_footer(screen.page(), screen.total_pages());
    Ok(())
}

async fn handle_mine(
    ctx: &mut AppContext,
    page: PageArg,
    action: Option<DeleteAction>,
) -> Result<()> {
    let mut screen = ctx.api.screen(FilterContext::MyStrategies);
    go_to(&mut screen, page);
    ctx.api.my_strategies(&mut screen).await?;

    if let Some(DeleteAction::Delete { rows }) = action {
        ctx.api.select(&mut screen, &rows)?;
        let result = ctx.api.delete_my_strategies(&mut screen).await?;
        print_messages(&result.messages);
    }

    print_strategies(screen.rows());
    print_footer(screen.page(), screen.total_pages());
    Ok(())
}

async fn handle_questions(
    ctx: &mut AppContext,
    status: &str,
    sort: &str,
    page: PageArg,
) -> Result<()> {
    let mut board = ctx.api.question_board();
    board.set_status(status)?;
    board.set_sort(sort.parse().map_err(SysmeticError::InvalidInput)?)?;

    ctx.api.questions(&mut board).await?;
    board.go_to_page(page.page.saturating_sub(1));

    print_questions(board.rows());
    print_footer(&board.page(), board.total_pages());
    Ok(())
}

fn handle_chart(file: &Path, period: &str, today: Option<&str>) -> Result<()> {
    let period: ChartPeriod = period.parse().map_err(SysmeticError::InvalidInput)?;
    let today = match today {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| SysmeticError::InvalidInput(format!("Invalid date '{}': {}", text, e)))?,
        None => Utc::now().date_naive(),
    };
    let content = std::fs::read_to_string(file)?;
    let series: DualSeries = serde_json::from_str(&content)?;
    print_series(&series.filtered(period, today));
    Ok(())
}

fn handle_config(key: Option<String>, value: Option<String>) -> Result<()> {
    let dir = config::data_dir()?;
    let mut config = SysmeticConfig::load(&dir)?;

    match (key, value) {
        (None, _) => {
            for key in config::KEYS {
                let value = config.get(key).unwrap_or_default();
                let shown = if key == "token" && !value.is_empty() {
                    "********".to_string()
                } else {
                    value
                };
                println!("{} = {}", key.bold(), shown);
            }
        }
        (Some(key), None) => {
            let value = config
                .get(&key)
                .ok_or_else(|| SysmeticError::Config(unknown_key(&key)))?;
            println!("{}", value);
        }
        (Some(key), Some(value)) => {
            if config.get(&key).is_none() {
                return Err(SysmeticError::Config(unknown_key(&key)));
            }
            config.set(&key, &value).map_err(SysmeticError::Config)?;
            config.save(&dir)?;
            println!("{}", format!("Set {} = {}", key, value).green());
        }
    }
    Ok(())
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key '{}' (known: {})",
        key,
        config::KEYS.join(", ")
    )
}
