use clap::{Args, Parser, Subcommand, ValueEnum};
use sysmetic::model::CatalogKind;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "sysmetic", bin_name = "sysmetic", version = get_version())]
#[command(about = "Browse and manage Sysmetic strategy marketplace lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (info-level logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Page to show, 1-based
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArg {
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogArg {
    Stocks,
    Methods,
}

impl From<CatalogArg> for CatalogKind {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Stocks => CatalogKind::Stock,
            CatalogArg::Methods => CatalogKind::Method,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the filter fields of a screen and their options
    #[command(display_order = 1)]
    Filters {
        /// Screen (conditions, algorithm, admin-strategies, members, notices, inquiries, questions)
        context: Option<String>,

        /// Fetch method and instrument options from the server first
        #[arg(long)]
        remote: bool,
    },

    /// Search strategies
    #[command(alias = "s", display_order = 2)]
    Strategies {
        /// Use the algorithm tab (EFFICIENCY, OFFENSIVE or DEFENSIVE)
        #[arg(long, conflicts_with_all = ["method", "cycle", "stock", "period", "range"])]
        algorithm: Option<String>,

        /// Trading method name (repeatable)
        #[arg(long)]
        method: Vec<String>,

        /// Cycle: D or P (repeatable)
        #[arg(long)]
        cycle: Vec<String>,

        /// Instrument name (repeatable)
        #[arg(long)]
        stock: Vec<String>,

        /// Operating period (ALL, LESS_THAN_YEAR, ONE_TO_TWO_YEAR, ...)
        #[arg(long)]
        period: Option<String>,

        /// Cumulative P/L rate bounds, between -100 and 100
        #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
        range: Option<Vec<String>>,

        #[command(flatten)]
        page: PageArg,
    },

    /// Admin: stock and trading-method tables
    #[command(display_order = 10)]
    Catalog {
        #[arg(value_enum)]
        kind: CatalogArg,

        #[command(flatten)]
        page: PageArg,

        #[command(subcommand)]
        action: Option<CatalogAction>,
    },

    /// Admin: strategy approval
    #[command(display_order = 11)]
    Review {
        /// PUBLIC or PRIVATE
        #[arg(long)]
        open: Option<String>,

        /// APPROVED, REJECTED, NOT_REQUESTED or REQUESTED
        #[arg(long)]
        approval: Option<String>,

        /// Strategy name contains
        #[arg(long)]
        keyword: Option<String>,

        #[command(flatten)]
        page: PageArg,

        #[command(subcommand)]
        action: Option<ReviewAction>,
    },

    /// Admin: members
    #[command(display_order = 12)]
    Members {
        /// ALL, USER, TRADER or MANAGER
        #[arg(long)]
        role: Option<String>,

        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        page: PageArg,

        #[command(subcommand)]
        action: Option<MemberAction>,
    },

    /// Admin: notices
    #[command(display_order = 13)]
    Notices {
        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        page: PageArg,

        #[command(subcommand)]
        action: Option<NoticeAction>,
    },

    /// Admin: inquiries
    #[command(display_order = 14)]
    Inquiries {
        /// ALL, CLOSED or OPEN
        #[arg(long)]
        closed: Option<String>,

        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        page: PageArg,

        #[command(subcommand)]
        action: Option<DeleteAction>,
    },

    /// Your strategies
    #[command(display_order = 20)]
    Mine {
        #[command(flatten)]
        page: PageArg,

        #[command(subcommand)]
        action: Option<DeleteAction>,
    },

    /// Your questions
    #[command(display_order = 21)]
    Questions {
        /// all, waiting or answered
        #[arg(long, default_value = "all")]
        status: String,

        /// date_desc, date_asc, strategyName_asc or strategyName_desc
        #[arg(long, default_value = "date_desc")]
        sort: String,

        #[command(flatten)]
        page: PageArg,
    },

    /// Cut a saved chart series (JSON) to a period
    #[command(display_order = 30)]
    Chart {
        /// JSON file with `primary` and `secondary` point lists
        file: std::path::PathBuf,

        /// 1M, 3M, 6M, 1Y or ALL
        #[arg(long, default_value = "ALL")]
        period: String,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },

    /// Get or set configuration
    #[command(display_order = 40)]
    Config {
        /// Configuration key (api_url, page_size, timeout_secs, token)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Field to search in
    #[arg(long = "search-type")]
    pub search_type: Option<String>,

    /// Search text
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CatalogAction {
    /// Add an item with its icon
    Add {
        name: String,
        #[arg(long)]
        icon: std::path::PathBuf,
    },

    /// Rename a row, optionally replacing its icon
    Edit {
        row: String,
        name: String,
        #[arg(long)]
        icon: Option<std::path::PathBuf>,
    },

    /// Delete rows (e.g. 1 3 5-7)
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        rows: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewAction {
    /// Approve rows
    Approve {
        #[arg(required = true, num_args = 1..)]
        rows: Vec<String>,
    },

    /// Reject one row with a reason
    Reject {
        row: String,
        #[arg(required = true, num_args = 1..)]
        reason: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemberAction {
    /// Change the role of rows
    Role {
        /// USER, TRADER or MANAGER
        role: String,
        #[arg(required = true, num_args = 1..)]
        rows: Vec<String>,
    },

    /// Delete rows
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        rows: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoticeAction {
    /// Flip a row between public and hidden
    Toggle { row: String },

    /// Delete rows
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        rows: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeleteAction {
    /// Delete rows
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        rows: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn range_takes_two_values_including_negatives() {
        let cli = Cli::try_parse_from(["sysmetic", "strategies", "--range", "-20", "50"]).unwrap();
        match cli.command {
            Commands::Strategies { range, page, .. } => {
                assert_eq!(range, Some(vec!["-20".to_string(), "50".to_string()]));
                assert_eq!(page.page, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn algorithm_conflicts_with_condition_filters() {
        assert!(Cli::try_parse_from([
            "sysmetic",
            "strategies",
            "--algorithm",
            "OFFENSIVE",
            "--cycle",
            "D"
        ])
        .is_err());
    }

    #[test]
    fn screen_actions_parse() {
        let cli = Cli::try_parse_from([
            "sysmetic", "review", "--approval", "REQUESTED", "reject", "2", "no", "data",
        ])
        .unwrap();
        match cli.command {
            Commands::Review {
                approval,
                action: Some(ReviewAction::Reject { row, reason }),
                ..
            } => {
                assert_eq!(approval.as_deref(), Some("REQUESTED"));
                assert_eq!(row, "2");
                assert_eq!(reason.join(" "), "no data");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
