//! # Domain Model
//!
//! Rows as the marketplace API returns them, plus the small closed enums the
//! screens filter on. Field names follow the API's camelCase JSON; optional
//! or late-added fields default so older servers still deserialize.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed string enum with `as_str`, `Display`, `FromStr` and
/// serde support using the wire spelling.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:tt),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!(
                        "Invalid {}: '{}' (expected one of: {})",
                        stringify!($name),
                        s,
                        $name::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
                    ))
            }
        }
    };
}

wire_enum!(
    /// Trading cycle: intraday or position.
    Cycle { Day => "D", Position => "P" }
);

wire_enum!(OpenStatus {
    Public => "PUBLIC",
    Private => "PRIVATE",
});

wire_enum!(ApprovalStatus {
    Approved => "APPROVED",
    Rejected => "REJECTED",
    NotRequested => "NOT_REQUESTED",
    Requested => "REQUESTED",
});

wire_enum!(MemberRole {
    User => "USER",
    Trader => "TRADER",
    Manager => "MANAGER",
    Admin => "ADMIN",
});

wire_enum!(
    /// Answer state of a question in "my questions".
    QuestionStatus { Waiting => "waiting", Answered => "answered" }
);

wire_enum!(
    /// The two admin-managed catalogs.
    CatalogKind { Stock => "stocks", Method => "methods" }
);

impl CatalogKind {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Stock => "stock",
            CatalogKind::Method => "trading method",
        }
    }
}

/// Instruments traded by a strategy, as parallel lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockList {
    #[serde(default)]
    pub stock_ids: Vec<i64>,
    #[serde(default)]
    pub stock_names: Vec<String>,
    #[serde(default)]
    pub stock_icon_path: Vec<String>,
}

/// A strategy card in search results and "my strategies".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySummary {
    pub strategy_id: i64,
    pub name: String,
    #[serde(default)]
    pub trader_id: i64,
    #[serde(default)]
    pub trader_nickname: String,
    #[serde(default)]
    pub method_id: i64,
    #[serde(default)]
    pub method_icon_path: String,
    #[serde(default)]
    pub stock_list: StockList,
    pub cycle: Cycle,
    #[serde(default)]
    pub mdd: f64,
    #[serde(default)]
    pub sm_score: f64,
    #[serde(default)]
    pub accumulated_profit_loss_rate: f64,
    #[serde(default)]
    pub follower_count: Option<u64>,
    #[serde(default)]
    pub ranking: Option<u32>,
}

/// A row of the admin strategy approval table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStrategyRow {
    pub strategy_id: i64,
    pub strategy_name: String,
    #[serde(default)]
    pub trader_name: String,
    pub open_status: OpenStatus,
    #[serde(default)]
    pub strategy_create_date: String,
    #[serde(default)]
    pub method_icon_path: String,
    #[serde(default)]
    pub stock_list: StockList,
    pub approval_status_code: ApprovalStatus,
}

/// A stock or trading method as listed in the admin catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRow {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub phone_number: String,
    pub role_code: MemberRole,
    #[serde(default)]
    pub birth: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeRow {
    pub notice_id: i64,
    pub notice_title: String,
    #[serde(default)]
    pub writer_nickname: String,
    #[serde(default)]
    pub write_date: String,
    #[serde(default)]
    pub hits: u64,
    #[serde(default)]
    pub file_exists: bool,
    pub is_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRow {
    pub inquiry_id: i64,
    pub inquiry_title: String,
    #[serde(default)]
    pub strategy_name: String,
    #[serde(default)]
    pub trader_nickname: String,
    #[serde(default)]
    pub inquirer_nickname: String,
    #[serde(default)]
    pub inquiry_registration_date: String,
    pub inquiry_status: String,
}

/// A question the current user asked about a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRow {
    pub question_name: String,
    pub strategy_name: String,
    /// `YYYY-MM-DD`, so lexical order is date order
    pub date: String,
    pub status: QuestionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedOption {
    pub id: i64,
    pub name: String,
}

/// Remote source for the method and instrument checkbox lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodAndStock {
    #[serde(default)]
    pub method_list: Vec<NamedOption>,
    #[serde(default)]
    pub stock_list: Vec<NamedOption>,
}
