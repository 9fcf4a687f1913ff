// 🔎 Transaction queries - caller-owned filter state + predicates
//
// The filter lives with the caller (the UI owns one), the ledger only
// evaluates it. Time windows are measured against the injected clock.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entities::{TransactionDirection, Wallet};

// ============================================================================
// FILTER FIELDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletSelector {
    #[default]
    All,
    Wallet(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionFilter {
    #[default]
    All,
    Expense,
    Income,
}

impl DirectionFilter {
    pub fn matches(&self, direction: TransactionDirection) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::Expense => direction == TransactionDirection::Expense,
            DirectionFilter::Income => direction == TransactionDirection::Income,
        }
    }

    pub fn next(&self) -> DirectionFilter {
        match self {
            DirectionFilter::All => DirectionFilter::Expense,
            DirectionFilter::Expense => DirectionFilter::Income,
            DirectionFilter::Income => DirectionFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DirectionFilter::All => "All",
            DirectionFilter::Expense => "Expense",
            DirectionFilter::Income => "Income",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "today")]
    Today,
    #[default]
    #[serde(rename = "last-7-days")]
    Last7Days,
    #[serde(rename = "last-30-days")]
    Last30Days,
    #[serde(rename = "all-time")]
    AllTime,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::Today,
        DateRange::Last7Days,
        DateRange::Last30Days,
        DateRange::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Last7Days => "last-7-days",
            DateRange::Last30Days => "last-30-days",
            DateRange::AllTime => "all-time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::Today => "Today",
            DateRange::Last7Days => "Last 7 days",
            DateRange::Last30Days => "30 days",
            DateRange::AllTime => "All time",
        }
    }

    pub fn next(&self) -> DateRange {
        match self {
            DateRange::Today => DateRange::Last7Days,
            DateRange::Last7Days => DateRange::Last30Days,
            DateRange::Last30Days => DateRange::AllTime,
            DateRange::AllTime => DateRange::Today,
        }
    }

    /// Does `ts` fall in this range as seen at `now`?
    pub fn contains(&self, ts: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
        match self {
            DateRange::AllTime => true,
            DateRange::Today => is_same_local_day(ts, now),
            DateRange::Last7Days => within_days(ts, now, 7),
            DateRange::Last30Days => within_days(ts, now, 30),
        }
    }
}

/// `0 <= now - ts <= days`; future-dated timestamps never match
pub fn within_days(ts: DateTime<FixedOffset>, now: DateTime<FixedOffset>, days: i64) -> bool {
    let diff = now.signed_duration_since(ts);
    diff >= Duration::zero() && diff <= Duration::days(days)
}

/// Calendar-day equality in `now`'s offset
pub fn is_same_local_day(ts: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
    ts.with_timezone(now.offset()).date_naive() == now.date_naive()
}

/// Same calendar month and year in `now`'s offset
pub fn is_same_local_month(ts: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
    use chrono::Datelike;
    let local = ts.with_timezone(now.offset());
    local.year() == now.year() && local.month() == now.month()
}

// ============================================================================
// TRANSACTION FILTER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub wallet: WalletSelector,
    pub direction: DirectionFilter,
    pub range: DateRange,
    /// Raw search text; trimmed and lower-cased at evaluation time
    pub search: String,
}

impl TransactionFilter {
    /// Everything, all time, no search
    pub fn all() -> Self {
        TransactionFilter {
            wallet: WalletSelector::All,
            direction: DirectionFilter::All,
            range: DateRange::AllTime,
            search: String::new(),
        }
    }

    pub fn with_wallet(mut self, wallet_id: &str) -> Self {
        self.wallet = WalletSelector::Wallet(wallet_id.to_string());
        self
    }

    pub fn with_direction(mut self, direction: DirectionFilter) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    /// Make a freshly created wallet the active selection
    pub fn focus_wallet(&mut self, wallet: &Wallet) {
        self.wallet = WalletSelector::Wallet(wallet.id.clone());
    }

    pub fn matches_wallet(&self, wallet_id: &str) -> bool {
        match &self.wallet {
            WalletSelector::All => true,
            WalletSelector::Wallet(id) => id == wallet_id,
        }
    }

    /// Search term normalised for matching, None when blank
    pub fn normalized_search(&self) -> Option<String> {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            None
        } else {
            Some(term)
        }
    }
}

/// Haystack used by free-text search: description, wallet name, parent
/// category name and subcategory name joined by spaces, lower-cased
pub fn search_haystack(
    description: &str,
    wallet_name: &str,
    category_name: &str,
    subcategory_name: &str,
) -> String {
    format!(
        "{} {} {} {}",
        description, wallet_name, category_name, subcategory_name
    )
    .to_lowercase()
}
