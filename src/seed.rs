// 🌱 Sample data - what a fresh ledger starts with
//
// Wallet balances already include the sample transactions; loading the
// seed never replays them.

use chrono::{DateTime, Duration, FixedOffset};

use crate::entities::{
    EventLogEntry, EventSource, EventStatus, Transaction, TransactionDirection, Wallet,
    WalletColor, WalletType,
};

pub struct SeedData {
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
    pub events: Vec<EventLogEntry>,
}

/// Seed anchored at `now` (wallet sync times are relative to it)
pub fn sample_data(now: DateTime<FixedOffset>) -> SeedData {
    SeedData {
        wallets: sample_wallets(now),
        transactions: sample_transactions(),
        events: sample_events(),
    }
}

fn sample_wallets(now: DateTime<FixedOffset>) -> Vec<Wallet> {
    vec![
        Wallet {
            id: "wallet-cash".to_string(),
            name: "Cash Wallet".to_string(),
            balance: 1_250_000,
            wallet_type: WalletType::Cash,
            color: WalletColor::Amber,
            last_synced_at: now - Duration::minutes(45),
        },
        Wallet {
            id: "wallet-bidv".to_string(),
            name: "BIDV Debit Card".to_string(),
            balance: 8_250_000,
            wallet_type: WalletType::Bank,
            color: WalletColor::Sky,
            last_synced_at: now - Duration::minutes(8),
        },
        Wallet {
            id: "wallet-momo".to_string(),
            name: "MoMo Wallet".to_string(),
            balance: 2_350_000,
            wallet_type: WalletType::EWallet,
            color: WalletColor::Rose,
            last_synced_at: now - Duration::minutes(3),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn tx(
    id: &str,
    wallet_id: &str,
    amount: i64,
    category_id: &str,
    subcategory_id: &str,
    direction: TransactionDirection,
    timestamp: &str,
    description: &str,
    location: Option<&str>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        wallet_id: wallet_id.to_string(),
        amount,
        category_id: category_id.to_string(),
        subcategory_id: Some(subcategory_id.to_string()),
        direction,
        timestamp: fixed(timestamp),
        description: description.to_string(),
        location: location.map(str::to_string),
    }
}

fn sample_transactions() -> Vec<Transaction> {
    use TransactionDirection::{Expense, Income};

    vec![
        tx(
            "tx-001",
            "wallet-bidv",
            420_000,
            "cat-living",
            "cat-living-electricity",
            Expense,
            "2024-06-18T08:15:00+07:00",
            "May electricity bill",
            Some(r#"{"lat":10.762622,"lng":106.660172}"#),
        ),
        tx(
            "tx-002",
            "wallet-momo",
            185_000,
            "cat-food",
            "cat-food-coffee",
            Expense,
            "2024-06-17T14:40:00+07:00",
            "Coffee with a partner",
            Some(r#"{"place":"District 1, HCMC"}"#),
        ),
        tx(
            "tx-003",
            "wallet-bidv",
            24_500_000,
            "cat-salary",
            "cat-salary-fixed",
            Income,
            "2024-06-15T09:10:00+07:00",
            "June salary",
            None,
        ),
        tx(
            "tx-004",
            "wallet-cash",
            95_000,
            "cat-food",
            "cat-food-groceries",
            Expense,
            "2024-06-16T11:30:00+07:00",
            "Fruit from the market",
            None,
        ),
        tx(
            "tx-005",
            "wallet-momo",
            1_250_000,
            "cat-investment",
            "cat-investment-interest",
            Income,
            "2024-06-10T07:00:00+07:00",
            "3-month term deposit interest",
            None,
        ),
        tx(
            "tx-006",
            "wallet-bidv",
            320_000,
            "cat-health",
            "cat-health-medicine",
            Expense,
            "2024-06-12T18:20:00+07:00",
            "Pharmacy run",
            None,
        ),
    ]
}

fn sample_events() -> Vec<EventLogEntry> {
    let event = |id: &str, title: &str, description: &str, source, time: &str, status| {
        EventLogEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            source,
            time: fixed(time),
            status,
        }
    };

    vec![
        event(
            "event-001",
            "transaction_added",
            "Recorded 420.000 ₫ electricity expense via the Transaction service",
            EventSource::TransactionService,
            "2024-06-18T08:15:12+07:00",
            EventStatus::Success,
        ),
        event(
            "event-002",
            "wallet_updated",
            "Updated BIDV Debit Card balance via gRPC UpdateBalance",
            EventSource::WalletService,
            "2024-06-18T08:15:12+07:00",
            EventStatus::Success,
        ),
        event(
            "event-003",
            "redis_cache_refresh",
            "Reloaded wallet balance cache from Redis after the transaction",
            EventSource::System,
            "2024-06-18T08:16:00+07:00",
            EventStatus::Info,
        ),
        event(
            "event-004",
            "category_sync",
            "Synced expense/income categories from the Category service",
            EventSource::CategoryService,
            "2024-06-17T21:00:00+07:00",
            EventStatus::Pending,
        ),
    ]
}

// Literals above are known-good RFC 3339; fall back to the epoch rather than panic
fn fixed(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap_or_default()
}
