// Pocket Ledger - Core Library
// In-memory wallet/transaction store used by the TUI, the summary command and tests

pub mod clock;
pub mod config;
pub mod entities;
pub mod error;
pub mod format;
pub mod ledger;
pub mod query;
pub mod seed;
pub mod stats;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LedgerConfig;
pub use entities::{
    Category, CategoryRegistry, Subcategory,
    EventLog, EventLogEntry, EventSource, EventStatus,
    Transaction, TransactionDirection,
    Wallet, WalletColor, WalletType,
};
pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use ledger::{CreateWalletInput, Ledger, RecordTransactionInput};
pub use query::{DateRange, DirectionFilter, TransactionFilter, WalletSelector};
pub use stats::{LedgerStats, WalletSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ledger built from config: seeded or empty, with the configured log cap
pub fn ledger_from_config<C: Clock>(config: &LedgerConfig, clock: C) -> Ledger<C> {
    let now = clock.now();
    let ledger = Ledger::with_clock(clock).with_event_capacity(config.event_log_capacity);
    if config.seed_sample_data {
        ledger.with_seed(seed::sample_data(now))
    } else {
        ledger
    }
}
