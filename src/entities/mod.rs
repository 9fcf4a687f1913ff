// Entity Models
//
// Each entity has:
// - Stable identity (string id) that NEVER changes
// - Plain serde-friendly values
// - Categories additionally live in an immutable registry for lookups

pub mod wallet;
pub mod category;
pub mod transaction;
pub mod event_log;

pub use wallet::{color_for_index, Wallet, WalletColor, WalletType, WALLET_COLOR_POOL};
pub use category::{default_categories, Category, CategoryRegistry, Subcategory};
pub use transaction::{Transaction, TransactionDirection};
pub use event_log::{
    EventLog, EventLogEntry, EventSource, EventStatus, DEFAULT_EVENT_LOG_CAPACITY,
};
