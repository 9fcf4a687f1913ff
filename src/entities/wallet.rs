// 💳 Wallet Entity - A named balance bucket
//
// "Wallet name is a VALUE, wallet id is IDENTITY"
//
// - Balance is an integer in the smallest currency unit (no float drift)
// - Balance only moves when a transaction is recorded against the wallet
// - last_synced_at follows the timestamp of the latest recorded transaction

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::transaction::TransactionDirection;

// ============================================================================
// WALLET TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletType {
    /// Physical cash
    Cash,

    /// Bank account or debit card
    Bank,

    /// E-wallet (MoMo, ZaloPay, ...)
    #[serde(rename = "E-Wallet")]
    EWallet,

    /// Brokerage or savings product
    Investment,
}

impl WalletType {
    pub const ALL: [WalletType; 4] = [
        WalletType::Cash,
        WalletType::Bank,
        WalletType::EWallet,
        WalletType::Investment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::Cash => "Cash",
            WalletType::Bank => "Bank",
            WalletType::EWallet => "E-Wallet",
            WalletType::Investment => "Investment",
        }
    }

    /// Next type in declaration order, wrapping around (used by form pickers)
    pub fn next(&self) -> WalletType {
        match self {
            WalletType::Cash => WalletType::Bank,
            WalletType::Bank => WalletType::EWallet,
            WalletType::EWallet => WalletType::Investment,
            WalletType::Investment => WalletType::Cash,
        }
    }
}

// ============================================================================
// WALLET COLOR
// ============================================================================

/// Display color token; the front-end decides what it looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletColor {
    Amber,
    Sky,
    Violet,
    Emerald,
    Rose,
    Cyan,
    Lime,
}

impl WalletColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletColor::Amber => "amber",
            WalletColor::Sky => "sky",
            WalletColor::Violet => "violet",
            WalletColor::Emerald => "emerald",
            WalletColor::Rose => "rose",
            WalletColor::Cyan => "cyan",
            WalletColor::Lime => "lime",
        }
    }
}

/// Colors handed out to newly created wallets, round-robin
pub const WALLET_COLOR_POOL: [WalletColor; 6] = [
    WalletColor::Sky,
    WalletColor::Violet,
    WalletColor::Emerald,
    WalletColor::Rose,
    WalletColor::Cyan,
    WalletColor::Lime,
];

/// Color for the next wallet given how many wallets already exist
pub fn color_for_index(existing_wallets: usize) -> WalletColor {
    WALLET_COLOR_POOL[existing_wallets % WALLET_COLOR_POOL.len()]
}

// ============================================================================
// WALLET ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Stable identity, e.g. "wallet-bidv" or "wallet-<uuid>"
    pub id: String,

    /// Display name (e.g., "BIDV Debit Card")
    pub name: String,

    /// Current balance in the smallest currency unit
    pub balance: i64,

    pub wallet_type: WalletType,

    pub color: WalletColor,

    /// When the balance last changed (or the wallet was created)
    pub last_synced_at: DateTime<FixedOffset>,
}

impl Wallet {
    /// Create a wallet with a freshly generated id
    pub fn new(
        name: String,
        balance: i64,
        wallet_type: WalletType,
        color: WalletColor,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Wallet {
            id: format!("wallet-{}", uuid::Uuid::new_v4()),
            name,
            balance,
            wallet_type,
            color,
            last_synced_at: now,
        }
    }

    /// Balance after applying `amount` in `direction`, or None on overflow.
    /// Does not mutate; the store commits only once every check has passed.
    pub fn balance_after(&self, direction: TransactionDirection, amount: i64) -> Option<i64> {
        match direction {
            TransactionDirection::Expense => self.balance.checked_sub(amount),
            TransactionDirection::Income => self.balance.checked_add(amount),
        }
    }

    /// Check if wallet is overdrawn (negative balance)
    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-06-18T09:00:00+07:00").unwrap()
    }

    #[test]
    fn test_wallet_creation() {
        let wallet = Wallet::new(
            "Travel Fund".to_string(),
            0,
            WalletType::Investment,
            WalletColor::Lime,
            now(),
        );

        assert!(wallet.id.starts_with("wallet-"));
        assert_eq!(wallet.name, "Travel Fund");
        assert_eq!(wallet.balance, 0);
        assert_eq!(wallet.last_synced_at, now());
        assert!(!wallet.is_overdrawn());
    }

    #[test]
    fn test_wallet_ids_are_unique() {
        let a = Wallet::new("A".to_string(), 1, WalletType::Cash, WalletColor::Sky, now());
        let b = Wallet::new("A".to_string(), 1, WalletType::Cash, WalletColor::Sky, now());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_balance_after() {
        let wallet = Wallet::new("A".to_string(), 8_250_000, WalletType::Bank, WalletColor::Sky, now());

        assert_eq!(wallet.balance_after(TransactionDirection::Expense, 420_000), Some(7_830_000));
        assert_eq!(wallet.balance_after(TransactionDirection::Income, 420_000), Some(8_670_000));
        // balance_after never mutates
        assert_eq!(wallet.balance, 8_250_000);
    }

    #[test]
    fn test_balance_after_overflow() {
        let mut wallet = Wallet::new("A".to_string(), 0, WalletType::Bank, WalletColor::Sky, now());
        wallet.balance = i64::MAX;
        assert_eq!(wallet.balance_after(TransactionDirection::Income, 1), None);
    }

    #[test]
    fn test_color_pool_round_robin() {
        assert_eq!(color_for_index(0), WalletColor::Sky);
        assert_eq!(color_for_index(3), WalletColor::Rose);
        assert_eq!(color_for_index(6), WalletColor::Sky);
        assert_eq!(color_for_index(7), WalletColor::Violet);
    }

    #[test]
    fn test_wallet_type_serde_spelling() {
        let json = serde_json::to_string(&WalletType::EWallet).unwrap();
        assert_eq!(json, "\"E-Wallet\"");

        let back: WalletType = serde_json::from_str("\"E-Wallet\"").unwrap();
        assert_eq!(back, WalletType::EWallet);
        assert_eq!(WalletType::EWallet.as_str(), "E-Wallet");
    }

    #[test]
    fn test_wallet_type_next_cycles() {
        let mut t = WalletType::Cash;
        for _ in 0..WalletType::ALL.len() {
            t = t.next();
        }
        assert_eq!(t, WalletType::Cash);
    }
}
