// 📊 Statistics - derived totals, always exact integer sums

use serde::Serialize;

/// Headline numbers for the overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    /// Sum of every wallet balance
    pub total_balance: i64,
    /// Expense total within the last 7 days
    pub weekly_expense: i64,
    /// Income total within the last 7 days
    pub weekly_income: i64,
    /// Expense total in the current calendar month
    pub month_expense: i64,
}

impl LedgerStats {
    /// Income minus expense over the week
    pub fn weekly_net(&self) -> i64 {
        self.weekly_income - self.weekly_expense
    }
}

/// Per-wallet activity, used by the wallet list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSummary {
    pub wallet_id: String,
    pub wallet_name: String,
    pub balance: i64,
    pub transaction_count: usize,
    pub total_income: i64,
    pub total_expense: i64,
    /// Balance below zero
    pub overdrawn: bool,
}

impl WalletSummary {
    pub fn net_flow(&self) -> i64 {
        self.total_income - self.total_expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_net() {
        let stats = LedgerStats {
            total_balance: 0,
            weekly_expense: 420_000,
            weekly_income: 1_250_000,
            month_expense: 0,
        };
        assert_eq!(stats.weekly_net(), 830_000);
    }

    #[test]
    fn test_wallet_summary_net_flow() {
        let summary = WalletSummary {
            wallet_id: "wallet-bidv".to_string(),
            wallet_name: "BIDV Debit Card".to_string(),
            balance: 8_250_000,
            transaction_count: 3,
            total_income: 24_500_000,
            total_expense: 740_000,
            overdrawn: false,
        };
        assert_eq!(summary.net_flow(), 23_760_000);
    }
}
