// 📒 Ledger State Store
//
// Owns wallets, transactions and the event log. Two mutations
// (record_transaction, create_wallet), two derived queries
// (query_transactions, compute_statistics).
//
// Every mutation validates the whole input against the current state first
// and only then writes, so a rejected call leaves everything untouched.

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::entities::{
    color_for_index, CategoryRegistry, EventLog, EventLogEntry, EventSource, EventStatus,
    Transaction, TransactionDirection, Wallet, WalletType, DEFAULT_EVENT_LOG_CAPACITY,
};
use crate::error::{LedgerError, LedgerResult};
use crate::format::format_currency;
use crate::query::{is_same_local_month, search_haystack, within_days, TransactionFilter};
use crate::seed::SeedData;
use crate::stats::{LedgerStats, WalletSummary};

// ============================================================================
// INPUTS
// ============================================================================

/// Raw form values for a new transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTransactionInput {
    /// None (or blank) means no wallet was chosen
    pub wallet_id: Option<String>,
    /// Text as typed; must be a whole number > 0
    pub amount: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub direction: TransactionDirection,
    pub timestamp: DateTime<FixedOffset>,
    pub description: String,
    /// None or "" is absent; any other text must be JSON
    pub location: Option<String>,
}

/// Raw form values for a new wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWalletInput {
    pub name: String,
    /// Text as typed; "0" is valid, "" is not
    pub balance: String,
    pub wallet_type: WalletType,
}

/// Parse a whole number, ignoring any whitespace ("1 250 000" is fine)
pub fn parse_whole_amount(raw: &str) -> Option<i64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    compact.parse::<i64>().ok()
}

// ============================================================================
// LEDGER
// ============================================================================

pub struct Ledger<C: Clock = SystemClock> {
    wallets: Vec<Wallet>,
    /// Newest recorded first; query order comes from timestamps, not this
    transactions: Vec<Transaction>,
    events: EventLog,
    categories: CategoryRegistry,
    clock: C,
}

impl Ledger<SystemClock> {
    /// Empty ledger on the system clock with the default taxonomy
    pub fn new() -> Self {
        Ledger::with_clock(SystemClock)
    }
}

impl Default for Ledger<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Ledger<C> {
    pub fn with_clock(clock: C) -> Self {
        Ledger {
            wallets: Vec::new(),
            transactions: Vec::new(),
            events: EventLog::with_capacity(DEFAULT_EVENT_LOG_CAPACITY),
            categories: CategoryRegistry::with_defaults(),
            clock,
        }
    }

    /// Replace the taxonomy. Every transaction already held (e.g. seeded)
    /// must still resolve to a category and, if set, one of its children.
    pub fn with_categories(mut self, categories: CategoryRegistry) -> LedgerResult<Self> {
        for tx in &self.transactions {
            let category = categories.find_by_id(&tx.category_id).ok_or_else(|| {
                LedgerError::InvalidTaxonomy(format!(
                    "transaction {} uses unknown category {}",
                    tx.id, tx.category_id
                ))
            })?;
            if let Some(sub) = tx.subcategory_id.as_deref() {
                if category.child(sub).is_none() {
                    return Err(LedgerError::InvalidTaxonomy(format!(
                        "transaction {} uses subcategory {} outside {}",
                        tx.id, sub, category.id
                    )));
                }
            }
        }

        self.categories = categories;
        Ok(self)
    }

    /// Change the event log cap, keeping the newest entries
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        let mut events = EventLog::with_capacity(capacity);
        events.extend_front(self.events.iter().cloned().collect());
        self.events = events;
        self
    }

    /// Load seed data as-is (balances are taken verbatim)
    pub fn with_seed(mut self, seed: SeedData) -> Self {
        self.wallets = seed.wallets;
        self.transactions = seed.transactions;
        self.events.extend_front(seed.events);
        info!(
            wallets = self.wallets.len(),
            transactions = self.transactions.len(),
            "Ledger seeded"
        );
        self
    }

    // ========================================================================
    // READ ACCESS
    // ========================================================================

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn wallet(&self, id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    /// Stored order (newest recorded first)
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// "Parent › Child" label for a transaction
    pub fn category_path(&self, tx: &Transaction) -> String {
        self.categories
            .path_label(&tx.category_id, tx.subcategory_id.as_deref())
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Validate and record a transaction, moving the wallet balance.
    ///
    /// Check order: amount, description, wallet chosen, category, location,
    /// subcategory, direction, wallet exists, balance overflow.
    pub fn record_transaction(&mut self, input: RecordTransactionInput) -> LedgerResult<&Transaction> {
        let (transaction, wallet_index, new_balance) = match self.validate_transaction(input) {
            Ok(validated) => validated,
            Err(err) => {
                warn!(kind = ?err.kind(), "Transaction rejected: {}", err);
                return Err(err);
            }
        };

        // Commit: nothing below can fail
        let wallet = &mut self.wallets[wallet_index];
        wallet.balance = new_balance;
        wallet.last_synced_at = transaction.timestamp;
        let wallet_name = wallet.name.clone();

        let verb = match transaction.direction {
            TransactionDirection::Expense => "Expense",
            TransactionDirection::Income => "Income",
        };
        let time = transaction.timestamp;
        let summary = format!(
            "{} {} • {} • {}",
            verb,
            format_currency(transaction.amount),
            wallet_name,
            self.category_path(&transaction)
        );
        self.events.extend_front(vec![
            EventLogEntry::new(
                "transaction_added",
                summary,
                EventSource::TransactionService,
                time,
                EventStatus::Success,
            ),
            EventLogEntry::new(
                "wallet_updated",
                format!("Updated balance of {} via gRPC UpdateBalance", wallet_name),
                EventSource::WalletService,
                time,
                EventStatus::Success,
            ),
            EventLogEntry::new(
                "audit_log_inserted",
                "Transaction written to the Audit Log table".to_string(),
                EventSource::System,
                time,
                EventStatus::Info,
            ),
        ]);

        info!(
            tx_id = %transaction.id,
            wallet = %transaction.wallet_id,
            amount = transaction.amount,
            direction = transaction.direction.as_str(),
            new_balance,
            "Transaction recorded"
        );

        self.transactions.insert(0, transaction);
        Ok(&self.transactions[0])
    }

    fn validate_transaction(
        &self,
        input: RecordTransactionInput,
    ) -> LedgerResult<(Transaction, usize, i64)> {
        let amount = parse_whole_amount(&input.amount)
            .filter(|&a| a > 0)
            .ok_or_else(|| LedgerError::InvalidAmount(input.amount.clone()))?;

        let description = input.description.trim();
        if description.is_empty() {
            return Err(LedgerError::EmptyDescription);
        }

        let wallet_id = input
            .wallet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(LedgerError::WalletRequired)?;

        let category_id = input.category_id.trim();
        let category = match category_id {
            "" => None,
            id => self.categories.find_by_id(id),
        }
        .ok_or_else(|| LedgerError::InvalidCategory(input.category_id.clone()))?;

        // Only None or "" mean "no location"; any other text must parse
        let location = match input.location.as_deref() {
            None | Some("") => None,
            Some(raw) => {
                serde_json::from_str::<serde_json::Value>(raw).map_err(|e| {
                    LedgerError::InvalidLocation {
                        reason: e.to_string(),
                    }
                })?;
                Some(raw.trim())
            }
        };

        let subcategory_id = input
            .subcategory_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());
        if let Some(sub) = subcategory_id {
            if category.child(sub).is_none() {
                return Err(LedgerError::InvalidSubcategory {
                    category: category.id.clone(),
                    subcategory: sub.to_string(),
                });
            }
        }

        if category.direction != input.direction {
            return Err(LedgerError::DirectionMismatch {
                category: category.id.clone(),
                expected: category.direction.as_str(),
                actual: input.direction.as_str(),
            });
        }

        let wallet_index = self
            .wallets
            .iter()
            .position(|w| w.id == wallet_id)
            .ok_or_else(|| LedgerError::WalletNotFound(wallet_id.to_string()))?;

        let new_balance = self.wallets[wallet_index]
            .balance_after(input.direction, amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(wallet_id.to_string()))?;

        let transaction = Transaction {
            id: format!("tx-{}", uuid::Uuid::new_v4()),
            wallet_id: wallet_id.to_string(),
            amount,
            category_id: category.id.clone(),
            subcategory_id: subcategory_id.map(str::to_string),
            direction: input.direction,
            timestamp: input.timestamp,
            description: description.to_string(),
            location: location.map(str::to_string),
        };

        Ok((transaction, wallet_index, new_balance))
    }

    /// Validate and create a wallet. The caller decides whether to make it
    /// the active selection (see `TransactionFilter::focus_wallet`).
    pub fn create_wallet(&mut self, input: CreateWalletInput) -> LedgerResult<&Wallet> {
        let name = input.name.trim();
        if name.is_empty() {
            warn!("Wallet rejected: empty name");
            return Err(LedgerError::NameRequired);
        }

        let balance = match parse_whole_amount(&input.balance).filter(|&b| b >= 0) {
            Some(balance) => balance,
            None => {
                let err = LedgerError::InvalidBalance(input.balance.clone());
                warn!(kind = ?err.kind(), "Wallet rejected: {}", err);
                return Err(err);
            }
        };

        let now = self.clock.now();
        let wallet = Wallet::new(
            name.to_string(),
            balance,
            input.wallet_type,
            color_for_index(self.wallets.len()),
            now,
        );

        self.events.push(EventLogEntry::new(
            "wallet_created",
            format!(
                "Created wallet {} with balance {}",
                wallet.name,
                format_currency(balance)
            ),
            EventSource::WalletService,
            now,
            EventStatus::Info,
        ));

        info!(
            wallet_id = %wallet.id,
            wallet_type = wallet.wallet_type.as_str(),
            balance,
            "Wallet created"
        );

        self.wallets.insert(0, wallet);
        Ok(&self.wallets[0])
    }

    // ========================================================================
    // DERIVED QUERIES
    // ========================================================================

    /// Transactions matching every active filter, newest first.
    /// Equal timestamps keep stored order.
    pub fn query_transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        let now = self.clock.now();
        let search = filter.normalized_search();

        let mut matches: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|tx| filter.matches_wallet(&tx.wallet_id))
            .filter(|tx| filter.direction.matches(tx.direction))
            .filter(|tx| filter.range.contains(tx.timestamp, now))
            .filter(|tx| match &search {
                Some(term) => self.haystack(tx).contains(term.as_str()),
                None => true,
            })
            .collect();

        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        debug!(
            range = filter.range.as_str(),
            results = matches.len(),
            "Transactions queried"
        );
        matches
    }

    fn haystack(&self, tx: &Transaction) -> String {
        let wallet_name = self.wallet(&tx.wallet_id).map(|w| w.name.as_str()).unwrap_or("");
        let category_name = self
            .categories
            .find_by_id(&tx.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("");
        let subcategory_name = tx
            .subcategory_id
            .as_deref()
            .and_then(|id| self.categories.find_subcategory(id))
            .map(|(_, child)| child.name.as_str())
            .unwrap_or("");

        search_haystack(&tx.description, wallet_name, category_name, subcategory_name)
    }

    /// Headline totals as of the clock's now
    pub fn compute_statistics(&self) -> LedgerStats {
        let now = self.clock.now();
        let mut stats = LedgerStats {
            total_balance: self.wallets.iter().map(|w| w.balance).sum(),
            ..LedgerStats::default()
        };

        for tx in &self.transactions {
            if within_days(tx.timestamp, now, 7) {
                match tx.direction {
                    TransactionDirection::Expense => stats.weekly_expense += tx.amount,
                    TransactionDirection::Income => stats.weekly_income += tx.amount,
                }
            }
            if tx.is_expense() && is_same_local_month(tx.timestamp, now) {
                stats.month_expense += tx.amount;
            }
        }

        stats
    }

    /// Count and flow per wallet, in wallet order
    pub fn wallet_summaries(&self) -> Vec<WalletSummary> {
        self.wallets
            .iter()
            .map(|wallet| {
                let mut summary = WalletSummary {
                    wallet_id: wallet.id.clone(),
                    wallet_name: wallet.name.clone(),
                    balance: wallet.balance,
                    transaction_count: 0,
                    total_income: 0,
                    total_expense: 0,
                    overdrawn: wallet.is_overdrawn(),
                };
                for tx in self.transactions.iter().filter(|tx| tx.wallet_id == wallet.id) {
                    summary.transaction_count += 1;
                    match tx.direction {
                        TransactionDirection::Expense => summary.total_expense += tx.amount,
                        TransactionDirection::Income => summary.total_income += tx.amount,
                    }
                }
                summary
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
