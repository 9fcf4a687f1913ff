// ⚠️ Ledger errors
// Every rejection is a validation failure: a kind plus a readable message.

use thiserror::Error;

/// Coarse classification of a [`LedgerError`], handy for matching in UI code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAmount,
    EmptyDescription,
    WalletRequired,
    InvalidCategory,
    InvalidLocation,
    InvalidSubcategory,
    DirectionMismatch,
    WalletNotFound,
    NameRequired,
    InvalidBalance,
    BalanceOverflow,
    InvalidTaxonomy,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount missing, not a whole number, or not strictly positive
    #[error("invalid amount: {0:?} must be a whole number greater than 0")]
    InvalidAmount(String),

    #[error("empty description: a transaction needs a note")]
    EmptyDescription,

    #[error("wallet required: choose the wallet for this transaction")]
    WalletRequired,

    #[error("invalid category: {0:?}")]
    InvalidCategory(String),

    /// Location text was provided but is not valid JSON
    #[error("invalid location: must be valid JSON (e.g. {{\"lat\":10.76}}): {reason}")]
    InvalidLocation { reason: String },

    #[error("invalid subcategory: {subcategory:?} does not belong to {category:?}")]
    InvalidSubcategory { category: String, subcategory: String },

    #[error("direction mismatch: category {category:?} is {expected}, transaction is {actual}")]
    DirectionMismatch {
        category: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("wallet not found: {0:?}")]
    WalletNotFound(String),

    #[error("name required: wallet name cannot be empty")]
    NameRequired,

    /// Balance missing, unparseable or negative ("0" is fine)
    #[error("invalid balance: {0:?} must be a whole number of at least 0")]
    InvalidBalance(String),

    #[error("balance overflow on wallet {0:?}")]
    BalanceOverflow(String),

    /// The category tree itself is inconsistent, or does not cover
    /// transactions already in the ledger
    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            LedgerError::EmptyDescription => ErrorKind::EmptyDescription,
            LedgerError::WalletRequired => ErrorKind::WalletRequired,
            LedgerError::InvalidCategory(_) => ErrorKind::InvalidCategory,
            LedgerError::InvalidLocation { .. } => ErrorKind::InvalidLocation,
            LedgerError::InvalidSubcategory { .. } => ErrorKind::InvalidSubcategory,
            LedgerError::DirectionMismatch { .. } => ErrorKind::DirectionMismatch,
            LedgerError::WalletNotFound(_) => ErrorKind::WalletNotFound,
            LedgerError::NameRequired => ErrorKind::NameRequired,
            LedgerError::InvalidBalance(_) => ErrorKind::InvalidBalance,
            LedgerError::BalanceOverflow(_) => ErrorKind::BalanceOverflow,
            LedgerError::InvalidTaxonomy(_) => ErrorKind::InvalidTaxonomy,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            LedgerError::InvalidAmount("abc".to_string()).kind(),
            ErrorKind::InvalidAmount
        );
        assert_eq!(LedgerError::NameRequired.kind(), ErrorKind::NameRequired);
        assert_eq!(
            LedgerError::InvalidLocation { reason: "eof".to_string() }.kind(),
            ErrorKind::InvalidLocation
        );
    }

    #[test]
    fn test_messages_start_with_kind_label() {
        let msg = LedgerError::EmptyDescription.to_string();
        assert!(msg.starts_with("empty description"));

        let msg = LedgerError::InvalidBalance("-5".to_string()).to_string();
        assert!(msg.starts_with("invalid balance"));
        assert!(msg.contains("-5"));
    }
}
