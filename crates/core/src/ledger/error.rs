//! Ledger validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a ledger write is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Transaction amount is zero or negative.
    #[error("Transaction amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Opening balance is negative.
    #[error("Opening balance cannot be negative, got {0}")]
    NegativeOpeningBalance(Decimal),
}
