//! Signed balance deltas for ledger rows.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::TransactionType;

/// A validated ledger row amount and the delta it applies to its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Row type.
    pub transaction_type: TransactionType,
    /// Amount as stored on the row (always positive).
    pub amount: Decimal,
    /// Signed change to the account balance.
    pub delta: Decimal,
}

/// Validates `amount` and derives the balance delta for a ledger row.
///
/// # Errors
///
/// Returns `LedgerError::NonPositiveAmount` when `amount <= 0`.
pub fn posting(transaction_type: TransactionType, amount: Decimal) -> Result<Posting, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(amount));
    }

    let delta = if transaction_type.is_credit() {
        amount
    } else {
        -amount
    };

    Ok(Posting {
        transaction_type,
        amount,
        delta,
    })
}

/// Ledger row recording an account's opening balance.
///
/// A zero balance needs no row and yields `Ok(None)`.
///
/// # Errors
///
/// Returns `LedgerError::NegativeOpeningBalance` when `balance < 0`.
pub fn opening_entry(balance: Decimal) -> Result<Option<Posting>, LedgerError> {
    if balance < Decimal::ZERO {
        return Err(LedgerError::NegativeOpeningBalance(balance));
    }
    if balance.is_zero() {
        return Ok(None);
    }
    posting(TransactionType::Capital, balance).map(Some)
}
