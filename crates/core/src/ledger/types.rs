//! Ledger enums.

use serde::{Deserialize, Serialize};

/// Kind of ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
    /// Owner capital paid in.
    Capital,
    /// Borrowed funds received.
    Loan,
}

impl TransactionType {
    /// Whether this type adds to the account balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        !matches!(self, Self::Expense)
    }
}

/// Kind of money account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Cash drawer or petty cash.
    Cash,
    /// Bank account.
    Bank,
    /// Owner capital.
    Capital,
    /// Loan account.
    Loan,
}
