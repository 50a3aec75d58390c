//! Account ledger rules.
//!
//! Ledger rows are immutable. Each row's type fixes the sign of its effect on
//! the owning account balance:
//! - INCOME, CAPITAL, LOAN add the amount
//! - EXPENSE subtracts it

pub mod balance;
pub mod error;
pub mod types;

#[cfg(test)]
mod balance_props;

pub use balance::{opening_entry, posting, Posting};
pub use error::LedgerError;
pub use types::{AccountType, TransactionType};
