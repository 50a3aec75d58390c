//! Wire representations: IDs, money, timestamps and enums.
//!
//! Money is stored as `Decimal` and only becomes a GraphQL `Float` at this
//! boundary. Incoming floats are rounded to cents before any arithmetic.

use async_graphql::{Enum, ID};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use uuid::Uuid;

use flow_shared::AppError;

use super::error::to_graphql_error;

/// Decimal places kept for money inputs.
pub const MONEY_SCALE: u32 = 2;

/// Formats a UUID as a GraphQL ID.
pub fn to_id(id: Uuid) -> ID {
    ID(id.to_string())
}

/// Parses a GraphQL ID as a UUID.
pub fn parse_id(id: &ID) -> async_graphql::Result<Uuid> {
    Uuid::parse_str(id.as_str())
        .map_err(|_| to_graphql_error(AppError::Validation(format!("Invalid ID: {}", id.as_str()))))
}

/// Parses an optional GraphQL ID.
pub fn parse_opt_id(id: Option<&ID>) -> async_graphql::Result<Option<Uuid>> {
    id.map(parse_id).transpose()
}

/// Renders a stored amount as a GraphQL Float.
pub fn money(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Reads a GraphQL Float as an amount rounded to cents.
pub fn parse_money(value: f64) -> async_graphql::Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(MONEY_SCALE))
        .ok_or_else(|| to_graphql_error(AppError::Validation(format!("Invalid amount: {value}"))))
}

/// Reads an optional amount, defaulting to zero.
pub fn parse_money_or_zero(value: Option<f64>) -> async_graphql::Result<Decimal> {
    value.map_or(Ok(Decimal::ZERO), parse_money)
}

/// Normalizes a stored timestamp to UTC.
pub fn timestamp(at: DateTime<FixedOffset>) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

/// User role.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "Role", remote = "flow_core::auth::Role")]
pub enum RoleValue {
    /// Full access.
    Admin,
    /// Master data, purchasing and accounts.
    Manager,
    /// Sales and stock handling.
    Staff,
}

/// How a sale was settled.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "PaymentMode", remote = "flow_core::orders::PaymentMode")]
pub enum PaymentModeValue {
    /// Paid at the counter.
    Cash,
    /// Left owing on the customer account.
    Due,
}

/// Ledger row type.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "TransactionType", remote = "flow_core::ledger::TransactionType")]
pub enum TransactionTypeValue {
    /// Money in.
    Income,
    /// Money out.
    Expense,
    /// Owner investment.
    Capital,
    /// Borrowed funds.
    Loan,
}

/// Account kind.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "AccountType", remote = "flow_core::ledger::AccountType")]
pub enum AccountTypeValue {
    /// Cash drawer.
    Cash,
    /// Bank account.
    Bank,
    /// Owner capital.
    Capital,
    /// Loan account.
    Loan,
}
