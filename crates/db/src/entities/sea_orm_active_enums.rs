//! `SeaORM` active enums mirroring the Postgres enum types.

use flow_core::auth::Role;
use flow_core::ledger;
use flow_core::orders;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "MANAGER")]
    Manager,
    #[sea_orm(string_value = "STAFF")]
    Staff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_mode")]
pub enum PaymentMode {
    #[sea_orm(string_value = "CASH")]
    Cash,
    #[sea_orm(string_value = "DUE")]
    Due,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
pub enum TransactionType {
    #[sea_orm(string_value = "INCOME")]
    Income,
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    #[sea_orm(string_value = "CAPITAL")]
    Capital,
    #[sea_orm(string_value = "LOAN")]
    Loan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    #[sea_orm(string_value = "CASH")]
    Cash,
    #[sea_orm(string_value = "BANK")]
    Bank,
    #[sea_orm(string_value = "CAPITAL")]
    Capital,
    #[sea_orm(string_value = "LOAN")]
    Loan,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Manager => Self::Manager,
            Role::Staff => Self::Staff,
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Manager => Self::Manager,
            UserRole::Staff => Self::Staff,
        }
    }
}

impl From<orders::PaymentMode> for PaymentMode {
    fn from(mode: orders::PaymentMode) -> Self {
        match mode {
            orders::PaymentMode::Cash => Self::Cash,
            orders::PaymentMode::Due => Self::Due,
        }
    }
}

impl From<PaymentMode> for orders::PaymentMode {
    fn from(mode: PaymentMode) -> Self {
        match mode {
            PaymentMode::Cash => Self::Cash,
            PaymentMode::Due => Self::Due,
        }
    }
}

impl From<ledger::TransactionType> for TransactionType {
    fn from(ty: ledger::TransactionType) -> Self {
        match ty {
            ledger::TransactionType::Income => Self::Income,
            ledger::TransactionType::Expense => Self::Expense,
            ledger::TransactionType::Capital => Self::Capital,
            ledger::TransactionType::Loan => Self::Loan,
        }
    }
}

impl From<TransactionType> for ledger::TransactionType {
    fn from(ty: TransactionType) -> Self {
        match ty {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
            TransactionType::Capital => Self::Capital,
            TransactionType::Loan => Self::Loan,
        }
    }
}

impl From<ledger::AccountType> for AccountType {
    fn from(ty: ledger::AccountType) -> Self {
        match ty {
            ledger::AccountType::Cash => Self::Cash,
            ledger::AccountType::Bank => Self::Bank,
            ledger::AccountType::Capital => Self::Capital,
            ledger::AccountType::Loan => Self::Loan,
        }
    }
}

impl From<AccountType> for ledger::AccountType {
    fn from(ty: AccountType) -> Self {
        match ty {
            AccountType::Cash => Self::Cash,
            AccountType::Bank => Self::Bank,
            AccountType::Capital => Self::Capital,
            AccountType::Loan => Self::Loan,
        }
    }
}
