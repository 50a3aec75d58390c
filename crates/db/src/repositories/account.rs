//! Account and ledger repository.
//!
//! Account balances change only through ledger rows. Each row insert and its
//! balance increment commit together.

use flow_core::ledger::{opening_entry, posting, AccountType, Posting, TransactionType};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::DateRange;
use crate::entities::{account_transactions, accounts};
use crate::error::RepositoryError;

/// Description stored on the ledger row created for an opening balance.
pub const OPENING_BALANCE_DESCRIPTION: &str = "Opening balance";

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Display name.
    pub name: String,
    /// Account kind.
    pub account_type: AccountType,
    /// Opening balance, recorded as a CAPITAL ledger row.
    pub opening_balance: Decimal,
}

/// Input for updating an account. The balance is not editable.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Display name.
    pub name: Option<String>,
    /// Account kind.
    pub account_type: Option<AccountType>,
}

/// Input for recording a ledger row.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning account.
    pub account_id: Uuid,
    /// Row type; decides the balance sign.
    pub transaction_type: TransactionType,
    /// Positive amount.
    pub amount: Decimal,
    /// Free-text description.
    pub description: Option<String>,
    /// External reference (receipt, cheque number).
    pub reference: Option<String>,
    /// Related customer.
    pub customer_id: Option<Uuid>,
    /// Related vendor.
    pub vendor_id: Option<Uuid>,
}

/// Ledger listing filter. Empty fields match everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    /// Restrict to one account.
    pub account_id: Option<Uuid>,
    /// Restrict to one customer.
    pub customer_id: Option<Uuid>,
    /// Restrict to one vendor.
    pub vendor_id: Option<Uuid>,
    /// `created_at` window.
    pub range: DateRange,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists accounts by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<accounts::Model>, RepositoryError> {
        Ok(accounts::Entity::find()
            .order_by_asc(accounts::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, RepositoryError> {
        Ok(accounts::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Creates an account. A non-zero opening balance is posted as a CAPITAL
    /// ledger row in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `Ledger` for a negative opening balance, or a database error.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, RepositoryError> {
        let opening = opening_entry(input.opening_balance)?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().fixed_offset();

        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            account_type: Set(input.account_type.into()),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let account = match opening {
            Some(entry) => {
                let row = NewTransaction {
                    account_id: account.id,
                    transaction_type: entry.transaction_type,
                    amount: entry.amount,
                    description: Some(OPENING_BALANCE_DESCRIPTION.to_string()),
                    reference: None,
                    customer_id: None,
                    vendor_id: None,
                };
                post(&txn, &row, &entry).await?;
                accounts::Entity::find_by_id(account.id)
                    .one(&txn)
                    .await?
                    .ok_or(RepositoryError::not_found("Account", account.id))?
            }
            None => account,
        };

        txn.commit().await?;

        tracing::info!(
            account_id = %account.id,
            balance = %account.balance,
            "Account created"
        );

        Ok(account)
    }

    /// Updates an account's name or type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Account", id))?;

        let mut account: accounts::ActiveModel = existing.into();
        if let Some(name) = input.name {
            account.name = Set(name);
        }
        if let Some(account_type) = input.account_type {
            account.account_type = Set(account_type.into());
        }
        account.updated_at = Set(chrono::Utc::now().into());

        Ok(account.update(&self.db).await?)
    }

    /// Deletes an account together with its ledger rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<accounts::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Account", id))?;

        accounts::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(existing)
    }

    /// Records a ledger row and applies its signed amount to the account
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns `Ledger` for a non-positive amount, `NotFound` for an unknown
    /// account, or a database error (e.g. unknown customer or vendor).
    pub async fn create_transaction(
        &self,
        input: NewTransaction,
    ) -> Result<account_transactions::Model, RepositoryError> {
        let entry = posting(input.transaction_type, input.amount)?;

        let txn = self.db.begin().await?;
        let row = post(&txn, &input, &entry).await?;
        txn.commit().await?;

        tracing::info!(
            transaction_id = %row.id,
            account_id = %row.account_id,
            delta = %entry.delta,
            "Ledger transaction recorded"
        );

        Ok(row)
    }

    /// Lists ledger rows matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<account_transactions::Model>, RepositoryError> {
        let mut query = account_transactions::Entity::find()
            .filter(filter.range.condition(account_transactions::Column::CreatedAt));

        if let Some(account_id) = filter.account_id {
            query = query.filter(account_transactions::Column::AccountId.eq(account_id));
        }
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(account_transactions::Column::CustomerId.eq(customer_id));
        }
        if let Some(vendor_id) = filter.vendor_id {
            query = query.filter(account_transactions::Column::VendorId.eq(vendor_id));
        }

        Ok(query
            .order_by_desc(account_transactions::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Most recent ledger rows across all accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_transactions(
        &self,
        limit: u64,
    ) -> Result<Vec<account_transactions::Model>, RepositoryError> {
        Ok(account_transactions::Entity::find()
            .order_by_desc(account_transactions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?)
    }
}

/// Applies `entry.delta` to the account, then inserts the ledger row.
async fn post(
    txn: &DatabaseTransaction,
    input: &NewTransaction,
    entry: &Posting,
) -> Result<account_transactions::Model, RepositoryError> {
    let now = chrono::Utc::now().fixed_offset();

    let result = accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).add(entry.delta),
        )
        .col_expr(accounts::Column::UpdatedAt, Expr::value(now))
        .filter(accounts::Column::Id.eq(input.account_id))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(RepositoryError::not_found("Account", input.account_id));
    }

    Ok(account_transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(input.account_id),
        transaction_type: Set(entry.transaction_type.into()),
        amount: Set(entry.amount),
        description: Set(input.description.clone()),
        reference: Set(input.reference.clone()),
        customer_id: Set(input.customer_id),
        vendor_id: Set(input.vendor_id),
        created_at: Set(now),
    }
    .insert(txn)
    .await?)
}
