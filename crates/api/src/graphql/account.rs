//! Accounts and the ledger.

use async_graphql::{Context, ID, InputObject, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_core::ledger::{AccountType, TransactionType};
use flow_db::entities::{account_transactions, accounts};
use flow_db::repositories::{
    CreateAccountInput as NewAccount, DateRange, NewTransaction, TransactionFilter,
    UpdateAccountInput as AccountChanges,
};
use flow_db::{AccountRepository, CustomerRepository, VendorRepository};

use super::customer::Customer;
use super::error::GraphqlResultExt;
use super::scalars::{
    AccountTypeValue, TransactionTypeValue, money, parse_id, parse_money, parse_money_or_zero,
    parse_opt_id, timestamp, to_id,
};
use super::vendor::Vendor;
use super::{db, found, guard};

/// A cash, bank, capital or loan account.
pub struct Account(pub accounts::Model);

#[Object]
impl Account {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    #[graphql(name = "type")]
    async fn account_type(&self) -> AccountTypeValue {
        AccountType::from(self.0.account_type).into()
    }

    /// Sum of the account's signed ledger rows.
    async fn balance(&self) -> f64 {
        money(self.0.balance)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        timestamp(self.0.updated_at)
    }

    /// Ledger rows, newest first.
    async fn transactions(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Transaction>> {
        let filter = TransactionFilter {
            account_id: Some(self.0.id),
            ..TransactionFilter::default()
        };
        let rows = AccountRepository::new(db(ctx)?)
            .list_transactions(filter)
            .await
            .gql()?;
        Ok(rows.into_iter().map(Transaction).collect())
    }
}

/// One immutable ledger row.
pub struct Transaction(pub account_transactions::Model);

#[Object]
impl Transaction {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn account(&self, ctx: &Context<'_>) -> async_graphql::Result<Account> {
        let account = AccountRepository::new(db(ctx)?)
            .find_by_id(self.0.account_id)
            .await
            .gql()?;
        found(account, "Account").map(Account)
    }

    #[graphql(name = "type")]
    async fn transaction_type(&self) -> TransactionTypeValue {
        TransactionType::from(self.0.transaction_type).into()
    }

    /// Always positive; the type decides the direction.
    async fn amount(&self) -> f64 {
        money(self.0.amount)
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn reference(&self) -> Option<&str> {
        self.0.reference.as_deref()
    }

    async fn customer(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Customer>> {
        let Some(customer_id) = self.0.customer_id else {
            return Ok(None);
        };
        let customer = CustomerRepository::new(db(ctx)?)
            .find_by_id(customer_id)
            .await
            .gql()?;
        Ok(customer.map(Customer))
    }

    async fn vendor(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vendor>> {
        let Some(vendor_id) = self.0.vendor_id else {
            return Ok(None);
        };
        let vendor = VendorRepository::new(db(ctx)?)
            .find_by_id(vendor_id)
            .await
            .gql()?;
        Ok(vendor.map(Vendor))
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }
}

/// New account fields.
#[derive(InputObject)]
pub struct CreateAccountInput {
    /// Display name.
    pub name: String,
    /// Account kind.
    #[graphql(name = "type")]
    pub account_type: AccountTypeValue,
    /// Opening balance, posted as a CAPITAL row. 0 when omitted.
    pub balance: Option<f64>,
}

/// Account changes. The balance moves only through transactions.
#[derive(InputObject)]
pub struct UpdateAccountInput {
    /// New name.
    pub name: Option<String>,
    /// New kind.
    #[graphql(name = "type")]
    pub account_type: Option<AccountTypeValue>,
}

/// New ledger row.
#[derive(InputObject)]
pub struct CreateTransactionInput {
    /// Account to post to.
    pub account_id: ID,
    /// Row type.
    #[graphql(name = "type")]
    pub transaction_type: TransactionTypeValue,
    /// Positive amount.
    pub amount: f64,
    /// Free text.
    pub description: Option<String>,
    /// Receipt or cheque number.
    pub reference: Option<String>,
    /// Related customer.
    pub customer_id: Option<ID>,
    /// Related vendor.
    pub vendor_id: Option<ID>,
}

/// Account and ledger queries.
#[derive(Default)]
pub struct AccountQuery;

#[Object]
impl AccountQuery {
    async fn accounts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Account>> {
        guard(ctx, Operation::Accounts)?;
        let accounts = AccountRepository::new(db(ctx)?).list().await.gql()?;
        Ok(accounts.into_iter().map(Account).collect())
    }

    async fn account(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Account>> {
        guard(ctx, Operation::Account)?;
        let account = AccountRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(account.map(Account))
    }

    /// Ledger rows, newest first, optionally for one account and window.
    async fn transactions(
        &self,
        ctx: &Context<'_>,
        account_id: Option<ID>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> async_graphql::Result<Vec<Transaction>> {
        guard(ctx, Operation::Transactions)?;
        let filter = TransactionFilter {
            account_id: parse_opt_id(account_id.as_ref())?,
            range: DateRange {
                start: start_date,
                end: end_date,
            },
            ..TransactionFilter::default()
        };
        let rows = AccountRepository::new(db(ctx)?)
            .list_transactions(filter)
            .await
            .gql()?;
        Ok(rows.into_iter().map(Transaction).collect())
    }
}

/// Account and ledger mutations.
#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    async fn create_account(
        &self,
        ctx: &Context<'_>,
        input: CreateAccountInput,
    ) -> async_graphql::Result<Account> {
        guard(ctx, Operation::CreateAccount)?;
        let account = AccountRepository::new(db(ctx)?)
            .create(NewAccount {
                name: input.name,
                account_type: input.account_type.into(),
                opening_balance: parse_money_or_zero(input.balance)?,
            })
            .await
            .gql()?;
        Ok(Account(account))
    }

    async fn update_account(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateAccountInput,
    ) -> async_graphql::Result<Account> {
        guard(ctx, Operation::UpdateAccount)?;
        let changes = AccountChanges {
            name: input.name,
            account_type: input.account_type.map(AccountType::from),
        };
        let account = AccountRepository::new(db(ctx)?)
            .update(parse_id(&id)?, changes)
            .await
            .gql()?;
        Ok(Account(account))
    }

    /// Deletes an account together with its ledger rows.
    async fn delete_account(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Account> {
        guard(ctx, Operation::DeleteAccount)?;
        let account = AccountRepository::new(db(ctx)?)
            .delete(parse_id(&id)?)
            .await
            .gql()?;
        tracing::info!(account_id = %account.id, "Account deleted");
        Ok(Account(account))
    }

    /// Posts a ledger row and moves the account balance by its signed amount.
    async fn create_transaction(
        &self,
        ctx: &Context<'_>,
        input: CreateTransactionInput,
    ) -> async_graphql::Result<Transaction> {
        guard(ctx, Operation::CreateTransaction)?;
        let row = AccountRepository::new(db(ctx)?)
            .create_transaction(NewTransaction {
                account_id: parse_id(&input.account_id)?,
                transaction_type: input.transaction_type.into(),
                amount: parse_money(input.amount)?,
                description: input.description,
                reference: input.reference,
                customer_id: parse_opt_id(input.customer_id.as_ref())?,
                vendor_id: parse_opt_id(input.vendor_id.as_ref())?,
            })
            .await
            .gql()?;
        Ok(Transaction(row))
    }
}
