//! Customers.

use async_graphql::{Context, ID, InputObject, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_db::entities::customers;
use flow_db::repositories::{ContactInput, TransactionFilter, UpdateContactInput};
use flow_db::{AccountRepository, CustomerRepository, SaleRepository};

use super::account::Transaction;
use super::error::GraphqlResultExt;
use super::sale::Sale;
use super::scalars::{money, parse_id, timestamp, to_id};
use super::{db, guard};

/// A customer. `balance` is what they currently owe.
pub struct Customer(pub customers::Model);

#[Object]
impl Customer {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }

    async fn phone(&self) -> Option<&str> {
        self.0.phone.as_deref()
    }

    async fn address(&self) -> Option<&str> {
        self.0.address.as_deref()
    }

    async fn balance(&self) -> f64 {
        money(self.0.balance)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        timestamp(self.0.updated_at)
    }

    async fn sales(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Sale>> {
        let sales = SaleRepository::new(db(ctx)?)
            .list_by_customer(self.0.id)
            .await
            .gql()?;
        Ok(sales.into_iter().map(Sale).collect())
    }

    async fn transactions(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Transaction>> {
        let filter = TransactionFilter {
            customer_id: Some(self.0.id),
            ..TransactionFilter::default()
        };
        let rows = AccountRepository::new(db(ctx)?)
            .list_transactions(filter)
            .await
            .gql()?;
        Ok(rows.into_iter().map(Transaction).collect())
    }
}

/// New customer fields.
#[derive(InputObject)]
pub struct CreateCustomerInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

impl From<CreateCustomerInput> for ContactInput {
    fn from(input: CreateCustomerInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
        }
    }
}

/// Customer changes. The balance is not editable.
#[derive(InputObject)]
pub struct UpdateCustomerInput {
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

impl From<UpdateCustomerInput> for UpdateContactInput {
    fn from(input: UpdateCustomerInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
        }
    }
}

/// Customer queries.
#[derive(Default)]
pub struct CustomerQuery;

#[Object]
impl CustomerQuery {
    async fn customers(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Customer>> {
        guard(ctx, Operation::Customers)?;
        let customers = CustomerRepository::new(db(ctx)?).list().await.gql()?;
        Ok(customers.into_iter().map(Customer).collect())
    }

    async fn customer(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Customer>> {
        guard(ctx, Operation::Customer)?;
        let customer = CustomerRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(customer.map(Customer))
    }
}

/// Customer mutations.
#[derive(Default)]
pub struct CustomerMutation;

#[Object]
impl CustomerMutation {
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        input: CreateCustomerInput,
    ) -> async_graphql::Result<Customer> {
        guard(ctx, Operation::CreateCustomer)?;
        let customer = CustomerRepository::new(db(ctx)?)
            .create(input.into())
            .await
            .gql()?;
        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(Customer(customer))
    }

    async fn update_customer(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateCustomerInput,
    ) -> async_graphql::Result<Customer> {
        guard(ctx, Operation::UpdateCustomer)?;
        let customer = CustomerRepository::new(db(ctx)?)
            .update(parse_id(&id)?, input.into())
            .await
            .gql()?;
        Ok(Customer(customer))
    }

    async fn delete_customer(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Customer> {
        guard(ctx, Operation::DeleteCustomer)?;
        let customer = CustomerRepository::new(db(ctx)?)
            .delete(parse_id(&id)?)
            .await
            .gql()?;
        tracing::info!(customer_id = %customer.id, "Customer deleted");
        Ok(Customer(customer))
    }
}
