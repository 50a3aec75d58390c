//! Vendors.

use async_graphql::{Context, ID, InputObject, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_db::entities::vendors;
use flow_db::repositories::{ContactInput, TransactionFilter, UpdateContactInput};
use flow_db::{AccountRepository, PurchaseRepository, VendorRepository};

use super::account::Transaction;
use super::error::GraphqlResultExt;
use super::purchase::Purchase;
use super::scalars::{money, parse_id, timestamp, to_id};
use super::{db, guard};

/// A vendor. `balance` is what we currently owe them.
pub struct Vendor(pub vendors::Model);

#[Object]
impl Vendor {
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

    async fn purchases(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Purchase>> {
        let purchases = PurchaseRepository::new(db(ctx)?)
            .list_by_vendor(self.0.id)
            .await
            .gql()?;
        Ok(purchases.into_iter().map(Purchase).collect())
    }

    async fn transactions(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Transaction>> {
        let filter = TransactionFilter {
            vendor_id: Some(self.0.id),
            ..TransactionFilter::default()
        };
        let rows = AccountRepository::new(db(ctx)?)
            .list_transactions(filter)
            .await
            .gql()?;
        Ok(rows.into_iter().map(Transaction).collect())
    }
}

/// New vendor fields.
#[derive(InputObject)]
pub struct CreateVendorInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

impl From<CreateVendorInput> for ContactInput {
    fn from(input: CreateVendorInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
        }
    }
}

/// Vendor changes. The balance is not editable.
#[derive(InputObject)]
pub struct UpdateVendorInput {
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

impl From<UpdateVendorInput> for UpdateContactInput {
    fn from(input: UpdateVendorInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
        }
    }
}

/// Vendor queries.
#[derive(Default)]
pub struct VendorQuery;

#[Object]
impl VendorQuery {
    async fn vendors(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Vendor>> {
        guard(ctx, Operation::Vendors)?;
        let vendors = VendorRepository::new(db(ctx)?).list().await.gql()?;
        Ok(vendors.into_iter().map(Vendor).collect())
    }

    async fn vendor(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Vendor>> {
        guard(ctx, Operation::Vendor)?;
        let vendor = VendorRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(vendor.map(Vendor))
    }
}

/// Vendor mutations.
#[derive(Default)]
pub struct VendorMutation;

#[Object]
impl VendorMutation {
    async fn create_vendor(
        &self,
        ctx: &Context<'_>,
        input: CreateVendorInput,
    ) -> async_graphql::Result<Vendor> {
        guard(ctx, Operation::CreateVendor)?;
        let vendor = VendorRepository::new(db(ctx)?)
            .create(input.into())
            .await
            .gql()?;
        tracing::info!(vendor_id = %vendor.id, "Vendor created");
        Ok(Vendor(vendor))
    }

    async fn update_vendor(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateVendorInput,
    ) -> async_graphql::Result<Vendor> {
        guard(ctx, Operation::UpdateVendor)?;
        let vendor = VendorRepository::new(db(ctx)?)
            .update(parse_id(&id)?, input.into())
            .await
            .gql()?;
        Ok(Vendor(vendor))
    }

    async fn delete_vendor(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Vendor> {
        guard(ctx, Operation::DeleteVendor)?;
        let vendor = VendorRepository::new(db(ctx)?)
            .delete(parse_id(&id)?)
            .await
            .gql()?;
        tracing::info!(vendor_id = %vendor.id, "Vendor deleted");
        Ok(Vendor(vendor))
    }
}
