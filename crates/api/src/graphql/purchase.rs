//! Purchases.

use async_graphql::{Context, ID, InputObject, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_core::orders::LineItemInput;
use flow_db::entities::{purchase_items, purchases};
use flow_db::repositories::{CreatePurchaseInput as NewPurchase, DateRange};
use flow_db::{ProductRepository, PurchaseRepository, VendorRepository};

use super::error::GraphqlResultExt;
use super::product::Product;
use super::scalars::{money, parse_id, parse_money, timestamp, to_id};
use super::vendor::Vendor;
use super::{db, found, guard};

/// Goods received from a vendor.
pub struct Purchase(pub purchases::Model);

#[Object]
impl Purchase {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn vendor(&self, ctx: &Context<'_>) -> async_graphql::Result<Vendor> {
        let vendor = VendorRepository::new(db(ctx)?)
            .find_by_id(self.0.vendor_id)
            .await
            .gql()?;
        found(vendor, "Vendor").map(Vendor)
    }

    async fn items(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PurchaseItem>> {
        let items = PurchaseRepository::new(db(ctx)?)
            .items(self.0.id)
            .await
            .gql()?;
        Ok(items.into_iter().map(PurchaseItem).collect())
    }

    async fn subtotal(&self) -> f64 {
        money(self.0.subtotal)
    }

    async fn total(&self) -> f64 {
        money(self.0.total)
    }

    async fn paid_amount(&self) -> f64 {
        money(self.0.paid_amount)
    }

    async fn due_amount(&self) -> f64 {
        money(self.0.due_amount)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        timestamp(self.0.updated_at)
    }
}

/// One received line.
pub struct PurchaseItem(pub purchase_items::Model);

#[Object]
impl PurchaseItem {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn product(&self, ctx: &Context<'_>) -> async_graphql::Result<Product> {
        let product = ProductRepository::new(db(ctx)?)
            .find_by_id(self.0.product_id)
            .await
            .gql()?;
        found(product, "Product").map(Product)
    }

    async fn quantity(&self) -> i32 {
        self.0.quantity
    }

    async fn unit_price(&self) -> f64 {
        money(self.0.unit_price)
    }

    async fn total(&self) -> f64 {
        money(self.0.total)
    }
}

/// A received line.
#[derive(InputObject)]
pub struct PurchaseItemInput {
    /// Product received.
    pub product_id: ID,
    /// Units received; must be positive.
    pub quantity: i32,
    /// Cost per unit.
    pub unit_price: f64,
}

/// New purchase fields.
#[derive(InputObject)]
pub struct CreatePurchaseInput {
    /// Supplying vendor.
    pub vendor_id: ID,
    /// Lines in display order.
    pub items: Vec<PurchaseItemInput>,
    /// Amount paid now.
    pub paid_amount: f64,
}

/// Purchase queries.
#[derive(Default)]
pub struct PurchaseQuery;

#[Object]
impl PurchaseQuery {
    /// Purchases in the inclusive date window, newest first.
    async fn purchases(
        &self,
        ctx: &Context<'_>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> async_graphql::Result<Vec<Purchase>> {
        guard(ctx, Operation::Purchases)?;
        let range = DateRange {
            start: start_date,
            end: end_date,
        };
        let purchases = PurchaseRepository::new(db(ctx)?).list(range).await.gql()?;
        Ok(purchases.into_iter().map(Purchase).collect())
    }

    async fn purchase(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Purchase>> {
        guard(ctx, Operation::Purchase)?;
        let purchase = PurchaseRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(purchase.map(Purchase))
    }
}

/// Purchase mutations.
#[derive(Default)]
pub struct PurchaseMutation;

#[Object]
impl PurchaseMutation {
    /// Records a purchase, adds stock and credits any unpaid amount to the
    /// vendor, all or nothing.
    async fn create_purchase(
        &self,
        ctx: &Context<'_>,
        input: CreatePurchaseInput,
    ) -> async_graphql::Result<Purchase> {
        guard(ctx, Operation::CreatePurchase)?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            items.push(LineItemInput {
                product_id: parse_id(&item.product_id)?,
                quantity: item.quantity,
                unit_price: parse_money(item.unit_price)?,
            });
        }

        let purchase = PurchaseRepository::new(db(ctx)?)
            .create(NewPurchase {
                vendor_id: parse_id(&input.vendor_id)?,
                items,
                paid_amount: parse_money(input.paid_amount)?,
            })
            .await
            .gql()?;

        Ok(Purchase(purchase))
    }
}
