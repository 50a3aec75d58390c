//! Products and stock.

use async_graphql::{Context, ID, InputObject, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_core::inventory::is_low_stock;
use flow_db::entities::products;
use flow_db::repositories::{
    CreateProductInput as NewProduct, ProductFilter, UpdateProductInput as ProductChanges,
};
use flow_db::{CategoryRepository, ProductRepository};

use super::category::Category;
use super::error::GraphqlResultExt;
use super::scalars::{money, parse_id, parse_money, parse_opt_id, timestamp, to_id};
use super::{db, found, guard};

/// A stocked product.
pub struct Product(pub products::Model);

#[Object]
impl Product {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn sku(&self) -> &str {
        &self.0.sku
    }

    async fn category(&self, ctx: &Context<'_>) -> async_graphql::Result<Category> {
        let category = CategoryRepository::new(db(ctx)?)
            .find_by_id(self.0.category_id)
            .await
            .gql()?;
        found(category, "Category").map(Category)
    }

    async fn unit(&self) -> &str {
        &self.0.unit
    }

    async fn cost_price(&self) -> f64 {
        money(self.0.cost_price)
    }

    async fn sale_price(&self) -> f64 {
        money(self.0.sale_price)
    }

    async fn stock(&self) -> i32 {
        self.0.stock
    }

    async fn low_stock_threshold(&self) -> i32 {
        self.0.low_stock_threshold
    }

    /// True when stock is at or below the threshold.
    async fn is_low_stock(&self) -> bool {
        is_low_stock(self.0.stock, self.0.low_stock_threshold)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        timestamp(self.0.updated_at)
    }
}

/// New product fields.
#[derive(InputObject)]
pub struct CreateProductInput {
    /// Display name.
    pub name: String,
    /// Unique stock-keeping unit.
    pub sku: String,
    /// Owning category.
    pub category_id: ID,
    /// Unit of measure (pcs, kg, ...).
    pub unit: String,
    /// Purchase cost per unit.
    pub cost_price: f64,
    /// Selling price per unit.
    pub sale_price: f64,
    /// Opening stock, 0 when omitted.
    pub stock: Option<i32>,
    /// Reorder point, 10 when omitted.
    pub low_stock_threshold: Option<i32>,
}

/// Product changes. Omitted fields stay as they are.
#[derive(InputObject)]
pub struct UpdateProductInput {
    /// Display name.
    pub name: Option<String>,
    /// Stock-keeping unit.
    pub sku: Option<String>,
    /// Owning category.
    pub category_id: Option<ID>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Purchase cost per unit.
    pub cost_price: Option<f64>,
    /// Selling price per unit.
    pub sale_price: Option<f64>,
    /// Stock on hand.
    pub stock: Option<i32>,
    /// Reorder point.
    pub low_stock_threshold: Option<i32>,
}

/// Product listing filter.
#[derive(InputObject, Default)]
pub struct ProductFilterInput {
    /// Case-insensitive match on name or SKU.
    pub search: Option<String>,
    /// Restrict to one category.
    pub category_id: Option<ID>,
    /// Only products at or below their threshold.
    pub low_stock_only: Option<bool>,
}

impl ProductFilterInput {
    fn into_filter(self) -> async_graphql::Result<ProductFilter> {
        Ok(ProductFilter {
            search: self.search,
            category_id: parse_opt_id(self.category_id.as_ref())?,
            low_stock_only: self.low_stock_only.unwrap_or(false),
        })
    }
}

/// Product queries.
#[derive(Default)]
pub struct ProductQuery;

#[Object]
impl ProductQuery {
    async fn products(
        &self,
        ctx: &Context<'_>,
        filter: Option<ProductFilterInput>,
    ) -> async_graphql::Result<Vec<Product>> {
        guard(ctx, Operation::Products)?;
        let filter = filter.unwrap_or_default().into_filter()?;
        let products = ProductRepository::new(db(ctx)?).list(&filter).await.gql()?;
        Ok(products.into_iter().map(Product).collect())
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Product>> {
        guard(ctx, Operation::Product)?;
        let product = ProductRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(product.map(Product))
    }

    /// Every product at or below its threshold, lowest stock first.
    async fn low_stock_products(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Product>> {
        guard(ctx, Operation::LowStockProducts)?;
        let products = ProductRepository::new(db(ctx)?).low_stock(None).await.gql()?;
        Ok(products.into_iter().map(Product).collect())
    }
}

/// Product mutations.
#[derive(Default)]
pub struct ProductMutation;

#[Object]
impl ProductMutation {
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        input: CreateProductInput,
    ) -> async_graphql::Result<Product> {
        guard(ctx, Operation::CreateProduct)?;
        let product = ProductRepository::new(db(ctx)?)
            .create(NewProduct {
                name: input.name,
                sku: input.sku,
                category_id: parse_id(&input.category_id)?,
                unit: input.unit,
                cost_price: parse_money(input.cost_price)?,
                sale_price: parse_money(input.sale_price)?,
                stock: input.stock,
                low_stock_threshold: input.low_stock_threshold,
            })
            .await
            .gql()?;
        tracing::info!(product_id = %product.id, sku = %product.sku, "Product created");
        Ok(Product(product))
    }

    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateProductInput,
    ) -> async_graphql::Result<Product> {
        guard(ctx, Operation::UpdateProduct)?;
        let changes = ProductChanges {
            name: input.name,
            sku: input.sku,
            category_id: parse_opt_id(input.category_id.as_ref())?,
            unit: input.unit,
            cost_price: input.cost_price.map(parse_money).transpose()?,
            sale_price: input.sale_price.map(parse_money).transpose()?,
            stock: input.stock,
            low_stock_threshold: input.low_stock_threshold,
        };
        let product = ProductRepository::new(db(ctx)?)
            .update(parse_id(&id)?, changes)
            .await
            .gql()?;
        Ok(Product(product))
    }

    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Product> {
        guard(ctx, Operation::DeleteProduct)?;
        let product = ProductRepository::new(db(ctx)?)
            .delete(parse_id(&id)?)
            .await
            .gql()?;
        tracing::info!(product_id = %product.id, "Product deleted");
        Ok(Product(product))
    }

    /// Adds `quantity` (negative to remove) to the product's stock.
    async fn adjust_stock(
        &self,
        ctx: &Context<'_>,
        id: ID,
        quantity: i32,
    ) -> async_graphql::Result<Product> {
        guard(ctx, Operation::AdjustStock)?;
        let product = ProductRepository::new(db(ctx)?)
            .adjust_stock(parse_id(&id)?, quantity)
            .await
            .gql()?;
        Ok(Product(product))
    }
}
