//! Product repository.
//!
//! Stock changes go through [`ProductRepository::adjust_stock`] or the sale and
//! purchase repositories; all of them use `SET stock = stock + n`.

use flow_core::inventory::{
    self, adjusted_stock, validate_prices, validate_stock_levels, DEFAULT_LOW_STOCK_THRESHOLD,
};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::products;
use crate::error::RepositoryError;

/// Listing filter for products. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of name or SKU.
    pub search: Option<String>,
    /// Restrict to one category.
    pub category_id: Option<Uuid>,
    /// Only products at or below their low-stock threshold.
    pub low_stock_only: bool,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Display name.
    pub name: String,
    /// Unique stock-keeping unit.
    pub sku: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Unit of measure.
    pub unit: String,
    /// Purchase cost per unit.
    pub cost_price: Decimal,
    /// Selling price per unit.
    pub sale_price: Decimal,
    /// Opening stock (defaults to 0).
    pub stock: Option<i32>,
    /// Reorder point (defaults to 10).
    pub low_stock_threshold: Option<i32>,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// Display name.
    pub name: Option<String>,
    /// Stock-keeping unit.
    pub sku: Option<String>,
    /// Owning category.
    pub category_id: Option<Uuid>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Purchase cost per unit.
    pub cost_price: Option<Decimal>,
    /// Selling price per unit.
    pub sale_price: Option<Decimal>,
    /// Stock on hand.
    pub stock: Option<i32>,
    /// Reorder point.
    pub low_stock_threshold: Option<i32>,
}

/// Product repository for CRUD and stock operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists products matching `filter`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<products::Model>, RepositoryError> {
        let mut query = products::Entity::find();

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = contains_pattern(search);
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(products::Column::Name)))
                            .like(LikeExpr::new(&pattern).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(products::Column::Sku)))
                            .like(LikeExpr::new(&pattern).escape('\\')),
                    ),
            );
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(products::Column::CategoryId.eq(category_id));
        }
        if filter.low_stock_only {
            query = query.filter(
                Expr::col(products::Column::Stock).lte(Expr::col(products::Column::LowStockThreshold)),
            );
        }

        Ok(query
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Lists low-stock products, lowest stock first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn low_stock(&self, limit: Option<u64>) -> Result<Vec<products::Model>, RepositoryError> {
        Ok(products::Entity::find()
            .filter(
                Expr::col(products::Column::Stock).lte(Expr::col(products::Column::LowStockThreshold)),
            )
            .order_by_asc(products::Column::Stock)
            .order_by_asc(products::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    /// Finds a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<products::Model>, RepositoryError> {
        Ok(products::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Counts all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(products::Entity::find().count(&self.db).await?)
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns an `Inventory` error for negative prices or stock, or a
    /// database error (duplicate SKU, unknown category).
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, RepositoryError> {
        validate_prices(Some(input.cost_price), Some(input.sale_price))?;
        validate_stock_levels(input.stock, input.low_stock_threshold)?;

        let now = chrono::Utc::now().into();
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            sku: Set(input.sku),
            category_id: Set(input.category_id),
            unit: Set(input.unit),
            cost_price: Set(input.cost_price),
            sale_price: Set(input.sale_price),
            stock: Set(input.stock.unwrap_or(0)),
            low_stock_threshold: Set(input
                .low_stock_threshold
                .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(product.insert(&self.db).await?)
    }

    /// Updates a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist, an `Inventory` error
    /// for negative values, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, RepositoryError> {
        validate_prices(input.cost_price, input.sale_price)?;
        validate_stock_levels(input.stock, input.low_stock_threshold)?;

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Product", id))?;

        let mut product: products::ActiveModel = existing.into();
        if let Some(name) = input.name {
            product.name = Set(name);
        }
        if let Some(sku) = input.sku {
            product.sku = Set(sku);
        }
        if let Some(category_id) = input.category_id {
            product.category_id = Set(category_id);
        }
        if let Some(unit) = input.unit {
            product.unit = Set(unit);
        }
        if let Some(cost_price) = input.cost_price {
            product.cost_price = Set(cost_price);
        }
        if let Some(sale_price) = input.sale_price {
            product.sale_price = Set(sale_price);
        }
        if let Some(stock) = input.stock {
            product.stock = Set(stock);
        }
        if let Some(threshold) = input.low_stock_threshold {
            product.low_stock_threshold = Set(threshold);
        }
        product.updated_at = Set(chrono::Utc::now().into());

        Ok(product.update(&self.db).await?)
    }

    /// Deletes a product and returns the removed row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist, or a database error
    /// if sale or purchase lines still reference it.
    pub async fn delete(&self, id: Uuid) -> Result<products::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Product", id))?;

        products::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(existing)
    }

    /// Adds `delta` (possibly negative) to a product's stock.
    ///
    /// The row is locked for the duration of the check so a concurrent sale
    /// cannot slip between the check and the increment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist,
    /// `InventoryError::InsufficientStock` if the result would be negative, or
    /// `InventoryError::StockOverflow` if it would not fit in the stock column.
    pub async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<products::Model, RepositoryError> {
        let txn = self.db.begin().await?;

        let current = products::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(RepositoryError::not_found("Product", id))?;

        adjusted_stock(id, current.stock, delta)?;

        products::Entity::update_many()
            .col_expr(
                products::Column::Stock,
                Expr::col(products::Column::Stock).add(delta),
            )
            .col_expr(
                products::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().fixed_offset()),
            )
            .filter(products::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        let updated = products::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::not_found("Product", id))?;

        txn.commit().await?;

        tracing::debug!(
            product_id = %id,
            delta,
            stock = updated.stock,
            low_stock = inventory::is_low_stock(updated.stock, updated.low_stock_threshold),
            "Stock adjusted"
        );

        Ok(updated)
    }
}

/// Builds a case-insensitive substring pattern in which `%`, `_` and `\` match
/// themselves.
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Widget", "%widget%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\tmp", "%c:\\\\tmp%")]
    fn test_contains_pattern_escapes_wildcards(#[case] search: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(search), expected);
    }
}
