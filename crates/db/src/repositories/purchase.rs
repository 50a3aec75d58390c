//! Purchase repository.

use flow_core::orders::{price_purchase, LineItemInput};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::sale::in_lock_order;
use super::DateRange;
use crate::entities::{products, purchase_items, purchases, vendors};
use crate::error::RepositoryError;

/// Input for creating a purchase.
#[derive(Debug, Clone)]
pub struct CreatePurchaseInput {
    /// Supplying vendor.
    pub vendor_id: Uuid,
    /// Received lines in display order.
    pub items: Vec<LineItemInput>,
    /// Amount paid to the vendor now.
    pub paid_amount: Decimal,
}

/// Purchase repository.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
}

impl PurchaseRepository {
    /// Creates a new purchase repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists purchases in `range`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, range: DateRange) -> Result<Vec<purchases::Model>, RepositoryError> {
        Ok(purchases::Entity::find()
            .filter(range.condition(purchases::Column::CreatedAt))
            .order_by_desc(purchases::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Lists a vendor's purchases, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_vendor(
        &self,
        vendor_id: Uuid,
    ) -> Result<Vec<purchases::Model>, RepositoryError> {
        Ok(purchases::Entity::find()
            .filter(purchases::Column::VendorId.eq(vendor_id))
            .order_by_desc(purchases::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Finds a purchase by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<purchases::Model>, RepositoryError> {
        Ok(purchases::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Returns a purchase's lines in the order they were entered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn items(
        &self,
        purchase_id: Uuid,
    ) -> Result<Vec<purchase_items::Model>, RepositoryError> {
        Ok(purchase_items::Entity::find()
            .filter(purchase_items::Column::PurchaseId.eq(purchase_id))
            .order_by_asc(purchase_items::Column::LineNo)
            .all(&self.db)
            .await?)
    }

    /// Records a purchase: inserts it, adds the received quantities to stock
    /// and adds any unpaid amount to the vendor balance, atomically.
    ///
    /// # Errors
    ///
    /// Returns `Order` for invalid lines or amounts, `NotFound` for an unknown
    /// vendor or product, or a database error. Nothing is written on error.
    pub async fn create(
        &self,
        input: CreatePurchaseInput,
    ) -> Result<purchases::Model, RepositoryError> {
        let priced = price_purchase(&input.items, input.paid_amount)?;

        let txn = self.db.begin().await?;

        vendors::Entity::find_by_id(input.vendor_id)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::not_found("Vendor", input.vendor_id))?;

        let now = chrono::Utc::now().fixed_offset();
        let purchase_id = Uuid::new_v4();

        let purchase = purchases::ActiveModel {
            id: Set(purchase_id),
            vendor_id: Set(input.vendor_id),
            subtotal: Set(priced.totals.subtotal),
            total: Set(priced.totals.total),
            paid_amount: Set(priced.totals.paid_amount),
            due_amount: Set(priced.totals.due_amount),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for line in in_lock_order(&priced.lines) {
            let result = products::Entity::update_many()
                .col_expr(
                    products::Column::Stock,
                    Expr::col(products::Column::Stock).add(line.quantity),
                )
                .filter(products::Column::Id.eq(line.product_id))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                return Err(RepositoryError::not_found("Product", line.product_id));
            }
        }

        for (line_no, line) in (1i32..).zip(&priced.lines) {
            purchase_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_id: Set(purchase_id),
                line_no: Set(line_no),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                total: Set(line.total),
            }
            .insert(&txn)
            .await?;
        }

        if let Some(due) = priced.totals.outstanding() {
            vendors::Entity::update_many()
                .col_expr(
                    vendors::Column::Balance,
                    Expr::col(vendors::Column::Balance).add(due),
                )
                .col_expr(vendors::Column::UpdatedAt, Expr::value(now))
                .filter(vendors::Column::Id.eq(input.vendor_id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            purchase_id = %purchase.id,
            vendor_id = %purchase.vendor_id,
            total = %purchase.total,
            due_amount = %purchase.due_amount,
            "Purchase recorded"
        );

        Ok(purchase)
    }
}
