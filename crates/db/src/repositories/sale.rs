//! Sale repository.
//!
//! Creating a sale inserts the header and its lines, draws down stock and
//! adds any unpaid amount to the customer balance in one database
//! transaction.

use flow_core::inventory::InventoryError;
use flow_core::orders::{
    check_sale_counterparty, format_invoice_number, price_sale, LineItemInput, PaymentMode,
    PricedLine,
};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use uuid::Uuid;

use super::DateRange;
use crate::entities::{customers, products, sale_items, sales};
use crate::error::RepositoryError;

/// Input for creating a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleInput {
    /// Buying customer; `None` for a walk-in sale.
    pub customer_id: Option<Uuid>,
    /// Requested lines in display order.
    pub items: Vec<LineItemInput>,
    /// Discount off the subtotal.
    pub discount: Decimal,
    /// How the sale was settled.
    pub payment_mode: PaymentMode,
    /// Amount paid at the counter.
    pub paid_amount: Decimal,
    /// User recording the sale.
    pub created_by: Uuid,
}

/// Sale repository.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists sales in `range`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, range: DateRange) -> Result<Vec<sales::Model>, RepositoryError> {
        Ok(sales::Entity::find()
            .filter(range.condition(sales::Column::CreatedAt))
            .order_by_desc(sales::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Lists a customer's sales, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<sales::Model>, RepositoryError> {
        Ok(sales::Entity::find()
            .filter(sales::Column::CustomerId.eq(customer_id))
            .order_by_desc(sales::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Finds a sale by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<sales::Model>, RepositoryError> {
        Ok(sales::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Returns a sale's lines in the order they were entered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn items(&self, sale_id: Uuid) -> Result<Vec<sale_items::Model>, RepositoryError> {
        Ok(sale_items::Entity::find()
            .filter(sale_items::Column::SaleId.eq(sale_id))
            .order_by_asc(sale_items::Column::LineNo)
            .all(&self.db)
            .await?)
    }

    /// Records a sale.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `Order` when the lines or amounts are invalid, or money is left owing
    ///   without a customer
    /// - `NotFound` when the customer or a product does not exist
    /// - `Inventory` when a line asks for more than is in stock
    /// - `Database` on any other failure
    ///
    /// Nothing is written unless every step succeeds.
    pub async fn create(&self, input: CreateSaleInput) -> Result<sales::Model, RepositoryError> {
        let priced = price_sale(&input.items, input.discount, input.paid_amount)?;
        check_sale_counterparty(&priced.totals, input.customer_id)?;

        let txn = self.db.begin().await?;

        if let Some(customer_id) = input.customer_id {
            customers::Entity::find_by_id(customer_id)
                .one(&txn)
                .await?
                .ok_or(RepositoryError::not_found("Customer", customer_id))?;
        }

        let invoice_number = format_invoice_number(next_invoice_sequence(&txn).await?);
        let now = chrono::Utc::now().fixed_offset();
        let sale_id = Uuid::new_v4();

        let sale = sales::ActiveModel {
            id: Set(sale_id),
            invoice_number: Set(invoice_number),
            customer_id: Set(input.customer_id),
            subtotal: Set(priced.totals.subtotal),
            discount: Set(priced.totals.discount),
            total: Set(priced.totals.total),
            payment_mode: Set(input.payment_mode.into()),
            paid_amount: Set(priced.totals.paid_amount),
            due_amount: Set(priced.totals.due_amount),
            created_by_id: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for line in in_lock_order(&priced.lines) {
            draw_down_stock(&txn, line).await?;
        }

        for (line_no, line) in (1i32..).zip(&priced.lines) {
            sale_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                sale_id: Set(sale_id),
                line_no: Set(line_no),
                product_id: Set(line.product_id),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                total: Set(line.total),
            }
            .insert(&txn)
            .await?;
        }

        if let (Some(customer_id), Some(due)) = (input.customer_id, priced.totals.outstanding()) {
            customers::Entity::update_many()
                .col_expr(
                    customers::Column::Balance,
                    Expr::col(customers::Column::Balance).add(due),
                )
                .col_expr(customers::Column::UpdatedAt, Expr::value(now))
                .filter(customers::Column::Id.eq(customer_id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            sale_id = %sale.id,
            invoice_number = %sale.invoice_number,
            total = %sale.total,
            due_amount = %sale.due_amount,
            "Sale recorded"
        );

        Ok(sale)
    }
}

async fn next_invoice_sequence(txn: &DatabaseTransaction) -> Result<i64, RepositoryError> {
    let backend = txn.get_database_backend();
    let row = txn
        .query_one(Statement::from_string(
            backend,
            "SELECT nextval('sale_invoice_seq') AS seq",
        ))
        .await?
        .ok_or_else(|| DbErr::Custom("sale_invoice_seq returned no row".to_string()))?;

    Ok(row.try_get::<i64>("", "seq")?)
}

/// Orders lines by product so concurrent orders lock product rows in the same
/// sequence.
pub(crate) fn in_lock_order(lines: &[PricedLine]) -> Vec<&PricedLine> {
    let mut ordered: Vec<&PricedLine> = lines.iter().collect();
    ordered.sort_by_key(|line| line.product_id);
    ordered
}

/// Decrements stock only while enough is on hand, so concurrent sales can
/// never drive it negative.
async fn draw_down_stock(txn: &DatabaseTransaction, line: &PricedLine) -> Result<(), RepositoryError> {
    let result = products::Entity::update_many()
        .col_expr(
            products::Column::Stock,
            Expr::col(products::Column::Stock).sub(line.quantity),
        )
        .filter(products::Column::Id.eq(line.product_id))
        .filter(products::Column::Stock.gte(line.quantity))
        .exec(txn)
        .await?;

    if result.rows_affected > 0 {
        return Ok(());
    }

    let product = products::Entity::find_by_id(line.product_id)
        .one(txn)
        .await?
        .ok_or(RepositoryError::not_found("Product", line.product_id))?;

    Err(InventoryError::InsufficientStock {
        product_id: product.id,
        available: product.stock,
        requested: line.quantity,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn priced(product_id: Uuid) -> PricedLine {
        PricedLine {
            product_id,
            quantity: 1,
            unit_price: dec!(1),
            total: dec!(1),
        }
    }

    #[test]
    fn test_lock_order_ignores_request_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let forward = [priced(a), priced(b)];
        let backward = [priced(b), priced(a)];

        let ids = |lines: &[PricedLine]| -> Vec<Uuid> {
            in_lock_order(lines).iter().map(|l| l.product_id).collect()
        };
        assert_eq!(ids(&forward), ids(&backward));
        assert!(ids(&forward).windows(2).all(|w| w[0] <= w[1]));
    }
}
