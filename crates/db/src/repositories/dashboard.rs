//! Dashboard aggregates.

use flow_core::dashboard::{
    cost_of_goods_sold, ProfitSummary, SoldLine, LOW_STOCK_LIMIT, RECENT_TRANSACTIONS_LIMIT,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait,
};

use super::product::ProductRepository;
use super::{AccountRepository, CustomerRepository, DateRange, VendorRepository};
use crate::entities::{
    account_transactions, products, purchases, sale_items, sales,
    sea_orm_active_enums::TransactionType,
};
use crate::error::RepositoryError;

/// Everything the dashboard shows for one date range.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    /// Sales, purchases and profit for the range.
    pub profit: ProfitSummary,
    /// Products at or below their reorder point, lowest stock first.
    pub low_stock_products: Vec<products::Model>,
    /// Latest ledger rows across all accounts.
    pub recent_transactions: Vec<account_transactions::Model>,
    /// Number of customers.
    pub total_customers: u64,
    /// Number of vendors.
    pub total_vendors: u64,
    /// Number of products.
    pub total_products: u64,
}

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes dashboard figures for `range`.
    ///
    /// Gross profit is sales minus the cost of goods sold at current cost
    /// prices; net profit further subtracts EXPENSE ledger rows in the range.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn stats(&self, range: DateRange) -> Result<DashboardStats, RepositoryError> {
        let total_sales = self.sum_sales(range).await?;
        let total_purchases = self.sum_purchases(range).await?;
        let cogs = cost_of_goods_sold(&self.sold_lines(range).await?);
        let expenses = self.sum_expenses(range).await?;

        let products = ProductRepository::new(self.db.clone());
        let accounts = AccountRepository::new(self.db.clone());

        Ok(DashboardStats {
            profit: ProfitSummary::compute(total_sales, total_purchases, cogs, expenses),
            low_stock_products: products.low_stock(Some(LOW_STOCK_LIMIT)).await?,
            recent_transactions: accounts
                .recent_transactions(RECENT_TRANSACTIONS_LIMIT)
                .await?,
            total_customers: CustomerRepository::new(self.db.clone()).count().await?,
            total_vendors: VendorRepository::new(self.db.clone()).count().await?,
            total_products: products.count().await?,
        })
    }

    async fn sum_sales(&self, range: DateRange) -> Result<Decimal, RepositoryError> {
        let total: Option<Option<Decimal>> = sales::Entity::find()
            .select_only()
            .column_as(sales::Column::Total.sum(), "total")
            .filter(range.condition(sales::Column::CreatedAt))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn sum_purchases(&self, range: DateRange) -> Result<Decimal, RepositoryError> {
        let total: Option<Option<Decimal>> = purchases::Entity::find()
            .select_only()
            .column_as(purchases::Column::Total.sum(), "total")
            .filter(range.condition(purchases::Column::CreatedAt))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn sum_expenses(&self, range: DateRange) -> Result<Decimal, RepositoryError> {
        let total: Option<Option<Decimal>> = account_transactions::Entity::find()
            .select_only()
            .column_as(account_transactions::Column::Amount.sum(), "total")
            .filter(account_transactions::Column::TransactionType.eq(TransactionType::Expense))
            .filter(range.condition(account_transactions::Column::CreatedAt))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn sold_lines(&self, range: DateRange) -> Result<Vec<SoldLine>, RepositoryError> {
        let rows: Vec<(i32, Decimal)> = sale_items::Entity::find()
            .select_only()
            .column(sale_items::Column::Quantity)
            .column(products::Column::CostPrice)
            .join(JoinType::InnerJoin, sale_items::Relation::Products.def())
            .join(JoinType::InnerJoin, sale_items::Relation::Sales.def())
            .filter(range.condition(sales::Column::CreatedAt))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(quantity, cost_price)| SoldLine {
                quantity,
                cost_price,
            })
            .collect())
    }
}
