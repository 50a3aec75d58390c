//! Dashboard figures.

use async_graphql::{Context, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_db::DashboardRepository;
use flow_db::repositories::{DashboardStats as Stats, DateRange};

use super::account::Transaction;
use super::error::GraphqlResultExt;
use super::product::Product;
use super::scalars::money;
use super::{db, guard};

/// Headline numbers for a date window.
pub struct DashboardStats(pub Stats);

#[Object]
impl DashboardStats {
    async fn total_sales(&self) -> f64 {
        money(self.0.profit.total_sales)
    }

    async fn total_purchases(&self) -> f64 {
        money(self.0.profit.total_purchases)
    }

    /// Sales minus the current cost of the goods sold.
    async fn gross_profit(&self) -> f64 {
        money(self.0.profit.gross_profit)
    }

    /// Gross profit minus recorded expenses.
    async fn net_profit(&self) -> f64 {
        money(self.0.profit.net_profit)
    }

    async fn low_stock_products(&self) -> Vec<Product> {
        self.0
            .low_stock_products
            .iter()
            .cloned()
            .map(Product)
            .collect()
    }

    async fn recent_transactions(&self) -> Vec<Transaction> {
        self.0
            .recent_transactions
            .iter()
            .cloned()
            .map(Transaction)
            .collect()
    }

    async fn total_customers(&self) -> u64 {
        self.0.total_customers
    }

    async fn total_vendors(&self) -> u64 {
        self.0.total_vendors
    }

    async fn total_products(&self) -> u64 {
        self.0.total_products
    }
}

/// Dashboard query.
#[derive(Default)]
pub struct DashboardQuery;

#[Object]
impl DashboardQuery {
    async fn dashboard_stats(
        &self,
        ctx: &Context<'_>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> async_graphql::Result<DashboardStats> {
        guard(ctx, Operation::DashboardStats)?;
        let stats = DashboardRepository::new(db(ctx)?)
            .stats(DateRange::between(start_date, end_date))
            .await
            .gql()?;
        Ok(DashboardStats(stats))
    }
}
