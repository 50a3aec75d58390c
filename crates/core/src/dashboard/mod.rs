//! Dashboard profit figures.

use rust_decimal::Decimal;

/// Number of low-stock products shown on the dashboard.
pub const LOW_STOCK_LIMIT: u64 = 10;

/// Number of recent ledger rows shown on the dashboard.
pub const RECENT_TRANSACTIONS_LIMIT: u64 = 10;

/// One sold line as seen by the profit calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoldLine {
    /// Units sold.
    pub quantity: i32,
    /// Product's current cost price.
    pub cost_price: Decimal,
}

/// Cost of goods sold: `Σ quantity × cost_price`.
#[must_use]
pub fn cost_of_goods_sold(lines: &[SoldLine]) -> Decimal {
    lines
        .iter()
        .map(|l| Decimal::from(l.quantity) * l.cost_price)
        .sum()
}

/// Profit summary for a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitSummary {
    /// Σ sale totals.
    pub total_sales: Decimal,
    /// Σ purchase totals.
    pub total_purchases: Decimal,
    /// `total_sales - cost_of_goods_sold`.
    pub gross_profit: Decimal,
    /// `gross_profit - expenses`.
    pub net_profit: Decimal,
}

impl ProfitSummary {
    /// Derives gross and net profit from range totals.
    #[must_use]
    pub fn compute(
        total_sales: Decimal,
        total_purchases: Decimal,
        cost_of_goods_sold: Decimal,
        expenses: Decimal,
    ) -> Self {
        let gross_profit = total_sales - cost_of_goods_sold;
        Self {
            total_sales,
            total_purchases,
            gross_profit,
            net_profit: gross_profit - expenses,
        }
    }
}
