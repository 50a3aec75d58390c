//! Order pricing types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a sale was settled at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    /// Paid in cash.
    Cash,
    /// Put on the customer's account.
    Due,
}

/// A line item as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemInput {
    /// Product being sold or bought.
    pub product_id: Uuid,
    /// Number of units.
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// A validated line item with its computed total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// Product being sold or bought.
    pub product_id: Uuid,
    /// Number of units (always positive).
    pub quantity: i32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub total: Decimal,
}

/// Header amounts of a sale or purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Discount taken off the subtotal (zero for purchases).
    pub discount: Decimal,
    /// `subtotal - discount`.
    pub total: Decimal,
    /// Amount settled now.
    pub paid_amount: Decimal,
    /// `total - paid_amount`.
    pub due_amount: Decimal,
}

impl OrderTotals {
    /// Amount to add to the counterparty's running balance, if any.
    #[must_use]
    pub fn outstanding(&self) -> Option<Decimal> {
        (self.due_amount > Decimal::ZERO).then_some(self.due_amount)
    }
}

/// Priced lines plus totals, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    /// Lines in request order.
    pub lines: Vec<PricedLine>,
    /// Header amounts.
    pub totals: OrderTotals,
}
