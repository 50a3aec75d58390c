//! Sale and purchase pricing.
//!
//! This module turns requested line items into priced lines and order totals:
//! - line total = quantity x unit price
//! - subtotal = sum of line totals
//! - total = subtotal - discount (sales) or subtotal (purchases)
//! - due amount = total - paid amount
//!
//! The repositories persist exactly what these functions return.

pub mod error;
pub mod invoice;
pub mod pricing;
pub mod types;

#[cfg(test)]
mod pricing_props;

pub use error::OrderError;
pub use invoice::format_invoice_number;
pub use pricing::{check_sale_counterparty, price_purchase, price_sale};
pub use types::{LineItemInput, OrderTotals, PaymentMode, PricedLine, PricedOrder};
