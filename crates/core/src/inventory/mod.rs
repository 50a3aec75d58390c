//! Product stock rules.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Default `low_stock_threshold` for new products.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Stock and price violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A sale or adjustment would take stock below zero.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product being drawn down.
        product_id: Uuid,
        /// Units on hand.
        available: i32,
        /// Units requested.
        requested: i32,
    },

    /// An adjustment would push stock past the largest storable quantity.
    #[error("Stock adjustment for product {product_id} exceeds the maximum quantity")]
    StockOverflow {
        /// Product being adjusted.
        product_id: Uuid,
    },

    /// Cost or sale price below zero.
    #[error("{field} cannot be negative")]
    NegativePrice {
        /// Which price field.
        field: &'static str,
    },

    /// Stock or threshold below zero.
    #[error("{field} cannot be negative")]
    NegativeQuantity {
        /// Which quantity field.
        field: &'static str,
    },
}

/// Whether a product has reached its reorder point.
#[must_use]
pub const fn is_low_stock(stock: i32, low_stock_threshold: i32) -> bool {
    stock <= low_stock_threshold
}

/// Checks the price fields a product write is about to store.
///
/// # Errors
///
/// Returns `InventoryError::NegativePrice` for the first negative price.
pub fn validate_prices(
    cost_price: Option<Decimal>,
    sale_price: Option<Decimal>,
) -> Result<(), InventoryError> {
    if cost_price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(InventoryError::NegativePrice { field: "Cost price" });
    }
    if sale_price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(InventoryError::NegativePrice { field: "Sale price" });
    }
    Ok(())
}

/// Checks the stock fields a product write is about to store.
///
/// # Errors
///
/// Returns `InventoryError::NegativeQuantity` for the first negative value.
pub fn validate_stock_levels(
    stock: Option<i32>,
    low_stock_threshold: Option<i32>,
) -> Result<(), InventoryError> {
    if stock.is_some_and(|s| s < 0) {
        return Err(InventoryError::NegativeQuantity { field: "Stock" });
    }
    if low_stock_threshold.is_some_and(|t| t < 0) {
        return Err(InventoryError::NegativeQuantity {
            field: "Low stock threshold",
        });
    }
    Ok(())
}

/// Applies a signed stock adjustment, refusing to go below zero.
///
/// # Errors
///
/// Returns `InventoryError::InsufficientStock` when `stock + delta < 0` and
/// `InventoryError::StockOverflow` when the sum does not fit in an `i32`.
pub fn adjusted_stock(product_id: Uuid, stock: i32, delta: i32) -> Result<i32, InventoryError> {
    match stock.checked_add(delta) {
        Some(next) if next >= 0 => Ok(next),
        Some(_) => Err(InventoryError::InsufficientStock {
            product_id,
            available: stock,
            requested: delta.saturating_neg(),
        }),
        None if delta > 0 => Err(InventoryError::StockOverflow { product_id }),
        None => Err(InventoryError::InsufficientStock {
            product_id,
            available: stock,
            requested: delta.saturating_neg(),
        }),
    }
}
