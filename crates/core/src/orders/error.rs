//! Order validation errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a sale or purchase request is rejected before touching the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// No line items were given.
    #[error("At least one line item is required")]
    NoLineItems,

    /// A line asked for zero or fewer units.
    #[error("Quantity for product {product_id} must be positive")]
    NonPositiveQuantity {
        /// Offending product.
        product_id: Uuid,
    },

    /// A line carries a negative unit price.
    #[error("Unit price for product {product_id} cannot be negative")]
    NegativeUnitPrice {
        /// Offending product.
        product_id: Uuid,
    },

    /// Discount is negative.
    #[error("Discount cannot be negative")]
    NegativeDiscount,

    /// Discount is larger than the subtotal.
    #[error("Discount {discount} exceeds subtotal {subtotal}")]
    DiscountExceedsSubtotal {
        /// Requested discount.
        discount: Decimal,
        /// Order subtotal.
        subtotal: Decimal,
    },

    /// Paid amount is negative.
    #[error("Paid amount cannot be negative")]
    NegativePayment,

    /// Paid amount is larger than the total.
    #[error("Paid amount {paid} exceeds total {total}")]
    Overpayment {
        /// Amount paid.
        paid: Decimal,
        /// Order total.
        total: Decimal,
    },

    /// A sale leaves money owed but names no customer to owe it.
    #[error("A customer is required when the sale leaves an amount due")]
    DueWithoutCustomer,

    /// Arithmetic overflowed the decimal range.
    #[error("Order amount is too large")]
    AmountOverflow,
}
