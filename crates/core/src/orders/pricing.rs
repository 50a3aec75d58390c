//! Line and order total computation.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::OrderError;
use super::types::{LineItemInput, OrderTotals, PricedLine, PricedOrder};

fn price_lines(items: &[LineItemInput]) -> Result<(Vec<PricedLine>, Decimal), OrderError> {
    if items.is_empty() {
        return Err(OrderError::NoLineItems);
    }

    let mut subtotal = Decimal::ZERO;
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        if item.quantity <= 0 {
            return Err(OrderError::NonPositiveQuantity {
                product_id: item.product_id,
            });
        }
        if item.unit_price < Decimal::ZERO {
            return Err(OrderError::NegativeUnitPrice {
                product_id: item.product_id,
            });
        }

        let total = Decimal::from(item.quantity)
            .checked_mul(item.unit_price)
            .ok_or(OrderError::AmountOverflow)?;
        subtotal = subtotal
            .checked_add(total)
            .ok_or(OrderError::AmountOverflow)?;

        lines.push(PricedLine {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total,
        });
    }

    Ok((lines, subtotal))
}

fn settle(subtotal: Decimal, discount: Decimal, paid: Decimal) -> Result<OrderTotals, OrderError> {
    if discount < Decimal::ZERO {
        return Err(OrderError::NegativeDiscount);
    }
    if discount > subtotal {
        return Err(OrderError::DiscountExceedsSubtotal { discount, subtotal });
    }
    if paid < Decimal::ZERO {
        return Err(OrderError::NegativePayment);
    }

    let total = subtotal - discount;
    if paid > total {
        return Err(OrderError::Overpayment { paid, total });
    }

    Ok(OrderTotals {
        subtotal,
        discount,
        total,
        paid_amount: paid,
        due_amount: total - paid,
    })
}

/// Prices a sale.
///
/// `total = subtotal - discount` and `due = total - paid`.
///
/// # Errors
///
/// Returns an `OrderError` when the items are empty, a quantity is not
/// positive, a price or amount is negative, the discount exceeds the subtotal,
/// or the payment exceeds the total.
pub fn price_sale(
    items: &[LineItemInput],
    discount: Decimal,
    paid: Decimal,
) -> Result<PricedOrder, OrderError> {
    let (lines, subtotal) = price_lines(items)?;
    let totals = settle(subtotal, discount, paid)?;
    Ok(PricedOrder { lines, totals })
}

/// Prices a purchase. Purchases carry no discount.
///
/// # Errors
///
/// Same as [`price_sale`], minus the discount checks.
pub fn price_purchase(items: &[LineItemInput], paid: Decimal) -> Result<PricedOrder, OrderError> {
    let (lines, subtotal) = price_lines(items)?;
    let totals = settle(subtotal, Decimal::ZERO, paid)?;
    Ok(PricedOrder { lines, totals })
}

/// A sale that leaves money owed must name who owes it.
///
/// # Errors
///
/// Returns `OrderError::DueWithoutCustomer` when `totals` has an outstanding
/// amount and `customer_id` is `None`.
pub fn check_sale_counterparty(
    totals: &OrderTotals,
    customer_id: Option<Uuid>,
) -> Result<(), OrderError> {
    if totals.outstanding().is_some() && customer_id.is_none() {
        return Err(OrderError::DueWithoutCustomer);
    }
    Ok(())
}
