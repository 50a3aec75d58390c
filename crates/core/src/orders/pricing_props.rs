//! Property-based tests for order pricing.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::pricing::{price_purchase, price_sale};
use super::types::LineItemInput;

/// Strategy for unit prices (0.00 to 10,000.00).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn line_items() -> impl Strategy<Value = Vec<LineItemInput>> {
    prop::collection::vec((1i32..500, unit_price()), 1..8).prop_map(|lines| {
        lines
            .into_iter()
            .map(|(quantity, unit_price)| LineItemInput {
                product_id: Uuid::new_v4(),
                quantity,
                unit_price,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Line totals always sum to the subtotal.
    #[test]
    fn prop_subtotal_is_sum_of_lines(items in line_items()) {
        let order = price_purchase(&items, Decimal::ZERO).unwrap();
        let sum: Decimal = order.lines.iter().map(|l| l.total).sum();
        prop_assert_eq!(order.totals.subtotal, sum);
        for (line, input) in order.lines.iter().zip(&items) {
            prop_assert_eq!(line.total, Decimal::from(input.quantity) * input.unit_price);
        }
    }

    /// total = subtotal - discount and due = total - paid, both non-negative.
    #[test]
    fn prop_sale_amounts_reconcile(
        items in line_items(),
        discount_pct in 0u32..=100,
        paid_pct in 0u32..=100,
    ) {
        let subtotal: Decimal = items
            .iter()
            .map(|i| Decimal::from(i.quantity) * i.unit_price)
            .sum();
        let discount = (subtotal * Decimal::from(discount_pct) / Decimal::ONE_HUNDRED).round_dp(2);
        let discount = discount.min(subtotal);
        let total = subtotal - discount;
        let paid = (total * Decimal::from(paid_pct) / Decimal::ONE_HUNDRED).round_dp(2).min(total);

        let order = price_sale(&items, discount, paid).unwrap();
        prop_assert_eq!(order.totals.total, order.totals.subtotal - order.totals.discount);
        prop_assert_eq!(order.totals.due_amount, order.totals.total - order.totals.paid_amount);
        prop_assert!(order.totals.due_amount >= Decimal::ZERO);
        prop_assert_eq!(order.totals.outstanding().is_some(), paid < total);
    }

    /// Paying more than the total is always refused.
    #[test]
    fn prop_overpayment_rejected(items in line_items(), extra in 1i64..100_000) {
        let subtotal: Decimal = items
            .iter()
            .map(|i| Decimal::from(i.quantity) * i.unit_price)
            .sum();
        let paid = subtotal + Decimal::new(extra, 2);
        prop_assert!(price_purchase(&items, paid).is_err());
    }
}
