//! Property-based tests for ledger sign mapping.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::posting;
use super::types::TransactionType;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn transaction_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Income),
        Just(TransactionType::Expense),
        Just(TransactionType::Capital),
        Just(TransactionType::Loan),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The delta magnitude always equals the amount.
    #[test]
    fn prop_delta_magnitude_is_amount(ty in transaction_type(), amount in positive_amount()) {
        let p = posting(ty, amount).unwrap();
        prop_assert_eq!(p.delta.abs(), amount);
        prop_assert_eq!(p.delta > Decimal::ZERO, ty != TransactionType::Expense);
    }

    /// Applying a sequence of postings equals summing their signed amounts.
    #[test]
    fn prop_running_balance(rows in prop::collection::vec((transaction_type(), positive_amount()), 0..20)) {
        let mut balance = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        let mut debits = Decimal::ZERO;
        for (ty, amount) in rows {
            balance += posting(ty, amount).unwrap().delta;
            if ty == TransactionType::Expense {
                debits += amount;
            } else {
                credits += amount;
            }
        }
        prop_assert_eq!(balance, credits - debits);
    }
}
