//! Integration tests for dashboard aggregates.

mod common;

use flow_core::ledger::TransactionType;
use flow_core::orders::{LineItemInput, PaymentMode};
use flow_db::repositories::{CreateSaleInput, DateRange, NewTransaction};
use flow_db::{AccountRepository, DashboardRepository, SaleRepository};
use rust_decimal_macros::dec;

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_stats_shape() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let low = common::product(&db, category.id, 0, dec!(1)).await;
    common::customer(&db).await;
    common::vendor(&db).await;

    let now = chrono::Utc::now();
    let stats = DashboardRepository::new(db.clone())
        .stats(DateRange::between(now - chrono::Duration::days(1), now))
        .await
        .expect("Failed to load stats");

    assert!(stats.total_products >= 1);
    assert!(stats.total_customers >= 1);
    assert!(stats.total_vendors >= 1);
    assert!(stats.low_stock_products.len() <= 10);
    assert!(stats.recent_transactions.len() <= 10);
    assert!(stats.low_stock_products.windows(2).all(|w| w[0].stock <= w[1].stock));
    assert!(stats.low_stock_products.iter().all(|p| p.stock <= p.low_stock_threshold));
    assert!(low.stock <= low.low_stock_threshold);
    assert!(stats.profit.net_profit <= stats.profit.gross_profit);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_empty_range_is_zero() {
    let db = common::connect().await;
    let start = chrono::DateTime::from_timestamp(0, 0).unwrap();
    let end = chrono::DateTime::from_timestamp(60, 0).unwrap();

    let stats = DashboardRepository::new(db.clone())
        .stats(DateRange::between(start, end))
        .await
        .unwrap();

    assert_eq!(stats.profit.total_sales, dec!(0));
    assert_eq!(stats.profit.total_purchases, dec!(0));
    assert_eq!(stats.profit.gross_profit, dec!(0));
    assert_eq!(stats.profit.net_profit, dec!(0));
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_profit_figures_for_known_rows() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let product = common::product(&db, category.id, 10, dec!(4.00)).await;
    let account = common::account(&db, dec!(0)).await;

    let start = chrono::Utc::now();

    SaleRepository::new(db.clone())
        .create(CreateSaleInput {
            customer_id: None,
            items: vec![LineItemInput {
                product_id: product.id,
                quantity: 3,
                unit_price: dec!(10.00),
            }],
            discount: dec!(0),
            payment_mode: PaymentMode::Cash,
            paid_amount: dec!(30.00),
            created_by: user.id,
        })
        .await
        .expect("Failed to create sale");

    AccountRepository::new(db.clone())
        .create_transaction(NewTransaction {
            account_id: account.id,
            transaction_type: TransactionType::Expense,
            amount: dec!(5.00),
            description: Some("Rent".to_string()),
            reference: None,
            customer_id: None,
            vendor_id: None,
        })
        .await
        .expect("Failed to record expense");

    let end = chrono::Utc::now();

    let stats = DashboardRepository::new(db.clone())
        .stats(DateRange::between(start, end))
        .await
        .expect("Failed to load stats");

    assert_eq!(stats.profit.total_sales, dec!(30.00));
    assert_eq!(stats.profit.total_purchases, dec!(0));
    // 3 units at a cost price of 4.00
    assert_eq!(stats.profit.gross_profit, dec!(18.00));
    assert_eq!(stats.profit.net_profit, dec!(13.00));
}
