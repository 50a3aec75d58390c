//! Integration tests for sale creation.

mod common;

use flow_core::orders::{LineItemInput, PaymentMode};
use flow_db::repositories::CreateSaleInput;
use flow_db::{CustomerRepository, ProductRepository, RepositoryError, SaleRepository};
use futures::future::join_all;
use rust_decimal_macros::dec;

fn line(product_id: uuid::Uuid, quantity: i32, unit_price: rust_decimal::Decimal) -> LineItemInput {
    LineItemInput {
        product_id,
        quantity,
        unit_price,
    }
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_cash_sale_scenario() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let p1 = common::product(&db, category.id, 10, dec!(6.00)).await;

    let sale = SaleRepository::new(db.clone())
        .create(CreateSaleInput {
            customer_id: None,
            items: vec![line(p1.id, 2, dec!(10))],
            discount: dec!(0),
            payment_mode: PaymentMode::Cash,
            paid_amount: dec!(20),
            created_by: user.id,
        })
        .await
        .expect("Failed to create sale");

    assert_eq!(sale.total, dec!(20));
    assert_eq!(sale.due_amount, dec!(0));
    assert!(sale.invoice_number.starts_with("INV-"));
    assert_eq!(sale.customer_id, None);

    let after = ProductRepository::new(db.clone())
        .find_by_id(p1.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.stock, 8);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_due_sale_updates_customer_balance() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let a = common::product(&db, category.id, 10, dec!(5)).await;
    let b = common::product(&db, category.id, 10, dec!(5)).await;
    let customer = common::customer(&db).await;

    let repo = SaleRepository::new(db.clone());
    let sale = repo
        .create(CreateSaleInput {
            customer_id: Some(customer.id),
            items: vec![line(a.id, 3, dec!(12.50)), line(b.id, 1, dec!(40))],
            discount: dec!(7.50),
            payment_mode: PaymentMode::Due,
            paid_amount: dec!(30),
            created_by: user.id,
        })
        .await
        .expect("Failed to create sale");

    assert_eq!(sale.subtotal, dec!(77.50));
    assert_eq!(sale.total, sale.subtotal - sale.discount);
    assert_eq!(sale.due_amount, sale.total - sale.paid_amount);
    assert_eq!(sale.due_amount, dec!(40));

    let items = repo.items(sale.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product_id, a.id);
    assert_eq!(items[0].total, dec!(37.50));
    assert_eq!(items[1].product_id, b.id);

    let customer = CustomerRepository::new(db.clone())
        .find_by_id(customer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.balance, dec!(40));

    let products = ProductRepository::new(db.clone());
    assert_eq!(products.find_by_id(a.id).await.unwrap().unwrap().stock, 7);
    assert_eq!(products.find_by_id(b.id).await.unwrap().unwrap().stock, 9);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_insufficient_stock_rolls_back_everything() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let plenty = common::product(&db, category.id, 50, dec!(1)).await;
    let scarce = common::product(&db, category.id, 1, dec!(1)).await;
    let customer = common::customer(&db).await;

    let repo = SaleRepository::new(db.clone());
    let err = repo
        .create(CreateSaleInput {
            customer_id: Some(customer.id),
            items: vec![line(plenty.id, 5, dec!(2)), line(scarce.id, 2, dec!(2))],
            discount: dec!(0),
            payment_mode: PaymentMode::Due,
            paid_amount: dec!(0),
            created_by: user.id,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Inventory(_)));

    let products = ProductRepository::new(db.clone());
    assert_eq!(products.find_by_id(plenty.id).await.unwrap().unwrap().stock, 50);
    assert_eq!(products.find_by_id(scarce.id).await.unwrap().unwrap().stock, 1);

    let customer = CustomerRepository::new(db.clone())
        .find_by_id(customer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.balance, dec!(0));
    assert!(repo.list_by_customer(customer.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_unknown_product_is_not_found() {
    let db = common::connect().await;
    let user = common::user(&db).await;

    let err = SaleRepository::new(db.clone())
        .create(CreateSaleInput {
            customer_id: None,
            items: vec![line(uuid::Uuid::new_v4(), 1, dec!(1))],
            discount: dec!(0),
            payment_mode: PaymentMode::Cash,
            paid_amount: dec!(1),
            created_by: user.id,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::NotFound {
            entity: "Product",
            ..
        }
    ));
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_due_without_customer_rejected() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 5, dec!(1)).await;

    let err = SaleRepository::new(db.clone())
        .create(CreateSaleInput {
            customer_id: None,
            items: vec![line(p.id, 1, dec!(10))],
            discount: dec!(0),
            payment_mode: PaymentMode::Due,
            paid_amount: dec!(0),
            created_by: user.id,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Order(_)));
    let p = ProductRepository::new(db.clone())
        .find_by_id(p.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(p.stock, 5);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_concurrent_sales_never_oversell() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 10, dec!(1)).await;

    let (product_id, user_id) = (p.id, user.id);
    let repo = SaleRepository::new(db.clone());
    let attempts = (0..25).map(|_| {
        let repo = repo.clone();
        async move {
            repo.create(CreateSaleInput {
                customer_id: None,
                items: vec![line(product_id, 1, dec!(3))],
                discount: dec!(0),
                payment_mode: PaymentMode::Cash,
                paid_amount: dec!(3),
                created_by: user_id,
            })
            .await
        }
    });

    let results = join_all(attempts).await;
    let sold: Vec<_> = results.into_iter().filter_map(Result::ok).collect();

    assert_eq!(sold.len(), 10);

    let mut invoices: Vec<_> = sold.iter().map(|s| s.invoice_number.clone()).collect();
    invoices.sort();
    invoices.dedup();
    assert_eq!(invoices.len(), 10);

    let p = ProductRepository::new(db.clone())
        .find_by_id(p.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(p.stock, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_concurrent_sales_with_opposite_line_order_all_succeed() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let a = common::product(&db, category.id, 10_000, dec!(1)).await;
    let b = common::product(&db, category.id, 10_000, dec!(1)).await;

    let user_id = user.id;
    let repo = SaleRepository::new(db.clone());
    let handles: Vec<_> = (0..40)
        .map(|i| {
            let repo = repo.clone();
            let items = if i % 2 == 0 {
                vec![line(a.id, 1, dec!(2)), line(b.id, 1, dec!(2))]
            } else {
                vec![line(b.id, 1, dec!(2)), line(a.id, 1, dec!(2))]
            };
            tokio::spawn(async move {
                repo.create(CreateSaleInput {
                    customer_id: None,
                    items,
                    discount: dec!(0),
                    payment_mode: PaymentMode::Cash,
                    paid_amount: dec!(4),
                    created_by: user_id,
                })
                .await
            })
        })
        .collect();

    let results = join_all(handles).await;
    let failures: Vec<_> = results
        .into_iter()
        .map(|joined| joined.expect("sale task panicked"))
        .filter_map(Result::err)
        .collect();
    assert!(failures.is_empty(), "sales failed: {failures:?}");

    let products = ProductRepository::new(db.clone());
    assert_eq!(products.find_by_id(a.id).await.unwrap().unwrap().stock, 9_960);
    assert_eq!(products.find_by_id(b.id).await.unwrap().unwrap().stock, 9_960);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_items_keep_request_order() {
    let db = common::connect().await;
    let user = common::user(&db).await;
    let category = common::category(&db).await;
    let a = common::product(&db, category.id, 10, dec!(1)).await;
    let b = common::product(&db, category.id, 10, dec!(1)).await;
    let (first, second) = if a.id > b.id { (a, b) } else { (b, a) };

    let repo = SaleRepository::new(db.clone());
    let sale = repo
        .create(CreateSaleInput {
            customer_id: None,
            items: vec![line(first.id, 1, dec!(2)), line(second.id, 2, dec!(2))],
            discount: dec!(0),
            payment_mode: PaymentMode::Cash,
            paid_amount: dec!(6),
            created_by: user.id,
        })
        .await
        .expect("Failed to create sale");

    let items = repo.items(sale.id).await.unwrap();
    assert_eq!(items[0].product_id, first.id);
    assert_eq!(items[1].product_id, second.id);
}
