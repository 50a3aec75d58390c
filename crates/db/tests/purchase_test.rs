//! Integration tests for purchase creation.

mod common;

use flow_core::orders::LineItemInput;
use flow_db::repositories::CreatePurchaseInput;
use flow_db::{ProductRepository, PurchaseRepository, RepositoryError, VendorRepository};
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_partial_payment_increases_vendor_balance() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 2, dec!(4)).await;
    let vendor = common::vendor(&db).await;

    let repo = PurchaseRepository::new(db.clone());
    let purchase = repo
        .create(CreatePurchaseInput {
            vendor_id: vendor.id,
            items: vec![LineItemInput {
                product_id: p.id,
                quantity: 20,
                unit_price: dec!(4.25),
            }],
            paid_amount: dec!(50),
        })
        .await
        .expect("Failed to create purchase");

    assert_eq!(purchase.total, dec!(85.00));
    assert_eq!(purchase.due_amount, dec!(35.00));

    let vendor = VendorRepository::new(db.clone())
        .find_by_id(vendor.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vendor.balance, dec!(35.00));

    let p = ProductRepository::new(db.clone())
        .find_by_id(p.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(p.stock, 22);

    let listed = repo.list_by_vendor(vendor.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(repo.items(purchase.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_fully_paid_purchase_leaves_vendor_balance() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 0, dec!(1)).await;
    let vendor = common::vendor(&db).await;

    PurchaseRepository::new(db.clone())
        .create(CreatePurchaseInput {
            vendor_id: vendor.id,
            items: vec![LineItemInput {
                product_id: p.id,
                quantity: 3,
                unit_price: dec!(10),
            }],
            paid_amount: dec!(30),
        })
        .await
        .unwrap();

    let vendor = VendorRepository::new(db.clone())
        .find_by_id(vendor.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(vendor.balance, dec!(0));
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_unknown_product_rolls_back() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 1, dec!(1)).await;
    let vendor = common::vendor(&db).await;

    let repo = PurchaseRepository::new(db.clone());
    let err = repo
        .create(CreatePurchaseInput {
            vendor_id: vendor.id,
            items: vec![
                LineItemInput {
                    product_id: p.id,
                    quantity: 5,
                    unit_price: dec!(1),
                },
                LineItemInput {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                    unit_price: dec!(1),
                },
            ],
            paid_amount: dec!(0),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let p = ProductRepository::new(db.clone())
        .find_by_id(p.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(p.stock, 1);
    assert!(repo.list_by_vendor(vendor.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_unknown_vendor_is_not_found() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 1, dec!(1)).await;

    let err = PurchaseRepository::new(db.clone())
        .create(CreatePurchaseInput {
            vendor_id: Uuid::new_v4(),
            items: vec![LineItemInput {
                product_id: p.id,
                quantity: 1,
                unit_price: dec!(1),
            }],
            paid_amount: dec!(1),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::NotFound {
            entity: "Vendor",
            ..
        }
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_concurrent_purchases_with_opposite_line_order_all_succeed() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let a = common::product(&db, category.id, 0, dec!(1)).await;
    let b = common::product(&db, category.id, 0, dec!(1)).await;
    let vendor = common::vendor(&db).await;

    let vendor_id = vendor.id;
    let repo = PurchaseRepository::new(db.clone());
    let handles: Vec<_> = (0..40)
        .map(|i| {
            let repo = repo.clone();
            let (first, second) = if i % 2 == 0 { (a.id, b.id) } else { (b.id, a.id) };
            tokio::spawn(async move {
                repo.create(CreatePurchaseInput {
                    vendor_id,
                    items: [first, second]
                        .into_iter()
                        .map(|product_id| LineItemInput {
                            product_id,
                            quantity: 1,
                            unit_price: dec!(1),
                        })
                        .collect(),
                    paid_amount: dec!(2),
                })
                .await
            })
        })
        .collect();

    for handle in handles {
        handle
            .await
            .expect("purchase task panicked")
            .expect("Failed to create purchase");
    }

    let products = ProductRepository::new(db.clone());
    assert_eq!(products.find_by_id(a.id).await.unwrap().unwrap().stock, 40);
    assert_eq!(products.find_by_id(b.id).await.unwrap().unwrap().stock, 40);
}
