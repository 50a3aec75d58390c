//! Integration tests for the product repository.

mod common;

use flow_db::repositories::{ProductFilter, UpdateProductInput};
use flow_db::{CategoryRepository, ProductRepository, RepositoryError};
use rust_decimal_macros::dec;

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_filter_by_category_search_and_low_stock() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let low = common::product(&db, category.id, 2, dec!(1)).await;
    let high = common::product(&db, category.id, 100, dec!(1)).await;

    let repo = ProductRepository::new(db.clone());

    let all = repo
        .list(&ProductFilter {
            category_id: Some(category.id),
            ..ProductFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let only_low = repo
        .list(&ProductFilter {
            category_id: Some(category.id),
            low_stock_only: true,
            ..ProductFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(only_low.len(), 1);
    assert_eq!(only_low[0].id, low.id);

    let by_sku = repo
        .list(&ProductFilter {
            search: Some(high.sku.to_uppercase()),
            ..ProductFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_sku.len(), 1);
    assert_eq!(by_sku[0].id, high.id);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_adjust_stock() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 5, dec!(1)).await;
    let repo = ProductRepository::new(db.clone());

    assert_eq!(repo.adjust_stock(p.id, 7).await.unwrap().stock, 12);
    assert_eq!(repo.adjust_stock(p.id, -12).await.unwrap().stock, 0);

    let err = repo.adjust_stock(p.id, -1).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Inventory(_)));
    assert_eq!(repo.find_by_id(p.id).await.unwrap().unwrap().stock, 0);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_update_rejects_negative_price() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let p = common::product(&db, category.id, 5, dec!(1)).await;

    let err = ProductRepository::new(db.clone())
        .update(
            p.id,
            UpdateProductInput {
                sale_price: Some(dec!(-3)),
                ..UpdateProductInput::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Inventory(_)));
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_category_with_products_cannot_be_deleted() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    common::product(&db, category.id, 1, dec!(1)).await;

    let err = CategoryRepository::new(db.clone())
        .delete(category.id)
        .await
        .unwrap_err();
    let app: flow_shared::AppError = err.into();
    assert_eq!(app.error_code(), "CONFLICT");
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_search_treats_wildcards_literally() {
    let db = common::connect().await;
    let category = common::category(&db).await;
    let plain = common::product(&db, category.id, 10, dec!(1)).await;
    let repo = ProductRepository::new(db.clone());

    for wildcard in ["%", "_"] {
        let hits = repo
            .list(&ProductFilter {
                search: Some(wildcard.to_string()),
                category_id: Some(category.id),
                ..ProductFilter::default()
            })
            .await
            .unwrap();
        assert!(hits.is_empty(), "{wildcard:?} matched {}", plain.name);
    }

    let marked = repo
        .update(
            plain.id,
            UpdateProductInput {
                name: Some(format!("{} 50%_off", plain.name)),
                ..UpdateProductInput::default()
            },
        )
        .await
        .unwrap();

    let hits = repo
        .list(&ProductFilter {
            search: Some("50%_OFF".to_string()),
            category_id: Some(category.id),
            ..ProductFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, marked.id);
}
