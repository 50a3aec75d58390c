//! Integration tests for the user repository.

mod common;

use flow_db::entities::sea_orm_active_enums::UserRole;
use flow_db::repositories::NewUser;
use flow_db::UserRepository;

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_create_and_find_by_email() {
    let db = common::connect().await;
    let repo = UserRepository::new(db.clone());
    let user = common::user(&db).await;

    let found = repo
        .find_by_email(&user.email)
        .await
        .expect("Failed to find user")
        .expect("User should exist");
    assert_eq!(found.id, user.id);
    assert!(repo.email_exists(&user.email).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_find_by_email_not_found() {
    let db = common::connect().await;
    let result = UserRepository::new(db.clone())
        .find_by_email("nonexistent@example.invalid")
        .await
        .expect("Query should succeed");
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_upsert_overwrites_existing() {
    let db = common::connect().await;
    let repo = UserRepository::new(db.clone());
    let email = format!("{}@example.com", common::unique("upsert"));

    let first = repo
        .upsert(NewUser {
            email: email.clone(),
            name: "First".to_string(),
            password_hash: "$argon2id$one".to_string(),
            role: UserRole::Staff,
        })
        .await
        .unwrap();
    let second = repo
        .upsert(NewUser {
            email: email.clone(),
            name: "Second".to_string(),
            password_hash: "$argon2id$two".to_string(),
            role: UserRole::Manager,
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Second");
    assert_eq!(second.role, UserRole::Manager);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres at DATABASE_URL"]
async fn test_duplicate_email_is_unique_violation() {
    let db = common::connect().await;
    let repo = UserRepository::new(db.clone());
    let user = common::user(&db).await;

    let err = repo
        .create(NewUser {
            email: user.email.clone(),
            name: "Again".to_string(),
            password_hash: "$argon2id$again".to_string(),
            role: UserRole::Staff,
        })
        .await
        .unwrap_err();

    assert!(err.is_unique_violation());
}
