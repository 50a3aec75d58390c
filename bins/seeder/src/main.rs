//! Demo data seeder for Flow ERP.
//!
//! Upserts one user per role (re-running resets their passwords), then adds a
//! demo category and a cash account if they are missing.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use rust_decimal::Decimal;

use flow_core::auth::{Role, hash_password};
use flow_core::ledger::AccountType;
use flow_db::repositories::{CreateAccountInput, NewUser};
use flow_db::{AccountRepository, CategoryRepository, UserRepository, connect};
use flow_shared::config::DatabaseConfig;

/// `(email, name, password, role)` for each demo user.
const DEMO_USERS: [(&str, &str, &str, Role); 3] = [
    ("admin@flow-erp.com", "Admin User", "admin123", Role::Admin),
    ("manager@flow-erp.com", "Manager User", "manager123", Role::Manager),
    ("staff@flow-erp.com", "Staff User", "staff123", Role::Staff),
];

const DEMO_CATEGORY: &str = "General";
const DEMO_ACCOUNT: &str = "Cash in Hand";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("FLOW__DATABASE__URL"))
        .context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = connect(&DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
    })
    .await
    .context("Failed to connect to database")?;

    println!("Seeding users...");
    let users = UserRepository::new(db.clone());
    for (email, name, password, role) in DEMO_USERS {
        let password_hash = hash_password(password)
            .map_err(|e| anyhow::anyhow!("Failed to hash password for {email}: {e}"))?;
        users
            .upsert(NewUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
                role: role.into(),
            })
            .await
            .with_context(|| format!("Failed to upsert {email}"))?;
        println!("  {role}: {email} / {password}");
    }

    println!("Seeding category...");
    let categories = CategoryRepository::new(db.clone());
    if categories.list().await?.iter().any(|c| c.name == DEMO_CATEGORY) {
        println!("  {DEMO_CATEGORY} already exists, skipping...");
    } else {
        categories.create(DEMO_CATEGORY.to_string()).await?;
        println!("  Created {DEMO_CATEGORY}");
    }

    println!("Seeding account...");
    let accounts = AccountRepository::new(db);
    if accounts.list().await?.iter().any(|a| a.name == DEMO_ACCOUNT) {
        println!("  {DEMO_ACCOUNT} already exists, skipping...");
    } else {
        accounts
            .create(CreateAccountInput {
                name: DEMO_ACCOUNT.to_string(),
                account_type: AccountType::Cash,
                opening_balance: Decimal::ZERO,
            })
            .await?;
        println!("  Created {DEMO_ACCOUNT}");
    }

    println!("Seeding complete!");
    Ok(())
}
