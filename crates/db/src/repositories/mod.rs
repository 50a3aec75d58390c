//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every write that touches a balance or stock level runs in one database
//! transaction and changes the value with an atomic SQL increment.

pub mod account;
pub mod category;
pub mod contact;
pub mod customer;
pub mod dashboard;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod user;
pub mod vendor;

pub use account::{
    AccountRepository, CreateAccountInput, NewTransaction, TransactionFilter, UpdateAccountInput,
};
pub use category::CategoryRepository;
pub use contact::{ContactInput, UpdateContactInput};
pub use customer::CustomerRepository;
pub use dashboard::{DashboardRepository, DashboardStats};
pub use product::{CreateProductInput, ProductFilter, ProductRepository, UpdateProductInput};
pub use purchase::{CreatePurchaseInput, PurchaseRepository};
pub use sale::{CreateSaleInput, SaleRepository};
pub use user::{NewUser, UserRepository};
pub use vendor::VendorRepository;

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition};

/// Inclusive `created_at` window. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Lower bound (`>=`).
    pub start: Option<DateTime<Utc>>,
    /// Upper bound (`<=`).
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Range with both ends set.
    #[must_use]
    pub const fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub(crate) fn condition<C: ColumnTrait>(&self, column: C) -> Condition {
        let mut condition = Condition::all();
        if let Some(start) = self.start {
            condition = condition.add(column.gte(start));
        }
        if let Some(end) = self.end {
            condition = condition.add(column.lte(end));
        }
        condition
    }
}
