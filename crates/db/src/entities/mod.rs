//! `SeaORM` entity definitions.

#![allow(missing_docs)]

pub mod prelude;

pub mod account_transactions;
pub mod accounts;
pub mod categories;
pub mod customers;
pub mod products;
pub mod purchase_items;
pub mod purchases;
pub mod sale_items;
pub mod sales;
pub mod sea_orm_active_enums;
pub mod users;
pub mod vendors;
