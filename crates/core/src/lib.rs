//! Core business rules for Flow ERP.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Repositories and resolvers call into it; it never calls out.
//!
//! # Modules
//!
//! - `auth` - Roles, the operation policy table, password hashing
//! - `orders` - Sale and purchase pricing (line totals, discount, due amount)
//! - `ledger` - Transaction type to balance sign mapping
//! - `inventory` - Stock and product price rules
//! - `dashboard` - Profit figures for the dashboard

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod ledger;
pub mod orders;
