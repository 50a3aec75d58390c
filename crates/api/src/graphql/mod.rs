//! GraphQL schema.
//!
//! One query and one mutation object per entity, merged into the roots.
//! Each resolver starts with [`guard`], which consults the policy table for
//! its operation before touching the database.

pub mod account;
pub mod category;
pub mod customer;
pub mod dashboard;
pub mod error;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod scalars;
pub mod user;
pub mod vendor;

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, MergedObject, Schema};
use sea_orm::DatabaseConnection;

use crate::middleware::auth::Identity;
use flow_core::auth::{Operation, authorize};
use flow_shared::{AppError, JwtService};

pub use error::{GraphqlResultExt, to_graphql_error};

/// Executable schema type.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// All queries.
#[derive(MergedObject, Default)]
pub struct QueryRoot(
    user::UserQuery,
    category::CategoryQuery,
    product::ProductQuery,
    customer::CustomerQuery,
    vendor::VendorQuery,
    sale::SaleQuery,
    purchase::PurchaseQuery,
    account::AccountQuery,
    dashboard::DashboardQuery,
);

/// All mutations.
#[derive(MergedObject, Default)]
pub struct MutationRoot(
    user::UserMutation,
    category::CategoryMutation,
    product::ProductMutation,
    customer::CustomerMutation,
    vendor::VendorMutation,
    sale::SaleMutation,
    purchase::PurchaseMutation,
    account::AccountMutation,
);

/// Builds the schema with the pool and token service as context data.
pub fn build_schema(db: Arc<DatabaseConnection>, jwt_service: Arc<JwtService>) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .data(jwt_service)
    .finish()
}

/// Checks `operation` against the policy table and returns the caller, if any.
pub(crate) fn guard<'a>(
    ctx: &Context<'a>,
    operation: Operation,
) -> async_graphql::Result<Option<&'a Identity>> {
    let identity = ctx.data_opt::<Identity>();
    authorize(identity.map(|i| i.role), operation).map_err(error::unauthorized)?;
    Ok(identity)
}

/// Like [`guard`], for operations that must know who the caller is.
pub(crate) fn guard_identity<'a>(
    ctx: &Context<'a>,
    operation: Operation,
) -> async_graphql::Result<&'a Identity> {
    guard(ctx, operation)?.ok_or_else(|| to_graphql_error(AppError::Unauthorized))
}

/// Connection pool from the schema data.
pub(crate) fn db(ctx: &Context<'_>) -> async_graphql::Result<DatabaseConnection> {
    Ok(ctx.data::<Arc<DatabaseConnection>>()?.as_ref().clone())
}

/// Token service from the schema data.
pub(crate) fn jwt<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a JwtService> {
    Ok(ctx.data::<Arc<JwtService>>()?.as_ref())
}

/// Turns a missing row into a `NotFound` error.
pub(crate) fn found<T>(row: Option<T>, entity: &str) -> async_graphql::Result<T> {
    row.ok_or_else(|| to_graphql_error(AppError::NotFound(entity.to_string())))
}
