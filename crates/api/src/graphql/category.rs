//! Product categories.

use async_graphql::{Context, ID, InputObject, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_db::entities::categories;
use flow_db::repositories::ProductFilter;
use flow_db::{CategoryRepository, ProductRepository};

use super::error::GraphqlResultExt;
use super::product::Product;
use super::scalars::{parse_id, timestamp, to_id};
use super::{db, guard};

/// A product category.
pub struct Category(pub categories::Model);

#[Object]
impl Category {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        timestamp(self.0.updated_at)
    }

    /// Products in this category, by name.
    async fn products(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Product>> {
        let filter = ProductFilter {
            category_id: Some(self.0.id),
            ..ProductFilter::default()
        };
        let products = ProductRepository::new(db(ctx)?).list(&filter).await.gql()?;
        Ok(products.into_iter().map(Product).collect())
    }
}

/// New category fields.
#[derive(InputObject)]
pub struct CreateCategoryInput {
    /// Unique name.
    pub name: String,
}

/// Category changes.
#[derive(InputObject)]
pub struct UpdateCategoryInput {
    /// New name.
    pub name: Option<String>,
}

/// Category queries.
#[derive(Default)]
pub struct CategoryQuery;

#[Object]
impl CategoryQuery {
    async fn categories(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Category>> {
        guard(ctx, Operation::Categories)?;
        let categories = CategoryRepository::new(db(ctx)?).list().await.gql()?;
        Ok(categories.into_iter().map(Category).collect())
    }

    async fn category(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Category>> {
        guard(ctx, Operation::Category)?;
        let category = CategoryRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(category.map(Category))
    }
}

/// Category mutations.
#[derive(Default)]
pub struct CategoryMutation;

#[Object]
impl CategoryMutation {
    async fn create_category(
        &self,
        ctx: &Context<'_>,
        input: CreateCategoryInput,
    ) -> async_graphql::Result<Category> {
        guard(ctx, Operation::CreateCategory)?;
        let category = CategoryRepository::new(db(ctx)?)
            .create(input.name)
            .await
            .gql()?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(Category(category))
    }

    async fn update_category(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateCategoryInput,
    ) -> async_graphql::Result<Category> {
        guard(ctx, Operation::UpdateCategory)?;
        let category = CategoryRepository::new(db(ctx)?)
            .update(parse_id(&id)?, input.name)
            .await
            .gql()?;
        Ok(Category(category))
    }

    /// Deletes an unused category and returns it.
    async fn delete_category(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Category> {
        guard(ctx, Operation::DeleteCategory)?;
        let category = CategoryRepository::new(db(ctx)?)
            .delete(parse_id(&id)?)
            .await
            .gql()?;
        tracing::info!(category_id = %category.id, "Category deleted");
        Ok(Category(category))
    }
}
