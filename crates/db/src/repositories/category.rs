//! Category repository.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::categories;
use crate::error::RepositoryError;

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<categories::Model>, RepositoryError> {
        Ok(categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<categories::Model>, RepositoryError> {
        Ok(categories::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate name).
    pub async fn create(&self, name: String) -> Result<categories::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(category.insert(&self.db).await?)
    }

    /// Renames a category. `None` leaves the name unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
    ) -> Result<categories::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Category", id))?;

        let mut category: categories::ActiveModel = existing.into();
        if let Some(name) = name {
            category.name = Set(name);
        }
        category.updated_at = Set(chrono::Utc::now().into());

        Ok(category.update(&self.db).await?)
    }

    /// Deletes a category and returns the removed row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist, or a database error
    /// if products still reference it.
    pub async fn delete(&self, id: Uuid) -> Result<categories::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Category", id))?;

        categories::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(existing)
    }
}
