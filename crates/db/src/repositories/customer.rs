//! Customer repository.
//!
//! `balance` is never written here; only sales move it.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use uuid::Uuid;

use super::contact::{ContactInput, UpdateContactInput};
use crate::entities::customers;
use crate::error::RepositoryError;

/// Customer repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists customers by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<customers::Model>, RepositoryError> {
        Ok(customers::Entity::find()
            .order_by_asc(customers::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Finds a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<customers::Model>, RepositoryError> {
        Ok(customers::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Counts all customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(customers::Entity::find().count(&self.db).await?)
    }

    /// Creates a customer with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: ContactInput) -> Result<customers::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let customer = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(customer.insert(&self.db).await?)
    }

    /// Updates a customer's contact fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateContactInput,
    ) -> Result<customers::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Customer", id))?;

        let mut customer: customers::ActiveModel = existing.into();
        if let Some(name) = input.name {
            customer.name = Set(name);
        }
        if let Some(email) = input.email {
            customer.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            customer.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            customer.address = Set(Some(address));
        }
        customer.updated_at = Set(chrono::Utc::now().into());

        Ok(customer.update(&self.db).await?)
    }

    /// Deletes a customer and returns the removed row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist, or a database error
    /// if sales or ledger rows still reference it.
    pub async fn delete(&self, id: Uuid) -> Result<customers::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Customer", id))?;

        customers::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(existing)
    }
}
