//! Vendor repository.
//!
//! `balance` is never written here; only purchases move it.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use uuid::Uuid;

use super::contact::{ContactInput, UpdateContactInput};
use crate::entities::vendors;
use crate::error::RepositoryError;

/// Vendor repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    db: DatabaseConnection,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists vendors by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<vendors::Model>, RepositoryError> {
        Ok(vendors::Entity::find()
            .order_by_asc(vendors::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Finds a vendor by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<vendors::Model>, RepositoryError> {
        Ok(vendors::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Counts all vendors.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(vendors::Entity::find().count(&self.db).await?)
    }

    /// Creates a vendor with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, input: ContactInput) -> Result<vendors::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let vendor = vendors::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(vendor.insert(&self.db).await?)
    }

    /// Updates a vendor's contact fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateContactInput,
    ) -> Result<vendors::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Vendor", id))?;

        let mut vendor: vendors::ActiveModel = existing.into();
        if let Some(name) = input.name {
            vendor.name = Set(name);
        }
        if let Some(email) = input.email {
            vendor.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            vendor.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            vendor.address = Set(Some(address));
        }
        vendor.updated_at = Set(chrono::Utc::now().into());

        Ok(vendor.update(&self.db).await?)
    }

    /// Deletes a vendor and returns the removed row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vendor does not exist, or a database error
    /// if purchases or ledger rows still reference it.
    pub async fn delete(&self, id: Uuid) -> Result<vendors::Model, RepositoryError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found("Vendor", id))?;

        vendors::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(existing)
    }
}
