//! Repository error type and its mapping into [`AppError`].

use flow_core::inventory::InventoryError;
use flow_core::ledger::LedgerError;
use flow_core::orders::OrderError;
use flow_shared::AppError;
use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

/// Errors returned by repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Row not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name as shown to callers.
        entity: &'static str,
        /// Requested identifier.
        id: Uuid,
    },

    /// Sale or purchase input rejected.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Stock or price rule violated.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Ledger rule violated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    pub(crate) const fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Whether the database rejected a write for breaking a unique constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        )
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, .. } => Self::NotFound(entity.to_string()),
            RepositoryError::Order(e) => Self::Validation(e.to_string()),
            RepositoryError::Inventory(e) => Self::Validation(e.to_string()),
            RepositoryError::Ledger(e) => Self::Validation(e.to_string()),
            RepositoryError::Database(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(msg)) => {
                    Self::Conflict(format!("Already exists: {msg}"))
                }
                Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                    Self::Conflict(format!("Referenced record conflict: {msg}"))
                }
                _ => Self::Database(e.to_string()),
            },
        }
    }
}
