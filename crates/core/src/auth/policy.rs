//! Operation policy table.
//!
//! Every API operation has exactly one entry here naming the least access it
//! needs. Resolvers never compare roles themselves; they call [`authorize`].

use thiserror::Error;

use super::Role;

/// Minimum access an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including anonymous callers.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// A signed-in user with at least this role.
    Role(Role),
}

/// Every query and mutation the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Operation {
    // Users & auth
    Me,
    Users,
    User,
    Login,
    Register,
    // Categories
    Categories,
    Category,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    // Products
    Products,
    Product,
    LowStockProducts,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    AdjustStock,
    // Customers
    Customers,
    Customer,
    CreateCustomer,
    UpdateCustomer,
    DeleteCustomer,
    // Vendors
    Vendors,
    Vendor,
    CreateVendor,
    UpdateVendor,
    DeleteVendor,
    // Sales
    Sales,
    Sale,
    CreateSale,
    // Purchases
    Purchases,
    Purchase,
    CreatePurchase,
    // Accounts & ledger
    Accounts,
    Account,
    Transactions,
    CreateAccount,
    UpdateAccount,
    DeleteAccount,
    CreateTransaction,
    // Dashboard
    DashboardStats,
}

impl Operation {
    /// Returns the least access this operation requires.
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Login | Self::Me => Access::Public,

            Self::User
            | Self::Categories
            | Self::Category
            | Self::Products
            | Self::Product
            | Self::LowStockProducts
            | Self::AdjustStock
            | Self::Customers
            | Self::Customer
            | Self::CreateCustomer
            | Self::UpdateCustomer
            | Self::Vendors
            | Self::Vendor
            | Self::Sales
            | Self::Sale
            | Self::CreateSale
            | Self::Purchases
            | Self::Purchase
            | Self::DashboardStats => Access::Authenticated,

            Self::CreateCategory
            | Self::UpdateCategory
            | Self::CreateProduct
            | Self::UpdateProduct
            | Self::CreateVendor
            | Self::UpdateVendor
            | Self::CreatePurchase
            | Self::Accounts
            | Self::Account
            | Self::Transactions
            | Self::CreateAccount
            | Self::UpdateAccount
            | Self::CreateTransaction => Access::Role(Role::Manager),

            Self::Users
            | Self::Register
            | Self::DeleteCategory
            | Self::DeleteProduct
            | Self::DeleteCustomer
            | Self::DeleteVendor
            | Self::DeleteAccount => Access::Role(Role::Admin),
        }
    }
}

/// Authorization failures. Both render as "Unauthorized" to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No valid identity on the request.
    #[error("Unauthorized")]
    Unauthenticated {
        /// Operation that was attempted.
        operation: Operation,
    },

    /// Identity present but its role is too low.
    #[error("Unauthorized")]
    InsufficientRole {
        /// Operation that was attempted.
        operation: Operation,
        /// Role the operation needs.
        required: Role,
        /// Role the caller has.
        actual: Role,
    },
}

/// Decides whether a caller with `role` (`None` when anonymous) may run `operation`.
///
/// # Errors
///
/// Returns an `AuthError` when the policy table denies the call.
pub fn authorize(role: Option<Role>, operation: Operation) -> Result<(), AuthError> {
    match (operation.access(), role) {
        (Access::Public, _) => Ok(()),
        (_, None) => Err(AuthError::Unauthenticated { operation }),
        (Access::Authenticated, Some(_)) => Ok(()),
        (Access::Role(required), Some(actual)) if actual.at_least(required) => Ok(()),
        (Access::Role(required), Some(actual)) => Err(AuthError::InsufficientRole {
            operation,
            required,
            actual,
        }),
    }
}
