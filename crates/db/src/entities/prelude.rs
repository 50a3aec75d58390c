//! Entity aliases.

pub use super::account_transactions::Entity as AccountTransactions;
pub use super::accounts::Entity as Accounts;
pub use super::categories::Entity as Categories;
pub use super::customers::Entity as Customers;
pub use super::products::Entity as Products;
pub use super::purchase_items::Entity as PurchaseItems;
pub use super::purchases::Entity as Purchases;
pub use super::sale_items::Entity as SaleItems;
pub use super::sales::Entity as Sales;
pub use super::users::Entity as Users;
pub use super::vendors::Entity as Vendors;
