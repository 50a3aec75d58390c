//! Contact fields shared by customers and vendors.

/// Input for creating a customer or vendor.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Input for updating a customer or vendor. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactInput {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}
