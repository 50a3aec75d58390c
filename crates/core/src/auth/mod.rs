//! Authentication and authorization rules.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - The user role hierarchy
//! - The operation policy table every resolver consults

mod password;
pub mod policy;

pub use password::{
    MIN_PASSWORD_LENGTH, PasswordError, hash_password, validate_new_password,
    verify_against_dummy, verify_password,
};
pub use policy::{Access, AuthError, Operation, authorize};

use serde::{Deserialize, Serialize};

/// User roles, from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access including deletes and user management.
    Admin,
    /// Manages master data, purchasing, and accounts.
    Manager,
    /// Day-to-day sales and stock handling.
    Staff,
}

impl Role {
    const fn rank(self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::Manager => 2,
            Self::Staff => 1,
        }
    }

    /// Returns true if this role is `min` or more privileged.
    #[must_use]
    pub const fn at_least(self, min: Self) -> bool {
        self.rank() >= min.rank()
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Staff => "STAFF",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "STAFF" => Ok(Self::Staff),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::Admin.at_least(Role::Manager));
        assert!(Role::Admin.at_least(Role::Staff));
        assert!(Role::Manager.at_least(Role::Manager));
        assert!(Role::Manager.at_least(Role::Staff));
        assert!(!Role::Manager.at_least(Role::Admin));
        assert!(!Role::Staff.at_least(Role::Manager));
    }

    #[test]
    fn test_role_string_round_trip() {
        for role in [Role::Admin, Role::Manager, Role::Staff] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("OWNER").is_err());
    }
}
