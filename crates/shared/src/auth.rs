//! Token claims carried by every authenticated request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims: the caller's identity and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role name (`ADMIN`, `MANAGER`, `STAFF`).
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        email: &str,
        name: &str,
        role: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: user_id,
            email: email.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn claims_sets_expiration_and_iat() {
        let user = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::days(7);
        let before = Utc::now().timestamp();
        let claims = Claims::new(user, "a@b.io", "Ann", "ADMIN", expires_at);
        let after = Utc::now().timestamp();

        assert_eq!(claims.user_id(), user);
        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn claims_payload_uses_flat_identity_fields() {
        let claims = Claims::new(
            Uuid::nil(),
            "staff@flow-erp.com",
            "Staff User",
            "STAFF",
            Utc::now() + Duration::hours(1),
        );
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["id"], Uuid::nil().to_string());
        assert_eq!(json["email"], "staff@flow-erp.com");
        assert_eq!(json["name"], "Staff User");
        assert_eq!(json["role"], "STAFF");
        assert!(json.get("exp").is_some());
    }
}
