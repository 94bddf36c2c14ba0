//! Principal Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default role given to newly registered principals
pub const DEFAULT_ROLE: &str = "beekeeper";

/// Principal entity (an authenticated beekeeper account)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC string, never serialized
    #[serde(skip)]
    pub password_hash: String,
    /// Display name
    pub name: String,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalCreate {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub principal: Principal,
}

/// Lower-case and trim an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal structural email check: exactly one `@`, non-empty local part,
/// and a domain containing a dot that is neither leading nor trailing.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email() {
        assert_eq!(normalize_email("  Maya@Apiary.COM "), "maya@apiary.com");
    }

    #[test]
    fn validates_email_shape() {
        assert!(is_valid_email("maya@apiary.com"));
        assert!(!is_valid_email("maya.apiary.com"));
        assert!(!is_valid_email("@apiary.com"));
        assert!(!is_valid_email("maya@apiary"));
        assert!(!is_valid_email("maya@@apiary.com"));
        assert!(!is_valid_email("ma ya@apiary.com"));
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let principal = Principal {
            id: Uuid::new_v4(),
            email: "maya@apiary.com".into(),
            password_hash: "$argon2id$secret".into(),
            name: "Maya".into(),
            role: DEFAULT_ROLE.into(),
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&principal).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
    }
}
