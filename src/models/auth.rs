//! Session and credential models.

use serde::{Deserialize, Serialize};

/// Role attached to a session user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// The in-memory record of the currently authenticated user.
///
/// Exists only while logged in; destroyed on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub name: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Admin credential pair. The built-in default can be overridden by a
/// persisted pair or by environment configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new("admin", "SAR2024!")
    }
}

/// Request body for a login attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: the session user plus its bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user: User,
    pub token: String,
}

/// Request body for replacing the admin credential pair.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCredentialsRequest {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials() {
        let creds = AdminCredentials::default();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "SAR2024!");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "1",
            "username": "admin",
            "role": "admin",
            "name": "SAR Administrator"
        }))
        .unwrap();
        assert!(user.is_admin());
    }
}
