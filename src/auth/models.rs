//! Authentication data structures: user records, roles, and the request and
//! response payloads of the auth endpoints.

use serde::{Deserialize, Serialize};

/// User account row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt digest - never serialize
    pub role: Role,
    pub created_at: String,
}

/// Enumerated roles. Each role carries a fixed permission set; role strings
/// arriving over the API are validated at write time against this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin, // Full access, including user administration
    #[serde(rename = "manager")]
    Manager, // All record operations, no user administration
    #[serde(rename = "operator")]
    Operator, // Create and edit records, no delete
    #[serde(rename = "viewer")]
    Viewer, // Read-only
}

/// Individual capabilities granted through a role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    CreateRecords,
    EditRecords,
    DeleteRecords,
    ViewRecords,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Operator => "operator",
            Role::Viewer => "viewer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "operator" => Some(Role::Operator),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    /// The static permission set for this role.
    pub fn permissions(&self) -> &'static [Permission] {
        use Permission::*;
        match self {
            Role::Admin => &[
                ManageUsers,
                CreateRecords,
                EditRecords,
                DeleteRecords,
                ViewRecords,
            ],
            Role::Manager => &[CreateRecords, EditRecords, DeleteRecords, ViewRecords],
            Role::Operator => &[CreateRecords, EditRecords, ViewRecords],
            Role::Viewer => &[ViewRecords],
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// All roles, for the catalog endpoint.
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Manager, Role::Operator, Role::Viewer]
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Admin
    }
}

/// Registration request body. `role` is an optional free string validated
/// against [`Role`] by the handler; absent means admin.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: Role,
    pub user_id: i64,
}

/// User payload with the password hash stripped.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One entry of the role catalog.
#[derive(Debug, Serialize)]
pub struct RoleInfo {
    pub role: Role,
    pub permissions: &'static [Permission],
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let admin = Role::Admin;
        let json = serde_json::to_string(&admin).unwrap();
        assert_eq!(json, r#""admin""#);

        let operator: Role = serde_json::from_str(r#""operator""#).unwrap();
        assert_eq!(operator, Role::Operator);
    }

    #[test]
    fn test_role_string_conversion() {
        assert_eq!(Role::Manager.as_str(), "manager");
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("VIEWER"), Some(Role::Viewer));
        assert_eq!(Role::from_str("superuser"), None);
        assert_eq!(Role::from_str(""), None);
    }

    #[test]
    fn test_permission_matrix() {
        assert!(Role::Admin.allows(Permission::ManageUsers));
        assert!(Role::Admin.allows(Permission::DeleteRecords));

        assert!(!Role::Manager.allows(Permission::ManageUsers));
        assert!(Role::Manager.allows(Permission::DeleteRecords));

        assert!(Role::Operator.allows(Permission::EditRecords));
        assert!(!Role::Operator.allows(Permission::DeleteRecords));

        assert_eq!(Role::Viewer.permissions(), &[Permission::ViewRecords]);
    }

    #[test]
    fn test_user_response_strips_password_hash() {
        let user = User {
            id: 7,
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: Role::Admin,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        };

        let response = UserResponse::from_user(&user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("a@x.com"));

        // Serializing the full record also omits the hash.
        let full = serde_json::to_string(&user).unwrap();
        assert!(!full.contains("password_hash"));
    }
}
