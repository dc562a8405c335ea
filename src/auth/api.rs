//! Authentication endpoints: register, login, logout, current user, and the
//! role/user administration surface.

use crate::app::AppState;
use crate::auth::models::{
    LoginRequest, LoginResponse, MessageResponse, Permission, RegisterRequest, RegisterResponse,
    Role, RoleInfo, UpdateRoleRequest, User, UserResponse,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use tracing::{info, warn};

/// Register a new user - POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthApiError> {
    let role = match payload.role.as_deref() {
        // Absent role means admin, matching the registration default.
        None => Role::default(),
        Some(s) => Role::from_str(s).ok_or_else(|| AuthApiError::UnknownRole(s.to_string()))?,
    };

    // Check-then-insert; the UNIQUE constraint on email is the backstop.
    if state
        .auth
        .find_user_by_email(&payload.email)
        .map_err(AuthApiError::Internal)?
        .is_some()
    {
        return Err(AuthApiError::DuplicateEmail);
    }

    let user = state
        .auth
        .create_user(&payload.name, &payload.email, &payload.password, role)
        .map_err(AuthApiError::Internal)?;

    info!("Registered user: {} ({})", user.email, role.as_str());

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user: UserResponse::from_user(&user),
        }),
    ))
}

/// Login - POST /auth/login
///
/// Unknown email and wrong password return the identical error body. The
/// distinction is never surfaced, which keeps account enumeration blind.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let user = state
        .auth
        .verify_credentials(&payload.email, &payload.password)
        .map_err(AuthApiError::Internal)?
        .ok_or_else(|| {
            warn!("Failed login attempt: {}", payload.email);
            AuthApiError::InvalidCredentials
        })?;

    let access_token = state
        .tokens
        .issue(&user.email)
        .map_err(AuthApiError::Internal)?;

    info!("Login successful: {} ({})", user.email, user.role.as_str());

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        role: user.role,
        user_id: user.id,
    }))
}

/// Logout - POST /auth/logout
///
/// Revokes whatever bearer token the Authorization header carries, without
/// validating it first. Always succeeds once a header is present.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AuthApiError> {
    let header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthApiError::MissingHeader)?;

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();

    state
        .auth
        .revoke_token(token)
        .map_err(AuthApiError::Internal)?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Current user - GET /auth/me (session-gated)
pub async fn current_user(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from_user(&user))
}

/// Role catalog with permission sets - GET /roles (session-gated)
pub async fn list_roles() -> Json<Vec<RoleInfo>> {
    let catalog = Role::all()
        .iter()
        .map(|&role| RoleInfo {
            role,
            permissions: role.permissions(),
        })
        .collect();

    Json(catalog)
}

/// List users - GET /users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<UserResponse>>, AuthApiError> {
    if !user.role.allows(Permission::ManageUsers) {
        return Err(AuthApiError::Forbidden);
    }

    let users = state.auth.list_users().map_err(AuthApiError::Internal)?;
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// Change a user's role - PUT /users/:id/role (admin only)
pub async fn update_user_role(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<MessageResponse>, AuthApiError> {
    if !user.role.allows(Permission::ManageUsers) {
        return Err(AuthApiError::Forbidden);
    }

    let role = Role::from_str(&payload.role)
        .ok_or_else(|| AuthApiError::UnknownRole(payload.role.clone()))?;

    state
        .auth
        .get_user_by_id(id)
        .map_err(AuthApiError::Internal)?
        .ok_or(AuthApiError::UserNotFound)?;

    let updated = state
        .auth
        .update_user_role(id, role)
        .map_err(AuthApiError::Internal)?;
    if !updated {
        return Err(AuthApiError::UserNotFound);
    }

    Ok(Json(MessageResponse {
        message: format!("Role updated to {}", role.as_str()),
    }))
}

/// Auth endpoint errors.
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    DuplicateEmail,
    UnknownRole(String),
    MissingHeader,
    Forbidden,
    UserNotFound,
    Internal(anyhow::Error),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthApiError::DuplicateEmail => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            AuthApiError::UnknownRole(role) => {
                (StatusCode::BAD_REQUEST, format!("Unknown role: {}", role))
            }
            AuthApiError::MissingHeader => (
                StatusCode::UNAUTHORIZED,
                "Authorization header missing".to_string(),
            ),
            AuthApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Insufficient permissions".to_string(),
            ),
            AuthApiError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AuthApiError::Internal(err) => {
                tracing::error!("Auth endpoint error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_statuses() {
        let creds = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(creds.status(), StatusCode::UNAUTHORIZED);

        let duplicate = AuthApiError::DuplicateEmail.into_response();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let role = AuthApiError::UnknownRole("superuser".to_string()).into_response();
        assert_eq!(role.status(), StatusCode::BAD_REQUEST);

        let missing = AuthApiError::MissingHeader.into_response();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let forbidden = AuthApiError::Forbidden.into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }
}
