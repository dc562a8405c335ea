//! Session gate middleware.
//!
//! Runs in front of every non-auth route. Per request:
//! 1. extract the bearer token from the Authorization header,
//! 2. verify signature and expiry,
//! 3. check the revocation list,
//! 4. resolve the subject email to a user row,
//! 5. hand the user record to the handler via request extensions.
//!
//! Every rejection is a 401. The reasons differ only in log output.

use crate::app::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{debug, error};

pub async fn session_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, SessionError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(SessionError::MissingToken)?;

    let claims = state.tokens.validate(&token).map_err(|e| {
        debug!("Rejected token: {}", e);
        SessionError::Rejected
    })?;

    // An unexpired token dies early if it was revoked at logout.
    let revoked = state
        .auth
        .is_token_revoked(&token)
        .map_err(SessionError::Internal)?;
    if revoked {
        debug!("Rejected revoked token for {}", claims.sub);
        return Err(SessionError::Rejected);
    }

    let user = state
        .auth
        .find_user_by_email(&claims.sub)
        .map_err(SessionError::Internal)?
        .ok_or_else(|| {
            debug!("Token subject {} has no user row", claims.sub);
            SessionError::Rejected
        })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Session-gate rejection. Both auth variants map to 401.
#[derive(Debug)]
pub enum SessionError {
    MissingToken,
    Rejected,
    Internal(anyhow::Error),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SessionError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "Missing authorization token")
            }
            SessionError::Rejected => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            SessionError::Internal(err) => {
                error!("Session gate database error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_statuses() {
        let missing = SessionError::MissingToken.into_response();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let rejected = SessionError::Rejected.into_response();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

        let internal = SessionError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
