//! Access-token issuance and validation.
//!
//! Tokens are HS256-signed JWTs carrying the subject email and an absolute
//! expiry. Issuance is stateless; the revocation list in the store is the
//! only persisted token state.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed access-token lifetime.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email).
    pub sub: String,
    /// Expiration timestamp (unix seconds).
    pub exp: usize,
}

/// Why a token failed validation. Both kinds map to the same 401 at the API
/// boundary; the split exists for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Unparseable token or bad signature.
    Malformed,
    /// Valid signature, past expiry.
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "malformed token"),
            TokenError::Expired => write!(f, "expired token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Signs and verifies access tokens with a server-held secret.
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issue a fresh token for `subject`, expiring in 30 minutes.
    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token whose expiry is measured from `now`. Split out so tests
    /// can mint already-expired tokens without sleeping.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String> {
        let expiry = now
            .checked_add_signed(Duration::minutes(ACCESS_TOKEN_TTL_MINUTES))
            .context("Invalid expiry timestamp")?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: expiry.timestamp() as usize,
        };

        debug!("Issuing token for {} (expires {})", subject, expiry);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")
    }

    /// Verify signature and expiry, returning the claims on success.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // Expiry is exact. The library default allows 60s of clock skew.
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })
    }
}
