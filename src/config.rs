//! Environment-backed configuration.
//!
//! All settings come from environment variables (a `.env` file is honored),
//! with sensible defaults for local development. The JWT signing secret is
//! the one deliberate exception: a missing `JWT_SECRET` aborts startup.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    /// Optional chat-webhook endpoint for mutation notifications.
    pub notify_webhook_url: Option<String>,
    /// Interval for pruning expired rows out of the revocation list.
    pub revocation_prune_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./ricemill.db".to_string());

        // No fallback secret: running with a guessable signing key is worse
        // than refusing to start.
        let jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET must be set (token signing secret)")?;

        let notify_webhook_url = std::env::var("NOTIFY_WEBHOOK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let revocation_prune_secs = std::env::var("REVOCATION_PRUNE_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(3600);

        Ok(Self {
            port,
            database_path,
            jwt_secret,
            notify_webhook_url,
            revocation_prune_secs,
        })
    }
}

/// Load `.env` from the working directory and the crate directory.
pub fn load_env() {
    let _ = dotenv::dotenv();

    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let candidate = manifest_dir.join(".env");
    if candidate.exists() {
        let _ = dotenv::from_path(&candidate);
    }
}
