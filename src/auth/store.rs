//! User and revoked-token persistence, SQLite-backed.
//!
//! Every method opens its own connection and releases it on return, success
//! or failure. Nothing is cached between calls: the session gate re-reads
//! the users and revocation tables on every request.

use crate::auth::models::{Role, User};
use crate::auth::password;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::info;

/// Auth storage: `users` plus the `revoked_tokens` deny-list.
pub struct AuthStore {
    db_path: String,
}

impl AuthStore {
    /// Open (or create) the database and ensure the schema exists.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        // Raw token strings revoked before natural expiry. `revoked_at` is
        // unix seconds, used by the pruner: a row older than the token TTL
        // cannot belong to a still-valid token.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS revoked_tokens (
                token TEXT PRIMARY KEY,
                revoked_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Insert a new user. The caller is expected to have checked email
    /// uniqueness first; the UNIQUE constraint is the backstop.
    pub fn create_user(&self, name: &str, email: &str, plaintext: &str, role: Role) -> Result<User> {
        let password_hash = password::hash_password(plaintext)?;
        let created_at = Utc::now().to_rfc3339();

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO users (name, email, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, email, password_hash, role.as_str(), created_at],
        )
        .context("Failed to insert user")?;

        let id = conn.last_insert_rowid();
        info!("Created user: {} ({})", email, role.as_str());

        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role,
            created_at,
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role, created_at
             FROM users WHERE email = ?1",
        )?;

        let user = stmt.query_row(params![email], row_to_user);
        match user {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role, created_at
             FROM users WHERE id = ?1",
        )?;

        let user = stmt.query_row(params![id], row_to_user);
        match user {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, password_hash, role, created_at FROM users ORDER BY id",
        )?;

        let users = stmt
            .query_map([], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Resolve credentials to a user. Unknown email and wrong password both
    /// come back as `None`; callers must not distinguish them.
    pub fn verify_credentials(&self, email: &str, plaintext: &str) -> Result<Option<User>> {
        match self.find_user_by_email(email)? {
            Some(user) if password::verify_password(plaintext, &user.password_hash) => {
                Ok(Some(user))
            }
            _ => Ok(None),
        }
    }

    /// Set a user's role. Returns `false` when the id does not exist.
    pub fn update_user_role(&self, id: i64, role: Role) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let changed = conn.execute(
            "UPDATE users SET role = ?1 WHERE id = ?2",
            params![role.as_str(), id],
        )?;

        if changed > 0 {
            info!("User {} role set to {}", id, role.as_str());
        }
        Ok(changed > 0)
    }

    /// Add a token to the deny-list. Re-revoking is a no-op, not an error.
    pub fn revoke_token(&self, token: &str) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT OR IGNORE INTO revoked_tokens (token, revoked_at) VALUES (?1, ?2)",
            params![token, Utc::now().timestamp()],
        )
        .context("Failed to revoke token")?;

        Ok(())
    }

    pub fn is_token_revoked(&self, token: &str) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM revoked_tokens WHERE token = ?1",
            params![token],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    /// Delete revocation rows recorded before `cutoff` (unix seconds).
    /// Returns the number of rows removed.
    pub fn prune_revoked_before(&self, cutoff: i64) -> Result<usize> {
        let conn = Connection::open(&self.db_path)?;
        let deleted = conn.execute(
            "DELETE FROM revoked_tokens WHERE revoked_at < ?1",
            params![cutoff],
        )?;

        Ok(deleted)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let role_str: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        // Unknown strings cannot be written through the API; fall back to
        // read-only if one ever appears in the table.
        role: Role::from_str(&role_str).unwrap_or(Role::Viewer),
        created_at: row.get(5)?,
    })
}
