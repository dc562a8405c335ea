//! Authentication: credential storage, bcrypt hashing, JWT issuance and
//! validation, the token revocation list, and the per-request session gate.

pub mod api;
pub mod middleware;
pub mod models;
pub mod password;
pub mod store;
pub mod token;

pub use middleware::session_gate;
pub use models::{Permission, Role, User};
pub use store::AuthStore;
pub use token::{TokenService, ACCESS_TOKEN_TTL_MINUTES};
