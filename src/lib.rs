//! Rice-mill business-management backend.
//!
//! Bearer-token authentication with a persisted revocation list, enumerated
//! role permissions, and uniform CRUD over the business entity tables.

pub mod app;
pub mod auth;
pub mod config;
pub mod middleware;
pub mod mill;
pub mod notify;
