//! Application state and explicit route-table construction.
//!
//! The router is built by a plain function from state so binaries and
//! integration tests drive the exact same route table.

use crate::auth::{api as auth_api, session_gate, AuthStore, TokenService};
use crate::mill::{api as mill_api, MillStore};
use crate::notify::Notifier;
use axum::{
    middleware,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthStore>,
    pub mill: Arc<MillStore>,
    pub tokens: Arc<TokenService>,
    pub notifier: Notifier,
}

/// Build the full route table. Auth endpoints and the health probe are
/// public; everything else sits behind the session gate.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth_api::register))
        .route("/auth/login", post(auth_api::login))
        .route("/auth/logout", post(auth_api::logout))
        .with_state(state.clone());

    let gated_routes = Router::new()
        .route("/auth/me", get(auth_api::current_user))
        .route("/roles", get(auth_api::list_roles))
        .route("/users", get(auth_api::list_users))
        .route("/users/:id/role", put(auth_api::update_user_role))
        .route("/rice-mills", post(mill_api::create_rice_mill))
        .route("/rice-mills", get(mill_api::list_rice_mills))
        .route("/rice-mills/:id", get(mill_api::get_rice_mill))
        .route("/rice-mills/:id", put(mill_api::update_rice_mill))
        .route("/rice-mills/:id", delete(mill_api::delete_rice_mill))
        .route("/transporters", post(mill_api::create_transporter))
        .route("/transporters", get(mill_api::list_transporters))
        .route("/transporters/:id", get(mill_api::get_transporter))
        .route("/transporters/:id", put(mill_api::update_transporter))
        .route("/transporters/:id", delete(mill_api::delete_transporter))
        .route(
            "/transporters/:id/trucks",
            get(mill_api::list_transporter_trucks),
        )
        .route("/trucks", post(mill_api::create_truck))
        .route("/trucks", get(mill_api::list_trucks))
        .route("/trucks/:id", get(mill_api::get_truck))
        .route("/trucks/:id", put(mill_api::update_truck))
        .route("/trucks/:id", delete(mill_api::delete_truck))
        .route("/societies", post(mill_api::create_society))
        .route("/societies", get(mill_api::list_societies))
        .route("/societies/:id", get(mill_api::get_society))
        .route("/societies/:id", put(mill_api::update_society))
        .route("/societies/:id", delete(mill_api::delete_society))
        .route("/agreements", post(mill_api::create_agreement))
        .route("/agreements", get(mill_api::list_agreements))
        .route("/agreements/:id", get(mill_api::get_agreement))
        .route("/agreements/:id", put(mill_api::update_agreement))
        .route("/agreements/:id", delete(mill_api::delete_agreement))
        .route("/warehouses", post(mill_api::create_warehouse))
        .route("/warehouses", get(mill_api::list_warehouses))
        .route("/warehouses/:id", get(mill_api::get_warehouse))
        // Warehouses take a partial update under the same verb.
        .route("/warehouses/:id", put(mill_api::patch_warehouse))
        .route("/warehouses/:id", delete(mill_api::delete_warehouse))
        .route("/kochias", post(mill_api::create_kochia))
        .route("/kochias", get(mill_api::list_kochias))
        .route("/kochias/:id", get(mill_api::get_kochia))
        .route("/kochias/:id", put(mill_api::update_kochia))
        .route("/kochias/:id", delete(mill_api::delete_kochia))
        .route("/parties", post(mill_api::create_party))
        .route("/parties", get(mill_api::list_parties))
        .route("/parties/:id", get(mill_api::get_party))
        .route("/parties/:id", put(mill_api::update_party))
        .route("/parties/:id", delete(mill_api::delete_party))
        .route("/brokers", post(mill_api::create_broker))
        .route("/brokers", get(mill_api::list_brokers))
        .route("/brokers/:id", get(mill_api::get_broker))
        .route("/brokers/:id", put(mill_api::update_broker))
        .route("/brokers/:id", delete(mill_api::delete_broker))
        .route("/delivery-orders", post(mill_api::create_delivery_order))
        .route("/delivery-orders", get(mill_api::list_delivery_orders))
        .route("/delivery-orders/:id", get(mill_api::get_delivery_order))
        .route("/delivery-orders/:id", put(mill_api::update_delivery_order))
        .route(
            "/delivery-orders/:id",
            delete(mill_api::delete_delivery_order),
        )
        .route("/paddy-intakes", post(mill_api::create_paddy_intake))
        .route("/paddy-intakes", get(mill_api::list_paddy_intakes))
        .route("/paddy-intakes/:id", get(mill_api::get_paddy_intake))
        .route("/paddy-intakes/:id", put(mill_api::update_paddy_intake))
        .route("/paddy-intakes/:id", delete(mill_api::delete_paddy_intake))
        .route_layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(gated_routes)
        .layer(middleware::from_fn(crate::middleware::request_logging))
        .layer(CorsLayer::permissive())
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
