//! CRUD endpoints for the business entities.
//!
//! The contract is uniform: create is a 409 when the designated unique
//! field collides, read/update/delete are a 404 for a missing id, updates
//! overwrite every mutable field (warehouses alone take a partial patch),
//! deletes are hard deletes. Mutations fire a notification message and are
//! permission-checked against the caller's role.

use crate::app::AppState;
use crate::auth::models::{Permission, User};
use crate::mill::models::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;

fn require(user: &User, permission: Permission) -> Result<(), ApiError> {
    if user.role.allows(permission) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

// ===== Rice mills =====

pub async fn create_rice_mill(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<RiceMillPayload>,
) -> Result<(StatusCode, Json<RiceMill>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_rice_mill(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Rice mill with this name already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New rice mill added: {}", record.rice_mill_name));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_rice_mills(State(state): State<AppState>) -> Result<Json<Vec<RiceMill>>, ApiError> {
    Ok(Json(state.mill.list_rice_mills()?))
}

pub async fn get_rice_mill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RiceMill>, ApiError> {
    state
        .mill
        .get_rice_mill(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Rice mill {} not found", id)))
}

pub async fn update_rice_mill(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<RiceMillPayload>,
) -> Result<Json<RiceMill>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_rice_mill(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Rice mill {} not found", id)))?;
    state
        .notifier
        .send(format!("Rice mill updated: {}", record.rice_mill_name));
    Ok(Json(record))
}

pub async fn delete_rice_mill(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_rice_mill(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Rice mill {} not found", id)))?;
    state.mill.delete_rice_mill(id)?;
    state
        .notifier
        .send(format!("Rice mill deleted: {}", record.rice_mill_name));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Transporters =====

pub async fn create_transporter(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<TransporterPayload>,
) -> Result<(StatusCode, Json<Transporter>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_transporter(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Transporter with this name already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New transporter added: {}", record.transporter_name));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_transporters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transporter>>, ApiError> {
    Ok(Json(state.mill.list_transporters()?))
}

pub async fn get_transporter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Transporter>, ApiError> {
    state
        .mill
        .get_transporter(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Transporter {} not found", id)))
}

pub async fn update_transporter(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<TransporterPayload>,
) -> Result<Json<Transporter>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_transporter(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Transporter {} not found", id)))?;
    state
        .notifier
        .send(format!("Transporter updated: {}", record.transporter_name));
    Ok(Json(record))
}

pub async fn delete_transporter(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_transporter(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Transporter {} not found", id)))?;
    state.mill.delete_transporter(id)?;
    state
        .notifier
        .send(format!("Transporter deleted: {}", record.transporter_name));
    Ok(StatusCode::NO_CONTENT)
}

/// Trucks registered under one transporter.
pub async fn list_transporter_trucks(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Truck>>, ApiError> {
    state
        .mill
        .get_transporter(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Transporter {} not found", id)))?;
    Ok(Json(state.mill.list_trucks_for_transporter(id)?))
}

// ===== Trucks =====

pub async fn create_truck(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<TruckPayload>,
) -> Result<(StatusCode, Json<Truck>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state
        .mill
        .create_truck(&payload)?
        .ok_or_else(|| ApiError::DuplicateKey("Truck with this number already exists".to_string()))?;
    state
        .notifier
        .send(format!("New truck added: {}", record.truck_number));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_trucks(State(state): State<AppState>) -> Result<Json<Vec<Truck>>, ApiError> {
    Ok(Json(state.mill.list_trucks()?))
}

pub async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Truck>, ApiError> {
    state
        .mill
        .get_truck(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Truck {} not found", id)))
}

pub async fn update_truck(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<TruckPayload>,
) -> Result<Json<Truck>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_truck(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Truck {} not found", id)))?;
    state
        .notifier
        .send(format!("Truck updated: {}", record.truck_number));
    Ok(Json(record))
}

pub async fn delete_truck(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_truck(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Truck {} not found", id)))?;
    state.mill.delete_truck(id)?;
    state
        .notifier
        .send(format!("Truck deleted: {}", record.truck_number));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Societies =====

pub async fn create_society(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<SocietyPayload>,
) -> Result<(StatusCode, Json<Society>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_society(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Society with this name already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New society added: {}", record.society_name));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_societies(State(state): State<AppState>) -> Result<Json<Vec<Society>>, ApiError> {
    Ok(Json(state.mill.list_societies()?))
}

pub async fn get_society(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Society>, ApiError> {
    state
        .mill
        .get_society(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Society {} not found", id)))
}

pub async fn update_society(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<SocietyPayload>,
) -> Result<Json<Society>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_society(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Society {} not found", id)))?;
    state
        .notifier
        .send(format!("Society updated: {}", record.society_name));
    Ok(Json(record))
}

pub async fn delete_society(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_society(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Society {} not found", id)))?;
    state.mill.delete_society(id)?;
    state
        .notifier
        .send(format!("Society deleted: {}", record.society_name));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Agreements =====

pub async fn create_agreement(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<AgreementPayload>,
) -> Result<(StatusCode, Json<Agreement>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_agreement(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Agreement with this number already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New agreement added: {}", record.agreement_number));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_agreements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Agreement>>, ApiError> {
    Ok(Json(state.mill.list_agreements()?))
}

pub async fn get_agreement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Agreement>, ApiError> {
    state
        .mill
        .get_agreement(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Agreement {} not found", id)))
}

pub async fn update_agreement(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<AgreementPayload>,
) -> Result<Json<Agreement>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_agreement(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Agreement {} not found", id)))?;
    state
        .notifier
        .send(format!("Agreement updated: {}", record.agreement_number));
    Ok(Json(record))
}

pub async fn delete_agreement(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_agreement(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Agreement {} not found", id)))?;
    state.mill.delete_agreement(id)?;
    state
        .notifier
        .send(format!("Agreement deleted: {}", record.agreement_number));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Warehouses =====

pub async fn create_warehouse(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<WarehousePayload>,
) -> Result<(StatusCode, Json<Warehouse>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_warehouse(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Warehouse with this name already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New warehouse added: {}", record.warehouse_name));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_warehouses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Warehouse>>, ApiError> {
    Ok(Json(state.mill.list_warehouses()?))
}

pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Warehouse>, ApiError> {
    state
        .mill
        .get_warehouse(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Warehouse {} not found", id)))
}

/// The one partial-update endpoint: only fields present in the body change.
pub async fn patch_warehouse(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(patch): Json<WarehousePatch>,
) -> Result<Json<Warehouse>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .patch_warehouse(id, &patch)?
        .ok_or_else(|| ApiError::NotFound(format!("Warehouse {} not found", id)))?;
    state
        .notifier
        .send(format!("Warehouse updated: {}", record.warehouse_name));
    Ok(Json(record))
}

pub async fn delete_warehouse(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_warehouse(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Warehouse {} not found", id)))?;
    state.mill.delete_warehouse(id)?;
    state
        .notifier
        .send(format!("Warehouse deleted: {}", record.warehouse_name));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Kochias =====

pub async fn create_kochia(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<KochiaPayload>,
) -> Result<(StatusCode, Json<Kochia>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_kochia(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Kochia with this phone number already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New kochia added: {}", record.kochia_name));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_kochias(State(state): State<AppState>) -> Result<Json<Vec<Kochia>>, ApiError> {
    Ok(Json(state.mill.list_kochias()?))
}

pub async fn get_kochia(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Kochia>, ApiError> {
    state
        .mill
        .get_kochia(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Kochia {} not found", id)))
}

pub async fn update_kochia(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<KochiaPayload>,
) -> Result<Json<Kochia>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_kochia(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Kochia {} not found", id)))?;
    state
        .notifier
        .send(format!("Kochia updated: {}", record.kochia_name));
    Ok(Json(record))
}

pub async fn delete_kochia(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_kochia(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Kochia {} not found", id)))?;
    state.mill.delete_kochia(id)?;
    state
        .notifier
        .send(format!("Kochia deleted: {}", record.kochia_name));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Parties =====

pub async fn create_party(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<PartyPayload>,
) -> Result<(StatusCode, Json<Party>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_party(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Party with this phone number already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New party added: {}", record.party_name));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_parties(State(state): State<AppState>) -> Result<Json<Vec<Party>>, ApiError> {
    Ok(Json(state.mill.list_parties()?))
}

pub async fn get_party(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Party>, ApiError> {
    state
        .mill
        .get_party(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Party {} not found", id)))
}

pub async fn update_party(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<PartyPayload>,
) -> Result<Json<Party>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_party(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Party {} not found", id)))?;
    state
        .notifier
        .send(format!("Party updated: {}", record.party_name));
    Ok(Json(record))
}

pub async fn delete_party(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_party(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Party {} not found", id)))?;
    state.mill.delete_party(id)?;
    state
        .notifier
        .send(format!("Party deleted: {}", record.party_name));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Brokers =====

pub async fn create_broker(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<BrokerPayload>,
) -> Result<(StatusCode, Json<Broker>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_broker(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Broker with this phone number already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New broker added: {}", record.broker_name));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_brokers(State(state): State<AppState>) -> Result<Json<Vec<Broker>>, ApiError> {
    Ok(Json(state.mill.list_brokers()?))
}

pub async fn get_broker(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Broker>, ApiError> {
    state
        .mill
        .get_broker(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Broker {} not found", id)))
}

pub async fn update_broker(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<BrokerPayload>,
) -> Result<Json<Broker>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_broker(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Broker {} not found", id)))?;
    state
        .notifier
        .send(format!("Broker updated: {}", record.broker_name));
    Ok(Json(record))
}

pub async fn delete_broker(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_broker(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Broker {} not found", id)))?;
    state.mill.delete_broker(id)?;
    state
        .notifier
        .send(format!("Broker deleted: {}", record.broker_name));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Delivery orders =====

pub async fn create_delivery_order(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<DeliveryOrderPayload>,
) -> Result<(StatusCode, Json<DeliveryOrder>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_delivery_order(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Delivery order with this DO number already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New delivery order added: {}", record.do_number));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_delivery_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeliveryOrder>>, ApiError> {
    Ok(Json(state.mill.list_delivery_orders()?))
}

pub async fn get_delivery_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeliveryOrder>, ApiError> {
    state
        .mill
        .get_delivery_order(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Delivery order {} not found", id)))
}

pub async fn update_delivery_order(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<DeliveryOrderPayload>,
) -> Result<Json<DeliveryOrder>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_delivery_order(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Delivery order {} not found", id)))?;
    state
        .notifier
        .send(format!("Delivery order updated: {}", record.do_number));
    Ok(Json(record))
}

pub async fn delete_delivery_order(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_delivery_order(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Delivery order {} not found", id)))?;
    state.mill.delete_delivery_order(id)?;
    state
        .notifier
        .send(format!("Delivery order deleted: {}", record.do_number));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Paddy intakes =====

pub async fn create_paddy_intake(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<PaddyIntakePayload>,
) -> Result<(StatusCode, Json<PaddyIntake>), ApiError> {
    require(&user, Permission::CreateRecords)?;
    let record = state.mill.create_paddy_intake(&payload)?.ok_or_else(|| {
        ApiError::DuplicateKey("Paddy intake with this RST number already exists".to_string())
    })?;
    state
        .notifier
        .send(format!("New paddy intake added: RST {}", record.rst_number));
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_paddy_intakes(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaddyIntake>>, ApiError> {
    Ok(Json(state.mill.list_paddy_intakes()?))
}

pub async fn get_paddy_intake(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PaddyIntake>, ApiError> {
    state
        .mill
        .get_paddy_intake(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Paddy intake {} not found", id)))
}

pub async fn update_paddy_intake(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<PaddyIntakePayload>,
) -> Result<Json<PaddyIntake>, ApiError> {
    require(&user, Permission::EditRecords)?;
    let record = state
        .mill
        .update_paddy_intake(id, &payload)?
        .ok_or_else(|| ApiError::NotFound(format!("Paddy intake {} not found", id)))?;
    state
        .notifier
        .send(format!("Paddy intake updated: RST {}", record.rst_number));
    Ok(Json(record))
}

pub async fn delete_paddy_intake(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    require(&user, Permission::DeleteRecords)?;
    let record = state
        .mill
        .get_paddy_intake(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Paddy intake {} not found", id)))?;
    state.mill.delete_paddy_intake(id)?;
    state
        .notifier
        .send(format!("Paddy intake deleted: RST {}", record.rst_number));
    Ok(StatusCode::NO_CONTENT)
}

// ===== Error handling =====

#[derive(Debug)]
pub enum ApiError {
    DuplicateKey(String),
    NotFound(String),
    Forbidden,
    Database(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::DuplicateKey(msg) => (StatusCode::CONFLICT, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Insufficient permissions".to_string(),
            ),
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
