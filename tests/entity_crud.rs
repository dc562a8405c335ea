//! Entity CRUD contracts over the real route table.

mod common;

use axum::http::StatusCode;
use common::{body_json, test_app};
use serde_json::json;

fn rice_mill_payload() -> serde_json::Value {
    json!({
        "rice_mill_name": "Shree Ganesh",
        "gst_number": "22AAAAA0000A1Z5",
        "mill_address": "Dhamtari Road",
        "phone_number": 9876543210i64,
        "rice_mill_capacity": 120.5,
    })
}

#[tokio::test]
async fn rice_mill_crud_lifecycle() {
    let app = test_app();
    let token = app.register_and_login("A", "a@x.com", "p").await;

    // Create.
    let response = app
        .request("POST", "/rice-mills", Some(&token), Some(rice_mill_payload()))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["rice_mill_name"], "Shree Ganesh");

    // Duplicate name conflicts and leaves one row.
    let response = app
        .request("POST", "/rice-mills", Some(&token), Some(rice_mill_payload()))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.request("GET", "/rice-mills", Some(&token), None).await;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Read by id.
    let response = app
        .request("GET", &format!("/rice-mills/{}", id), Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Full-overwrite update.
    let mut update = rice_mill_payload();
    update["mill_address"] = json!("New Address");
    let response = app
        .request(
            "PUT",
            &format!("/rice-mills/{}", id),
            Some(&token),
            Some(update),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["mill_address"], "New Address");

    // Hard delete, then 404.
    let response = app
        .request("DELETE", &format!("/rice-mills/{}", id), Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/rice-mills/{}", id), Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", &format!("/rice-mills/{}", id), Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn entity_routes_require_a_session() {
    let app = test_app();

    let response = app.request("GET", "/rice-mills", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request("POST", "/trucks", None, Some(json!({ "truck_number": "X" })))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn trucks_reference_their_transporter() {
    let app = test_app();
    let token = app.register_and_login("A", "a@x.com", "p").await;

    let response = app
        .request(
            "POST",
            "/transporters",
            Some(&token),
            Some(json!({
                "transporter_name": "Sharma Transport",
                "transporter_phone_number": 9000000001i64,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let transporter = body_json(response).await;
    let transporter_id = transporter["id"].as_i64().unwrap();

    let response = app
        .request(
            "POST",
            "/trucks",
            Some(&token),
            Some(json!({
                "truck_number": "CG04-1111",
                "transporter_id": transporter_id,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let truck = body_json(response).await;
    assert_eq!(truck["transporter_id"], transporter_id);

    // Duplicate truck number → 409.
    let response = app
        .request(
            "POST",
            "/trucks",
            Some(&token),
            Some(json!({
                "truck_number": "CG04-1111",
                "transporter_id": transporter_id,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The transporter's truck listing sees the one truck.
    let response = app
        .request(
            "GET",
            &format!("/transporters/{}/trucks", transporter_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let trucks = body_json(response).await;
    assert_eq!(trucks.as_array().unwrap().len(), 1);
    assert_eq!(trucks[0]["truck_number"], "CG04-1111");

    // Unknown transporter → 404, not an empty list.
    let response = app
        .request("GET", "/transporters/9999/trucks", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn uniform_crud_contract_across_remaining_entities() {
    let app = test_app();
    let token = app.register_and_login("A", "a@x.com", "p").await;

    // (path, create body, field changed by the update, new value)
    let cases = [
        (
            "/agreements",
            json!({
                "agreement_number": "AG-2024-77",
                "type_of_agreement": "Paddy",
                "lot_from": 1,
                "lot_to": 40,
                "rice_mill_id": 1,
            }),
            "type_of_agreement",
            json!("Custom Milling"),
        ),
        (
            "/kochias",
            json!({
                "kochia_name": "Ramesh",
                "kochia_phone_number": 9111111111i64,
                "rice_mill_id": 1,
            }),
            "kochia_name",
            json!("Ramesh Kumar"),
        ),
        (
            "/parties",
            json!({
                "party_name": "Gupta Traders",
                "party_phone_number": 9222222222i64,
                "party_address": "Raipur",
            }),
            "party_address",
            json!("Bilaspur"),
        ),
        (
            "/brokers",
            json!({
                "broker_name": "Mohan",
                "broker_phone_number": 9333333333i64,
            }),
            "broker_name",
            json!("Mohan Lal"),
        ),
    ];

    for (path, create, field, new_value) in cases {
        // Create.
        let response = app
            .request("POST", path, Some(&token), Some(create.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED, "{}", path);
        let created = body_json(response).await;
        let id = created["id"].as_i64().unwrap();

        // Second create on the same unique field conflicts.
        let response = app
            .request("POST", path, Some(&token), Some(create.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT, "{}", path);

        let item = format!("{}/{}", path, id);

        // Read by id.
        let response = app.request("GET", &item, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);

        // Full-overwrite update, then the read reflects it.
        let mut update = create.clone();
        update[field] = new_value.clone();
        let response = app
            .request("PUT", &item, Some(&token), Some(update))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);

        let response = app.request("GET", &item, Some(&token), None).await;
        let reread = body_json(response).await;
        assert_eq!(reread[field], new_value, "{}", path);

        // Hard delete, then every id-keyed verb is a 404.
        let response = app.request("DELETE", &item, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{}", path);

        let response = app.request("GET", &item, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);

        let response = app
            .request("PUT", &item, Some(&token), Some(create.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);

        let response = app.request("DELETE", &item, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn warehouse_update_is_partial() {
    let app = test_app();
    let token = app.register_and_login("A", "a@x.com", "p").await;

    let response = app
        .request(
            "POST",
            "/warehouses",
            Some(&token),
            Some(json!({
                "warehouse_name": "Main Godown",
                "warehouse_transporting_rate": 40,
                "hamali_rate": 8,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let warehouse = body_json(response).await;
    let id = warehouse["id"].as_i64().unwrap();

    // Sparse body: only hamali_rate changes.
    let response = app
        .request(
            "PUT",
            &format!("/warehouses/{}", id),
            Some(&token),
            Some(json!({ "hamali_rate": 12 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["warehouse_name"], "Main Godown");
    assert_eq!(patched["warehouse_transporting_rate"], 40);
    assert_eq!(patched["hamali_rate"], 12);
}

#[tokio::test]
async fn viewer_cannot_mutate_operator_cannot_delete() {
    let app = test_app();
    let admin_token = app.register_and_login("Admin", "admin@x.com", "p").await;

    for (email, role) in [("viewer@x.com", "viewer"), ("op@x.com", "operator")] {
        let response = app
            .request(
                "POST",
                "/auth/register",
                None,
                Some(json!({
                    "name": "U",
                    "email": email,
                    "password": "p",
                    "role": role,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let viewer_token = app.login("viewer@x.com", "p").await;
    let operator_token = app.login("op@x.com", "p").await;

    // Viewer: reads work, create does not.
    let response = app
        .request("GET", "/societies", Some(&viewer_token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let society = json!({
        "society_name": "Kurud",
        "distance_from_mill": 14.0,
        "transporting_rate": 9.5,
    });
    let response = app
        .request("POST", "/societies", Some(&viewer_token), Some(society.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Operator: create works, delete does not.
    let response = app
        .request("POST", "/societies", Some(&operator_token), Some(society))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(
            "DELETE",
            &format!("/societies/{}", id),
            Some(&operator_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin can delete.
    let response = app
        .request(
            "DELETE",
            &format!("/societies/{}", id),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delivery_order_and_paddy_intake_round_trip() {
    let app = test_app();
    let token = app.register_and_login("A", "a@x.com", "p").await;

    let response = app
        .request(
            "POST",
            "/delivery-orders",
            Some(&token),
            Some(json!({
                "do_number": "DO-2024-17",
                "date": "2024-11-12",
                "total_quantity": 402.5,
                "total_bags": 1000,
                "rice_mill_id": 1,
                "agreement_id": 1,
                "society_id": 1,
                "truck_id": 1,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;
    let do_id = order["id"].as_i64().unwrap();

    let intake = json!({
        "rst_number": 1001,
        "rice_mill_id": 1,
        "date": "2024-11-12",
        "do_id": do_id,
        "society_id": 1,
        "dm_weight": 402.5,
        "number_of_bags": 1000.0,
        "truck_id": 1,
        "transporter_id": 1,
        "transporting_rate": 18,
        "transporting_total": 7245,
        "jama_jute_22_23": 300,
        "ek_bharti_21_22": 100,
        "pds": 50,
        "miller_purana": 25.0,
        "kisan": 200,
        "bardana_society": 150,
        "hdpe_22_23": 80,
        "hdpe_21_22": 60,
        "hdpe_21_22_one_use": 35,
        "total_bag_weight": 0.58,
        "type_of_paddy": "Mota",
        "actual_paddy": "Sarna",
        "mill_weight_quintals": 400.1,
        "shortage": 2.4,
        "bags_put_in_hopper": 700,
        "bags_put_in_stack": 300,
        "hopper_rice_mill_id": "Hopper-2",
        "stack_location": "Yard B",
    });

    let response = app
        .request("POST", "/paddy-intakes", Some(&token), Some(intake.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["rst_number"], 1001);
    assert_eq!(created["stack_location"], "Yard B");

    // Duplicate RST number → 409.
    let response = app
        .request("POST", "/paddy-intakes", Some(&token), Some(intake))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
