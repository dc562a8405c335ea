//! Business entity records and their request payloads.
//!
//! Plain data rows: integer ids, no back-references. Relationships are
//! foreign-id fields resolved by explicit store queries. Every entity has a
//! designated unique field (name, number, or phone depending on the entity)
//! checked before insert.
//!
//! Payload structs mirror the rows minus the id; updates overwrite all
//! mutable fields from the same payload. Warehouse is the one exception
//! with partial-update semantics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiceMill {
    pub id: i64,
    pub rice_mill_name: String,
    pub gst_number: String,
    pub mill_address: String,
    pub phone_number: i64,
    pub rice_mill_capacity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiceMillPayload {
    pub rice_mill_name: String,
    pub gst_number: String,
    pub mill_address: String,
    pub phone_number: i64,
    pub rice_mill_capacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transporter {
    pub id: i64,
    pub transporter_name: String,
    pub transporter_phone_number: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransporterPayload {
    pub transporter_name: String,
    pub transporter_phone_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub id: i64,
    pub truck_number: String,
    pub transporter_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TruckPayload {
    pub truck_number: String,
    pub transporter_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Society {
    pub id: i64,
    pub society_name: String,
    pub distance_from_mill: f64,
    pub transporting_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocietyPayload {
    pub society_name: String,
    pub distance_from_mill: f64,
    pub transporting_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agreement {
    pub id: i64,
    pub agreement_number: String,
    pub type_of_agreement: String,
    pub lot_from: i64,
    pub lot_to: i64,
    pub rice_mill_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgreementPayload {
    pub agreement_number: String,
    pub type_of_agreement: String,
    pub lot_from: i64,
    pub lot_to: i64,
    pub rice_mill_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub warehouse_name: String,
    pub warehouse_transporting_rate: i64,
    pub hamali_rate: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehousePayload {
    pub warehouse_name: String,
    pub warehouse_transporting_rate: i64,
    pub hamali_rate: i64,
}

/// Partial update for warehouses: only fields present in the request body
/// are overwritten.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehousePatch {
    pub warehouse_name: Option<String>,
    pub warehouse_transporting_rate: Option<i64>,
    pub hamali_rate: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kochia {
    pub id: i64,
    pub kochia_name: String,
    pub kochia_phone_number: i64,
    pub rice_mill_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KochiaPayload {
    pub kochia_name: String,
    pub kochia_phone_number: i64,
    pub rice_mill_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: i64,
    pub party_name: String,
    pub party_phone_number: i64,
    pub party_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartyPayload {
    pub party_name: String,
    pub party_phone_number: i64,
    pub party_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    pub id: i64,
    pub broker_name: String,
    pub broker_phone_number: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrokerPayload {
    pub broker_name: String,
    pub broker_phone_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOrder {
    pub id: i64,
    pub do_number: String,
    pub date: String,
    pub total_quantity: f64,
    pub total_bags: i64,
    pub rice_mill_id: i64,
    pub agreement_id: i64,
    pub society_id: i64,
    pub truck_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryOrderPayload {
    pub do_number: String,
    pub date: String,
    pub total_quantity: f64,
    pub total_bags: i64,
    pub rice_mill_id: i64,
    pub agreement_id: i64,
    pub society_id: i64,
    pub truck_id: i64,
}

/// Paddy intake (Dhan Awak) record: one truckload arriving at the mill,
/// with weighbridge figures, bag counts, the bardana breakdown, and where
/// the load went (hopper or stack).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddyIntake {
    pub id: i64,
    pub rst_number: i64,
    pub rice_mill_id: i64,
    pub date: String,
    pub do_id: i64,
    pub society_id: i64,
    pub dm_weight: f64,
    pub number_of_bags: f64,
    pub truck_id: i64,
    pub transporter_id: i64,
    pub transporting_rate: i64,
    pub transporting_total: i64,
    pub jama_jute_22_23: i64,
    pub ek_bharti_21_22: i64,
    pub pds: i64,
    pub miller_purana: f64,
    pub kisan: i64,
    pub bardana_society: i64,
    pub hdpe_22_23: i64,
    pub hdpe_21_22: i64,
    pub hdpe_21_22_one_use: i64,
    pub total_bag_weight: f64,
    pub type_of_paddy: String,
    pub actual_paddy: String,
    pub mill_weight_quintals: f64,
    pub shortage: f64,
    pub bags_put_in_hopper: i64,
    pub bags_put_in_stack: i64,
    pub hopper_rice_mill_id: String,
    pub stack_location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaddyIntakePayload {
    pub rst_number: i64,
    pub rice_mill_id: i64,
    pub date: String,
    pub do_id: i64,
    pub society_id: i64,
    pub dm_weight: f64,
    pub number_of_bags: f64,
    pub truck_id: i64,
    pub transporter_id: i64,
    pub transporting_rate: i64,
    pub transporting_total: i64,
    pub jama_jute_22_23: i64,
    pub ek_bharti_21_22: i64,
    pub pds: i64,
    pub miller_purana: f64,
    pub kisan: i64,
    pub bardana_society: i64,
    pub hdpe_22_23: i64,
    pub hdpe_21_22: i64,
    pub hdpe_21_22_one_use: i64,
    pub total_bag_weight: f64,
    pub type_of_paddy: String,
    pub actual_paddy: String,
    pub mill_weight_quintals: f64,
    pub shortage: f64,
    pub bags_put_in_hopper: i64,
    pub bags_put_in_stack: i64,
    pub hopper_rice_mill_id: String,
    pub stack_location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rice_mill_payload_deserializes() {
        let payload: RiceMillPayload = serde_json::from_str(
            r#"{
                "rice_mill_name": "Shree Ganesh",
                "gst_number": "22AAAAA0000A1Z5",
                "mill_address": "Dhamtari Road",
                "phone_number": 9876543210,
                "rice_mill_capacity": 120.5
            }"#,
        )
        .unwrap();

        assert_eq!(payload.rice_mill_name, "Shree Ganesh");
        assert_eq!(payload.phone_number, 9_876_543_210);
    }

    #[test]
    fn test_warehouse_patch_accepts_sparse_body() {
        let patch: WarehousePatch = serde_json::from_str(r#"{"hamali_rate": 12}"#).unwrap();
        assert!(patch.warehouse_name.is_none());
        assert!(patch.warehouse_transporting_rate.is_none());
        assert_eq!(patch.hamali_rate, Some(12));
    }
}
