//! Business entity persistence, SQLite-backed.
//!
//! One table per entity, auto-increment integer ids, foreign-id columns for
//! relationships. Create methods run the uniqueness check and the insert in
//! one call and signal a collision with `Ok(None)`; updates and deletes
//! signal a missing id the same way. Every method opens its own connection
//! and releases it on return.

use crate::mill::models::*;
use anyhow::{Context, Result};
use rusqlite::{params, types::ToSql, Connection};
use tracing::info;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS rice_mills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rice_mill_name TEXT UNIQUE NOT NULL,
    gst_number TEXT NOT NULL,
    mill_address TEXT NOT NULL,
    phone_number INTEGER NOT NULL,
    rice_mill_capacity REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS transporters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    transporter_name TEXT UNIQUE NOT NULL,
    transporter_phone_number INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS trucks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    truck_number TEXT UNIQUE NOT NULL,
    transporter_id INTEGER NOT NULL REFERENCES transporters(id)
);

CREATE TABLE IF NOT EXISTS societies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    society_name TEXT UNIQUE NOT NULL,
    distance_from_mill REAL NOT NULL,
    transporting_rate REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS agreements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    agreement_number TEXT UNIQUE NOT NULL,
    type_of_agreement TEXT NOT NULL,
    lot_from INTEGER NOT NULL,
    lot_to INTEGER NOT NULL,
    rice_mill_id INTEGER NOT NULL REFERENCES rice_mills(id)
);

CREATE TABLE IF NOT EXISTS warehouses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    warehouse_name TEXT UNIQUE NOT NULL,
    warehouse_transporting_rate INTEGER NOT NULL,
    hamali_rate INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS kochias (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kochia_name TEXT NOT NULL,
    kochia_phone_number INTEGER UNIQUE NOT NULL,
    rice_mill_id INTEGER NOT NULL REFERENCES rice_mills(id)
);

CREATE TABLE IF NOT EXISTS parties (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    party_name TEXT NOT NULL,
    party_phone_number INTEGER UNIQUE NOT NULL,
    party_address TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS brokers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    broker_name TEXT NOT NULL,
    broker_phone_number INTEGER UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS delivery_orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    do_number TEXT UNIQUE NOT NULL,
    date TEXT NOT NULL,
    total_quantity REAL NOT NULL,
    total_bags INTEGER NOT NULL,
    rice_mill_id INTEGER NOT NULL REFERENCES rice_mills(id),
    agreement_id INTEGER NOT NULL REFERENCES agreements(id),
    society_id INTEGER NOT NULL REFERENCES societies(id),
    truck_id INTEGER NOT NULL REFERENCES trucks(id)
);

CREATE TABLE IF NOT EXISTS paddy_intakes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rst_number INTEGER UNIQUE NOT NULL,
    rice_mill_id INTEGER NOT NULL REFERENCES rice_mills(id),
    date TEXT NOT NULL,
    do_id INTEGER NOT NULL REFERENCES delivery_orders(id),
    society_id INTEGER NOT NULL REFERENCES societies(id),
    dm_weight REAL NOT NULL,
    number_of_bags REAL NOT NULL,
    truck_id INTEGER NOT NULL REFERENCES trucks(id),
    transporter_id INTEGER NOT NULL REFERENCES transporters(id),
    transporting_rate INTEGER NOT NULL,
    transporting_total INTEGER NOT NULL,
    jama_jute_22_23 INTEGER NOT NULL,
    ek_bharti_21_22 INTEGER NOT NULL,
    pds INTEGER NOT NULL,
    miller_purana REAL NOT NULL,
    kisan INTEGER NOT NULL,
    bardana_society INTEGER NOT NULL,
    hdpe_22_23 INTEGER NOT NULL,
    hdpe_21_22 INTEGER NOT NULL,
    hdpe_21_22_one_use INTEGER NOT NULL,
    total_bag_weight REAL NOT NULL,
    type_of_paddy TEXT NOT NULL,
    actual_paddy TEXT NOT NULL,
    mill_weight_quintals REAL NOT NULL,
    shortage REAL NOT NULL,
    bags_put_in_hopper INTEGER NOT NULL,
    bags_put_in_stack INTEGER NOT NULL,
    hopper_rice_mill_id TEXT NOT NULL,
    stack_location TEXT NOT NULL
);
";

/// Store for the eleven business entity tables.
pub struct MillStore {
    db_path: String,
}

impl MillStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };

        let conn = store.open()?;
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to create entity tables")?;
        info!("Entity tables ready at: {}", db_path);

        Ok(store)
    }

    fn open(&self) -> Result<Connection> {
        Connection::open(&self.db_path).context("Failed to open database")
    }

    // ===== Rice mills =====

    pub fn create_rice_mill(&self, p: &RiceMillPayload) -> Result<Option<RiceMill>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM rice_mills WHERE rice_mill_name = ?1",
            &p.rice_mill_name,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO rice_mills
                (rice_mill_name, gst_number, mill_address, phone_number, rice_mill_capacity)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                p.rice_mill_name,
                p.gst_number,
                p.mill_address,
                p.phone_number,
                p.rice_mill_capacity
            ],
        )?;

        Ok(Some(RiceMill {
            id: conn.last_insert_rowid(),
            rice_mill_name: p.rice_mill_name.clone(),
            gst_number: p.gst_number.clone(),
            mill_address: p.mill_address.clone(),
            phone_number: p.phone_number,
            rice_mill_capacity: p.rice_mill_capacity,
        }))
    }

    pub fn list_rice_mills(&self) -> Result<Vec<RiceMill>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM rice_mills ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_rice_mill)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_rice_mill(&self, id: i64) -> Result<Option<RiceMill>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM rice_mills WHERE id = ?1", id, row_to_rice_mill)
    }

    pub fn update_rice_mill(&self, id: i64, p: &RiceMillPayload) -> Result<Option<RiceMill>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE rice_mills SET rice_mill_name = ?1, gst_number = ?2, mill_address = ?3,
                phone_number = ?4, rice_mill_capacity = ?5 WHERE id = ?6",
            params![
                p.rice_mill_name,
                p.gst_number,
                p.mill_address,
                p.phone_number,
                p.rice_mill_capacity,
                id
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(RiceMill {
            id,
            rice_mill_name: p.rice_mill_name.clone(),
            gst_number: p.gst_number.clone(),
            mill_address: p.mill_address.clone(),
            phone_number: p.phone_number,
            rice_mill_capacity: p.rice_mill_capacity,
        }))
    }

    pub fn delete_rice_mill(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM rice_mills WHERE id = ?1", params![id])? > 0)
    }

    // ===== Transporters =====

    pub fn create_transporter(&self, p: &TransporterPayload) -> Result<Option<Transporter>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM transporters WHERE transporter_name = ?1",
            &p.transporter_name,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO transporters (transporter_name, transporter_phone_number)
             VALUES (?1, ?2)",
            params![p.transporter_name, p.transporter_phone_number],
        )?;

        Ok(Some(Transporter {
            id: conn.last_insert_rowid(),
            transporter_name: p.transporter_name.clone(),
            transporter_phone_number: p.transporter_phone_number,
        }))
    }

    pub fn list_transporters(&self) -> Result<Vec<Transporter>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM transporters ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_transporter)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_transporter(&self, id: i64) -> Result<Option<Transporter>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM transporters WHERE id = ?1", id, row_to_transporter)
    }

    pub fn update_transporter(&self, id: i64, p: &TransporterPayload) -> Result<Option<Transporter>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE transporters SET transporter_name = ?1, transporter_phone_number = ?2
             WHERE id = ?3",
            params![p.transporter_name, p.transporter_phone_number, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Transporter {
            id,
            transporter_name: p.transporter_name.clone(),
            transporter_phone_number: p.transporter_phone_number,
        }))
    }

    pub fn delete_transporter(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM transporters WHERE id = ?1", params![id])? > 0)
    }

    // ===== Trucks =====

    pub fn create_truck(&self, p: &TruckPayload) -> Result<Option<Truck>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM trucks WHERE truck_number = ?1",
            &p.truck_number,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO trucks (truck_number, transporter_id) VALUES (?1, ?2)",
            params![p.truck_number, p.transporter_id],
        )?;

        Ok(Some(Truck {
            id: conn.last_insert_rowid(),
            truck_number: p.truck_number.clone(),
            transporter_id: p.transporter_id,
        }))
    }

    pub fn list_trucks(&self) -> Result<Vec<Truck>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM trucks ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_truck)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_truck(&self, id: i64) -> Result<Option<Truck>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM trucks WHERE id = ?1", id, row_to_truck)
    }

    /// Trucks belonging to one transporter (explicit join by foreign id).
    pub fn list_trucks_for_transporter(&self, transporter_id: i64) -> Result<Vec<Truck>> {
        let conn = self.open()?;
        let mut stmt =
            conn.prepare("SELECT * FROM trucks WHERE transporter_id = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![transporter_id], row_to_truck)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn update_truck(&self, id: i64, p: &TruckPayload) -> Result<Option<Truck>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE trucks SET truck_number = ?1, transporter_id = ?2 WHERE id = ?3",
            params![p.truck_number, p.transporter_id, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Truck {
            id,
            truck_number: p.truck_number.clone(),
            transporter_id: p.transporter_id,
        }))
    }

    pub fn delete_truck(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM trucks WHERE id = ?1", params![id])? > 0)
    }

    // ===== Societies =====

    pub fn create_society(&self, p: &SocietyPayload) -> Result<Option<Society>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM societies WHERE society_name = ?1",
            &p.society_name,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO societies (society_name, distance_from_mill, transporting_rate)
             VALUES (?1, ?2, ?3)",
            params![p.society_name, p.distance_from_mill, p.transporting_rate],
        )?;

        Ok(Some(Society {
            id: conn.last_insert_rowid(),
            society_name: p.society_name.clone(),
            distance_from_mill: p.distance_from_mill,
            transporting_rate: p.transporting_rate,
        }))
    }

    pub fn list_societies(&self) -> Result<Vec<Society>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM societies ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_society)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_society(&self, id: i64) -> Result<Option<Society>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM societies WHERE id = ?1", id, row_to_society)
    }

    pub fn update_society(&self, id: i64, p: &SocietyPayload) -> Result<Option<Society>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE societies SET society_name = ?1, distance_from_mill = ?2,
                transporting_rate = ?3 WHERE id = ?4",
            params![p.society_name, p.distance_from_mill, p.transporting_rate, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Society {
            id,
            society_name: p.society_name.clone(),
            distance_from_mill: p.distance_from_mill,
            transporting_rate: p.transporting_rate,
        }))
    }

    pub fn delete_society(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM societies WHERE id = ?1", params![id])? > 0)
    }

    // ===== Agreements =====

    pub fn create_agreement(&self, p: &AgreementPayload) -> Result<Option<Agreement>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM agreements WHERE agreement_number = ?1",
            &p.agreement_number,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO agreements
                (agreement_number, type_of_agreement, lot_from, lot_to, rice_mill_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                p.agreement_number,
                p.type_of_agreement,
                p.lot_from,
                p.lot_to,
                p.rice_mill_id
            ],
        )?;

        Ok(Some(Agreement {
            id: conn.last_insert_rowid(),
            agreement_number: p.agreement_number.clone(),
            type_of_agreement: p.type_of_agreement.clone(),
            lot_from: p.lot_from,
            lot_to: p.lot_to,
            rice_mill_id: p.rice_mill_id,
        }))
    }

    pub fn list_agreements(&self) -> Result<Vec<Agreement>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM agreements ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_agreement)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_agreement(&self, id: i64) -> Result<Option<Agreement>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM agreements WHERE id = ?1", id, row_to_agreement)
    }

    pub fn update_agreement(&self, id: i64, p: &AgreementPayload) -> Result<Option<Agreement>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE agreements SET agreement_number = ?1, type_of_agreement = ?2,
                lot_from = ?3, lot_to = ?4, rice_mill_id = ?5 WHERE id = ?6",
            params![
                p.agreement_number,
                p.type_of_agreement,
                p.lot_from,
                p.lot_to,
                p.rice_mill_id,
                id
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Agreement {
            id,
            agreement_number: p.agreement_number.clone(),
            type_of_agreement: p.type_of_agreement.clone(),
            lot_from: p.lot_from,
            lot_to: p.lot_to,
            rice_mill_id: p.rice_mill_id,
        }))
    }

    pub fn delete_agreement(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM agreements WHERE id = ?1", params![id])? > 0)
    }

    // ===== Warehouses =====

    pub fn create_warehouse(&self, p: &WarehousePayload) -> Result<Option<Warehouse>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM warehouses WHERE warehouse_name = ?1",
            &p.warehouse_name,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO warehouses (warehouse_name, warehouse_transporting_rate, hamali_rate)
             VALUES (?1, ?2, ?3)",
            params![p.warehouse_name, p.warehouse_transporting_rate, p.hamali_rate],
        )?;

        Ok(Some(Warehouse {
            id: conn.last_insert_rowid(),
            warehouse_name: p.warehouse_name.clone(),
            warehouse_transporting_rate: p.warehouse_transporting_rate,
            hamali_rate: p.hamali_rate,
        }))
    }

    pub fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM warehouses ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_warehouse)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_warehouse(&self, id: i64) -> Result<Option<Warehouse>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM warehouses WHERE id = ?1", id, row_to_warehouse)
    }

    /// Partial update: merge provided fields over the existing row.
    pub fn patch_warehouse(&self, id: i64, patch: &WarehousePatch) -> Result<Option<Warehouse>> {
        let existing = match self.get_warehouse(id)? {
            Some(w) => w,
            None => return Ok(None),
        };

        let merged = Warehouse {
            id,
            warehouse_name: patch
                .warehouse_name
                .clone()
                .unwrap_or(existing.warehouse_name),
            warehouse_transporting_rate: patch
                .warehouse_transporting_rate
                .unwrap_or(existing.warehouse_transporting_rate),
            hamali_rate: patch.hamali_rate.unwrap_or(existing.hamali_rate),
        };

        let conn = self.open()?;
        conn.execute(
            "UPDATE warehouses SET warehouse_name = ?1, warehouse_transporting_rate = ?2,
                hamali_rate = ?3 WHERE id = ?4",
            params![
                merged.warehouse_name,
                merged.warehouse_transporting_rate,
                merged.hamali_rate,
                id
            ],
        )?;

        Ok(Some(merged))
    }

    pub fn delete_warehouse(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM warehouses WHERE id = ?1", params![id])? > 0)
    }

    // ===== Kochias =====

    pub fn create_kochia(&self, p: &KochiaPayload) -> Result<Option<Kochia>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM kochias WHERE kochia_phone_number = ?1",
            &p.kochia_phone_number,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO kochias (kochia_name, kochia_phone_number, rice_mill_id)
             VALUES (?1, ?2, ?3)",
            params![p.kochia_name, p.kochia_phone_number, p.rice_mill_id],
        )?;

        Ok(Some(Kochia {
            id: conn.last_insert_rowid(),
            kochia_name: p.kochia_name.clone(),
            kochia_phone_number: p.kochia_phone_number,
            rice_mill_id: p.rice_mill_id,
        }))
    }

    pub fn list_kochias(&self) -> Result<Vec<Kochia>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM kochias ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_kochia)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_kochia(&self, id: i64) -> Result<Option<Kochia>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM kochias WHERE id = ?1", id, row_to_kochia)
    }

    pub fn update_kochia(&self, id: i64, p: &KochiaPayload) -> Result<Option<Kochia>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE kochias SET kochia_name = ?1, kochia_phone_number = ?2, rice_mill_id = ?3
             WHERE id = ?4",
            params![p.kochia_name, p.kochia_phone_number, p.rice_mill_id, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Kochia {
            id,
            kochia_name: p.kochia_name.clone(),
            kochia_phone_number: p.kochia_phone_number,
            rice_mill_id: p.rice_mill_id,
        }))
    }

    pub fn delete_kochia(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM kochias WHERE id = ?1", params![id])? > 0)
    }

    // ===== Parties =====

    pub fn create_party(&self, p: &PartyPayload) -> Result<Option<Party>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM parties WHERE party_phone_number = ?1",
            &p.party_phone_number,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO parties (party_name, party_phone_number, party_address)
             VALUES (?1, ?2, ?3)",
            params![p.party_name, p.party_phone_number, p.party_address],
        )?;

        Ok(Some(Party {
            id: conn.last_insert_rowid(),
            party_name: p.party_name.clone(),
            party_phone_number: p.party_phone_number,
            party_address: p.party_address.clone(),
        }))
    }

    pub fn list_parties(&self) -> Result<Vec<Party>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM parties ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_party)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_party(&self, id: i64) -> Result<Option<Party>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM parties WHERE id = ?1", id, row_to_party)
    }

    pub fn update_party(&self, id: i64, p: &PartyPayload) -> Result<Option<Party>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE parties SET party_name = ?1, party_phone_number = ?2, party_address = ?3
             WHERE id = ?4",
            params![p.party_name, p.party_phone_number, p.party_address, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Party {
            id,
            party_name: p.party_name.clone(),
            party_phone_number: p.party_phone_number,
            party_address: p.party_address.clone(),
        }))
    }

    pub fn delete_party(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM parties WHERE id = ?1", params![id])? > 0)
    }

    // ===== Brokers =====

    pub fn create_broker(&self, p: &BrokerPayload) -> Result<Option<Broker>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM brokers WHERE broker_phone_number = ?1",
            &p.broker_phone_number,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO brokers (broker_name, broker_phone_number) VALUES (?1, ?2)",
            params![p.broker_name, p.broker_phone_number],
        )?;

        Ok(Some(Broker {
            id: conn.last_insert_rowid(),
            broker_name: p.broker_name.clone(),
            broker_phone_number: p.broker_phone_number,
        }))
    }

    pub fn list_brokers(&self) -> Result<Vec<Broker>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM brokers ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_broker)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_broker(&self, id: i64) -> Result<Option<Broker>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM brokers WHERE id = ?1", id, row_to_broker)
    }

    pub fn update_broker(&self, id: i64, p: &BrokerPayload) -> Result<Option<Broker>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE brokers SET broker_name = ?1, broker_phone_number = ?2 WHERE id = ?3",
            params![p.broker_name, p.broker_phone_number, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Broker {
            id,
            broker_name: p.broker_name.clone(),
            broker_phone_number: p.broker_phone_number,
        }))
    }

    pub fn delete_broker(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM brokers WHERE id = ?1", params![id])? > 0)
    }

    // ===== Delivery orders =====

    pub fn create_delivery_order(&self, p: &DeliveryOrderPayload) -> Result<Option<DeliveryOrder>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM delivery_orders WHERE do_number = ?1",
            &p.do_number,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO delivery_orders
                (do_number, date, total_quantity, total_bags,
                 rice_mill_id, agreement_id, society_id, truck_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                p.do_number,
                p.date,
                p.total_quantity,
                p.total_bags,
                p.rice_mill_id,
                p.agreement_id,
                p.society_id,
                p.truck_id
            ],
        )?;

        Ok(Some(DeliveryOrder {
            id: conn.last_insert_rowid(),
            do_number: p.do_number.clone(),
            date: p.date.clone(),
            total_quantity: p.total_quantity,
            total_bags: p.total_bags,
            rice_mill_id: p.rice_mill_id,
            agreement_id: p.agreement_id,
            society_id: p.society_id,
            truck_id: p.truck_id,
        }))
    }

    pub fn list_delivery_orders(&self) -> Result<Vec<DeliveryOrder>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM delivery_orders ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_delivery_order)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_delivery_order(&self, id: i64) -> Result<Option<DeliveryOrder>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM delivery_orders WHERE id = ?1", id, row_to_delivery_order)
    }

    pub fn update_delivery_order(
        &self,
        id: i64,
        p: &DeliveryOrderPayload,
    ) -> Result<Option<DeliveryOrder>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE delivery_orders SET do_number = ?1, date = ?2, total_quantity = ?3,
                total_bags = ?4, rice_mill_id = ?5, agreement_id = ?6, society_id = ?7,
                truck_id = ?8 WHERE id = ?9",
            params![
                p.do_number,
                p.date,
                p.total_quantity,
                p.total_bags,
                p.rice_mill_id,
                p.agreement_id,
                p.society_id,
                p.truck_id,
                id
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(DeliveryOrder {
            id,
            do_number: p.do_number.clone(),
            date: p.date.clone(),
            total_quantity: p.total_quantity,
            total_bags: p.total_bags,
            rice_mill_id: p.rice_mill_id,
            agreement_id: p.agreement_id,
            society_id: p.society_id,
            truck_id: p.truck_id,
        }))
    }

    pub fn delete_delivery_order(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM delivery_orders WHERE id = ?1", params![id])? > 0)
    }

    // ===== Paddy intakes =====

    pub fn create_paddy_intake(&self, p: &PaddyIntakePayload) -> Result<Option<PaddyIntake>> {
        let conn = self.open()?;
        if unique_exists(
            &conn,
            "SELECT COUNT(*) FROM paddy_intakes WHERE rst_number = ?1",
            &p.rst_number,
        )? {
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO paddy_intakes
                (rst_number, rice_mill_id, date, do_id, society_id, dm_weight, number_of_bags,
                 truck_id, transporter_id, transporting_rate, transporting_total,
                 jama_jute_22_23, ek_bharti_21_22, pds, miller_purana, kisan, bardana_society,
                 hdpe_22_23, hdpe_21_22, hdpe_21_22_one_use, total_bag_weight, type_of_paddy,
                 actual_paddy, mill_weight_quintals, shortage, bags_put_in_hopper,
                 bags_put_in_stack, hopper_rice_mill_id, stack_location)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29)",
            params![
                p.rst_number,
                p.rice_mill_id,
                p.date,
                p.do_id,
                p.society_id,
                p.dm_weight,
                p.number_of_bags,
                p.truck_id,
                p.transporter_id,
                p.transporting_rate,
                p.transporting_total,
                p.jama_jute_22_23,
                p.ek_bharti_21_22,
                p.pds,
                p.miller_purana,
                p.kisan,
                p.bardana_society,
                p.hdpe_22_23,
                p.hdpe_21_22,
                p.hdpe_21_22_one_use,
                p.total_bag_weight,
                p.type_of_paddy,
                p.actual_paddy,
                p.mill_weight_quintals,
                p.shortage,
                p.bags_put_in_hopper,
                p.bags_put_in_stack,
                p.hopper_rice_mill_id,
                p.stack_location
            ],
        )?;

        Ok(Some(paddy_intake_from_payload(conn.last_insert_rowid(), p)))
    }

    pub fn list_paddy_intakes(&self) -> Result<Vec<PaddyIntake>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare("SELECT * FROM paddy_intakes ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_paddy_intake)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_paddy_intake(&self, id: i64) -> Result<Option<PaddyIntake>> {
        let conn = self.open()?;
        one_row(&conn, "SELECT * FROM paddy_intakes WHERE id = ?1", id, row_to_paddy_intake)
    }

    pub fn update_paddy_intake(
        &self,
        id: i64,
        p: &PaddyIntakePayload,
    ) -> Result<Option<PaddyIntake>> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE paddy_intakes SET
                rst_number = ?1, rice_mill_id = ?2, date = ?3, do_id = ?4, society_id = ?5,
                dm_weight = ?6, number_of_bags = ?7, truck_id = ?8, transporter_id = ?9,
                transporting_rate = ?10, transporting_total = ?11, jama_jute_22_23 = ?12,
                ek_bharti_21_22 = ?13, pds = ?14, miller_purana = ?15, kisan = ?16,
                bardana_society = ?17, hdpe_22_23 = ?18, hdpe_21_22 = ?19,
                hdpe_21_22_one_use = ?20, total_bag_weight = ?21, type_of_paddy = ?22,
                actual_paddy = ?23, mill_weight_quintals = ?24, shortage = ?25,
                bags_put_in_hopper = ?26, bags_put_in_stack = ?27, hopper_rice_mill_id = ?28,
                stack_location = ?29
             WHERE id = ?30",
            params![
                p.rst_number,
                p.rice_mill_id,
                p.date,
                p.do_id,
                p.society_id,
                p.dm_weight,
                p.number_of_bags,
                p.truck_id,
                p.transporter_id,
                p.transporting_rate,
                p.transporting_total,
                p.jama_jute_22_23,
                p.ek_bharti_21_22,
                p.pds,
                p.miller_purana,
                p.kisan,
                p.bardana_society,
                p.hdpe_22_23,
                p.hdpe_21_22,
                p.hdpe_21_22_one_use,
                p.total_bag_weight,
                p.type_of_paddy,
                p.actual_paddy,
                p.mill_weight_quintals,
                p.shortage,
                p.bags_put_in_hopper,
                p.bags_put_in_stack,
                p.hopper_rice_mill_id,
                p.stack_location,
                id
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(paddy_intake_from_payload(id, p)))
    }

    pub fn delete_paddy_intake(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM paddy_intakes WHERE id = ?1", params![id])? > 0)
    }
}

fn unique_exists(conn: &Connection, count_sql: &str, value: &dyn ToSql) -> Result<bool> {
    let count: i64 = conn.query_row(count_sql, [value], |row| row.get(0))?;
    Ok(count > 0)
}

fn one_row<T>(
    conn: &Connection,
    sql: &str,
    id: i64,
    map: fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
) -> Result<Option<T>> {
    match conn.query_row(sql, params![id], map) {
        Ok(row) => Ok(Some(row)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_rice_mill(row: &rusqlite::Row<'_>) -> rusqlite::Result<RiceMill> {
    Ok(RiceMill {
        id: row.get(0)?,
        rice_mill_name: row.get(1)?,
        gst_number: row.get(2)?,
        mill_address: row.get(3)?,
        phone_number: row.get(4)?,
        rice_mill_capacity: row.get(5)?,
    })
}

fn row_to_transporter(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transporter> {
    Ok(Transporter {
        id: row.get(0)?,
        transporter_name: row.get(1)?,
        transporter_phone_number: row.get(2)?,
    })
}

fn row_to_truck(row: &rusqlite::Row<'_>) -> rusqlite::Result<Truck> {
    Ok(Truck {
        id: row.get(0)?,
        truck_number: row.get(1)?,
        transporter_id: row.get(2)?,
    })
}

fn row_to_society(row: &rusqlite::Row<'_>) -> rusqlite::Result<Society> {
    Ok(Society {
        id: row.get(0)?,
        society_name: row.get(1)?,
        distance_from_mill: row.get(2)?,
        transporting_rate: row.get(3)?,
    })
}

fn row_to_agreement(row: &rusqlite::Row<'_>) -> rusqlite::Result<Agreement> {
    Ok(Agreement {
        id: row.get(0)?,
        agreement_number: row.get(1)?,
        type_of_agreement: row.get(2)?,
        lot_from: row.get(3)?,
        lot_to: row.get(4)?,
        rice_mill_id: row.get(5)?,
    })
}

fn row_to_warehouse(row: &rusqlite::Row<'_>) -> rusqlite::Result<Warehouse> {
    Ok(Warehouse {
        id: row.get(0)?,
        warehouse_name: row.get(1)?,
        warehouse_transporting_rate: row.get(2)?,
        hamali_rate: row.get(3)?,
    })
}

fn row_to_kochia(row: &rusqlite::Row<'_>) -> rusqlite::Result<Kochia> {
    Ok(Kochia {
        id: row.get(0)?,
        kochia_name: row.get(1)?,
        kochia_phone_number: row.get(2)?,
        rice_mill_id: row.get(3)?,
    })
}

fn row_to_party(row: &rusqlite::Row<'_>) -> rusqlite::Result<Party> {
    Ok(Party {
        id: row.get(0)?,
        party_name: row.get(1)?,
        party_phone_number: row.get(2)?,
        party_address: row.get(3)?,
    })
}

fn row_to_broker(row: &rusqlite::Row<'_>) -> rusqlite::Result<Broker> {
    Ok(Broker {
        id: row.get(0)?,
        broker_name: row.get(1)?,
        broker_phone_number: row.get(2)?,
    })
}

fn row_to_delivery_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<DeliveryOrder> {
    Ok(DeliveryOrder {
        id: row.get(0)?,
        do_number: row.get(1)?,
        date: row.get(2)?,
        total_quantity: row.get(3)?,
        total_bags: row.get(4)?,
        rice_mill_id: row.get(5)?,
        agreement_id: row.get(6)?,
        society_id: row.get(7)?,
        truck_id: row.get(8)?,
    })
}

fn row_to_paddy_intake(row: &rusqlite::Row<'_>) -> rusqlite::Result<PaddyIntake> {
    Ok(PaddyIntake {
        id: row.get(0)?,
        rst_number: row.get(1)?,
        rice_mill_id: row.get(2)?,
        date: row.get(3)?,
        do_id: row.get(4)?,
        society_id: row.get(5)?,
        dm_weight: row.get(6)?,
        number_of_bags: row.get(7)?,
        truck_id: row.get(8)?,
        transporter_id: row.get(9)?,
        transporting_rate: row.get(10)?,
        transporting_total: row.get(11)?,
        jama_jute_22_23: row.get(12)?,
        ek_bharti_21_22: row.get(13)?,
        pds: row.get(14)?,
        miller_purana: row.get(15)?,
        kisan: row.get(16)?,
        bardana_society: row.get(17)?,
        hdpe_22_23: row.get(18)?,
        hdpe_21_22: row.get(19)?,
        hdpe_21_22_one_use: row.get(20)?,
        total_bag_weight: row.get(21)?,
        type_of_paddy: row.get(22)?,
        actual_paddy: row.get(23)?,
        mill_weight_quintals: row.get(24)?,
        shortage: row.get(25)?,
        bags_put_in_hopper: row.get(26)?,
        bags_put_in_stack: row.get(27)?,
        hopper_rice_mill_id: row.get(28)?,
        stack_location: row.get(29)?,
    })
}

fn paddy_intake_from_payload(id: i64, p: &PaddyIntakePayload) -> PaddyIntake {
    PaddyIntake {
        id,
        rst_number: p.rst_number,
        rice_mill_id: p.rice_mill_id,
        date: p.date.clone(),
        do_id: p.do_id,
        society_id: p.society_id,
        dm_weight: p.dm_weight,
        number_of_bags: p.number_of_bags,
        truck_id: p.truck_id,
        transporter_id: p.transporter_id,
        transporting_rate: p.transporting_rate,
        transporting_total: p.transporting_total,
        jama_jute_22_23: p.jama_jute_22_23,
        ek_bharti_21_22: p.ek_bharti_21_22,
        pds: p.pds,
        miller_purana: p.miller_purana,
        kisan: p.kisan,
        bardana_society: p.bardana_society,
        hdpe_22_23: p.hdpe_22_23,
        hdpe_21_22: p.hdpe_21_22,
        hdpe_21_22_one_use: p.hdpe_21_22_one_use,
        total_bag_weight: p.total_bag_weight,
        type_of_paddy: p.type_of_paddy.clone(),
        actual_paddy: p.actual_paddy.clone(),
        mill_weight_quintals: p.mill_weight_quintals,
        shortage: p.shortage,
        bags_put_in_hopper: p.bags_put_in_hopper,
        bags_put_in_stack: p.bags_put_in_stack,
        hopper_rice_mill_id: p.hopper_rice_mill_id.clone(),
        stack_location: p.stack_location.clone(),
    }
}
