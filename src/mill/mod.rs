//! Business entities: rice mills, transporters, trucks, societies,
//! agreements, warehouses, kochias, parties, brokers, delivery orders, and
//! paddy intake records.

pub mod api;
pub mod models;
pub mod store;

pub use store::MillStore;
