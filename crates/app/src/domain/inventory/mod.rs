//! Inventory

pub mod data;
pub mod errors;
mod ledger;
pub mod records;
mod repository;
pub mod service;
mod store;

pub use errors::InventoryServiceError;
pub use ledger::*;
pub use service::*;
pub use store::PgLedgerStore;
