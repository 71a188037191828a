//! Customers

pub mod data;
pub mod records;
mod repository;
pub mod service;

pub use service::*;
