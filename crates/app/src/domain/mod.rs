//! Point-of-sale domain concerns

pub mod audit;
pub mod catalog;
pub mod customers;
pub mod entries;
pub mod inventory;
pub mod products;
pub mod sales;
pub mod suppliers;
