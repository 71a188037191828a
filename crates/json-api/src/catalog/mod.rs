//! Categories and Brands

pub(crate) mod brands;
pub(crate) mod categories;
