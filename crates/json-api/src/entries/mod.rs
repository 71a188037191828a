//! Purchase Entries

pub(crate) mod create;
