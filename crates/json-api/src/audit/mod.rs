//! Audit Log

pub(crate) mod index;
