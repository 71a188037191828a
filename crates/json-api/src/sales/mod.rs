//! Sales

pub(crate) mod create;
pub(crate) mod history;
