//! Authentication

pub(crate) mod gate;
pub(crate) mod login;
pub(crate) mod middleware;
pub(crate) mod register;
