//! Authentication and authorization

mod errors;
mod gate;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use gate::authorize;
pub use models::*;
pub use service::*;
pub use token::*;
