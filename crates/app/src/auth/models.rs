//! Auth data models.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TypedId;

/// User Record
pub struct UserRecord;

/// User Id
pub type UserId = TypedId<UserRecord>;

/// Closed set of roles a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Administrador")]
    Administrator,

    #[serde(rename = "Vendedor")]
    Seller,
}

impl Role {
    /// Role name as stored in `roles.nombre_rol`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "Administrador",
            Self::Seller => "Vendedor",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Administrador" => Ok(Self::Administrator),
            "Vendedor" => Ok(Self::Seller),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub display_name: String,
    pub role: Option<Role>,
}

/// Login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Registration form.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub display_name: String,
    pub login: String,
    pub password: String,
    pub role_id: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("display_name", &self.display_name)
            .field("login", &self.login)
            .field("password", &"**redacted**")
            .field("role_id", &self.role_id)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub identity: Identity,
}

/// Row returned by `sp_validar_login`.
#[derive(Debug, Clone)]
pub(crate) struct LoginRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub password_hash: String,
    pub role_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_through_their_stored_names() {
        for role in [Role::Administrator, Role::Seller] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn unknown_role_names_are_rejected() {
        assert_eq!(
            "Cajero".parse::<Role>(),
            Err(UnknownRole("Cajero".to_string()))
        );
    }

    #[test]
    fn debug_output_hides_passwords() {
        let credentials = Credentials {
            login: "ana".to_string(),
            password: "hunter2".to_string(),
        };

        assert!(!format!("{credentials:?}").contains("hunter2"));
    }
}
