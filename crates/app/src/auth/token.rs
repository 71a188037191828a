//! Signed session tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::auth::{AuthError, Identity, Role, UserId};

/// Lifetime of an issued token unless configured otherwise.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(8);

/// Secret used when no `JWT_SECRET` is configured.
const FALLBACK_SECRET: &str = "caja-dev-secret-change-me";

/// HMAC secret for signing and verifying tokens.
#[derive(Clone)]
pub struct JwtSecret {
    bytes: Vec<u8>,
}

impl JwtSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            bytes: secret.into().into_bytes(),
        }
    }

    /// Use the configured secret, or fall back to the built-in one.
    ///
    /// A missing or blank secret is logged at warn level.
    #[must_use]
    pub fn from_config(secret: Option<String>) -> Self {
        match secret.filter(|secret| !secret.trim().is_empty()) {
            Some(secret) => Self::new(secret),
            None => {
                warn!(
                    security = true,
                    "JWT_SECRET is not set, tokens are signed with the built-in fallback secret"
                );

                Self::new(FALLBACK_SECRET)
            }
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(**redacted**)")
    }
}

impl Drop for JwtSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id_usuario: i32,
    pub nombre: String,
    pub rol: Option<Role>,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: UserId::new(claims.id_usuario),
            display_name: claims.nombre,
            role: claims.rol,
        }
    }
}

/// Issues tokens at login and verifies them on every request.
///
/// Verification never touches the database: everything it needs travels in
/// the signed claims.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: SignedDuration,
}

impl TokenAuthority {
    #[must_use]
    pub fn new(secret: &JwtSecret, ttl: SignedDuration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Sign a token for `identity` valid from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(identity, Timestamp::now())
    }

    /// Sign a token for `identity` as if issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue_at(
        &self,
        identity: &Identity,
        issued_at: Timestamp,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = issued_at.as_second();

        let claims = Claims {
            id_usuario: identity.user_id.into_inner(),
            nombre: identity.display_name.clone(),
            rol: identity.role,
            iat,
            exp: iat.saturating_add(self.ttl.as_secs()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Decode and check a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for a bad signature, an expired
    /// token, or a malformed payload.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.into())
            .map_err(|error| {
                debug!("rejected bearer token: {error}");

                AuthError::InvalidToken
            })
    }

    /// Verify the value of an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingToken`] when the header is absent or is not
    /// a `Bearer` credential, otherwise as [`TokenAuthority::verify`].
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        let token = header
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        self.verify(token)
    }
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
