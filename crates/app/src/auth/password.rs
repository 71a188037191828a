//! Password hashing.

use tokio::task::spawn_blocking;

use crate::auth::AuthServiceError;

/// bcrypt work factor for new hashes.
pub(crate) const BCRYPT_COST: u32 = 10;

pub(crate) async fn hash_password(password: String) -> Result<String, AuthServiceError> {
    Ok(spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST)).await??)
}

pub(crate) async fn verify_password(
    password: String,
    hash: String,
) -> Result<bool, AuthServiceError> {
    Ok(spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}
