//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// Token signing settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Hours a session token stays valid
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value_t = 8_u16)]
    pub token_ttl_hours: u16,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.token_ttl_hours))
    }
}
