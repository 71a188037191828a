//! Database Config

use std::time::Duration;

use clap::Args;

use caja_app::database::{PoolSettings, ProcedureMode};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Upper bound on pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10_u32)]
    pub max_connections: u32,

    /// Seconds to wait for a free pooled connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 5_u64)]
    pub acquire_timeout_seconds: u64,

    /// Whether writes call the stored procedures or run inline SQL
    #[arg(long, env = "PROCEDURE_MODE", value_enum, default_value_t = ProcedureMode::Procedures)]
    pub procedure_mode: ProcedureMode,
}

impl DatabaseConfig {
    #[must_use]
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_seconds),
        }
    }
}
