use clap::Args;
use caja_app::database;

#[derive(Debug, Args)]
pub(crate) struct CheckProceduresArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CheckProceduresArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let missing = database::missing_procedures(&pool)
        .await
        .map_err(|error| format!("failed to read the procedure catalogue: {error}"))?;

    if missing.is_empty() {
        println!("all {} procedures are installed", database::ALL_PROCEDURES.len());
        return Ok(());
    }

    for procedure in &missing {
        println!("missing: {}", procedure.name());
    }

    Err(format!(
        "{} of {} procedures are missing; run with PROCEDURE_MODE=inline or apply the migrations",
        missing.len(),
        database::ALL_PROCEDURES.len()
    ))
}
