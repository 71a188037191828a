use clap::{Args, Subcommand};

mod check_procedures;
mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    Migrate(migrate::MigrateArgs),
    CheckProcedures(check_procedures::CheckProceduresArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args).await,
        DbSubcommand::CheckProcedures(args) => check_procedures::run(args).await,
    }
}
