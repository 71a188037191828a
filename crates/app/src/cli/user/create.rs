use std::sync::Arc;

use clap::{Args, ValueEnum};
use caja_app::{
    auth::{
        AuthService, Credentials, DEFAULT_TOKEN_TTL, JwtSecret, NewUser, PgAuthService, Role,
        TokenAuthority,
    },
    database,
};
use sqlx::query_scalar;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Administrador,
    Vendedor,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Administrador => Self::Administrator,
            RoleArg::Vendedor => Self::Seller,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login name
    #[arg(long)]
    login: String,

    /// Initial password
    #[arg(long, env = "CAJA_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, value_enum, default_value = "vendedor")]
    role: RoleArg,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Secret used to sign the printed token
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.login.trim().is_empty() || args.password.is_empty() {
        return Err("login and password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let role = Role::from(args.role);

    let role_id: i32 = query_scalar("SELECT id_rol FROM roles WHERE nombre_rol = $1")
        .bind(role.as_str())
        .fetch_optional(&pool)
        .await
        .map_err(|error| format!("failed to look up role: {error}"))?
        .ok_or_else(|| format!("role {role} is not seeded; run `caja-app db migrate` first"))?;

    let tokens = TokenAuthority::new(&JwtSecret::from_config(args.jwt_secret), DEFAULT_TOKEN_TTL);
    let service = PgAuthService::new(pool, Arc::new(tokens));

    let user_id = service
        .register(NewUser {
            display_name: args.name,
            login: args.login.clone(),
            password: args.password.clone(),
            role_id,
            email: args.email,
            phone: args.phone,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let outcome = service
        .login(Credentials {
            login: args.login,
            password: args.password,
        })
        .await
        .map_err(|error| format!("user created but login failed: {error}"))?;

    println!("id_usuario: {user_id}");
    println!("rol: {role}");
    println!("token: {}", outcome.token);

    Ok(())
}
