//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::{
    auth::models::{LoginRecord, NewUser, UserId},
    database::{REGISTER_USER, StoreError, VALIDATE_LOGIN},
};

const REGISTER_USER_SQL: &str = include_str!("sql/register_user.sql");
const VALIDATE_LOGIN_SQL: &str = include_str!("sql/validate_login.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn register_user(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<UserId, StoreError> {
        query_scalar::<Postgres, i32>(REGISTER_USER_SQL)
            .bind(&user.display_name)
            .bind(&user.login)
            .bind(password_hash)
            .bind(user.role_id)
            .bind(user.email.as_deref())
            .bind(user.phone.as_deref())
            .fetch_one(&self.pool)
            .await
            .map(UserId::new)
            .map_err(|error| REGISTER_USER.call_error(error))
    }

    pub(crate) async fn find_login(&self, login: &str) -> Result<Option<LoginRecord>, StoreError> {
        query_as::<Postgres, LoginRecord>(VALIDATE_LOGIN_SQL)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| VALIDATE_LOGIN.call_error(error))
    }
}

impl<'r> FromRow<'r, PgRow> for LoginRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: UserId::new(row.try_get("id_usuario")?),
            display_name: row.try_get("nombre_usuario")?,
            password_hash: row.try_get("contrasena")?,
            role_name: row.try_get("nombre_rol")?,
        })
    }
}
