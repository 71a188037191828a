//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;

use crate::auth::{
    AuthServiceError, Credentials, Identity, LoginOutcome, NewUser, Role, TokenAuthority, UserId,
    models::LoginRecord,
    password::{hash_password, verify_password},
    repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    tokens: Arc<TokenAuthority>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, tokens: Arc<TokenAuthority>) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, user: NewUser) -> Result<UserId, AuthServiceError> {
        let password_hash = hash_password(user.password.clone()).await?;

        Ok(self.repository.register_user(&user, &password_hash).await?)
    }

    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AuthServiceError> {
        let record = self
            .repository
            .find_login(&credentials.login)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if !verify_password(credentials.password, record.password_hash.clone()).await? {
            return Err(AuthServiceError::WrongPassword);
        }

        let identity = identity_from_record(record);
        let token = self.tokens.issue(&identity)?;

        Ok(LoginOutcome { token, identity })
    }
}

fn identity_from_record(record: LoginRecord) -> Identity {
    let role = record
        .role_name
        .as_deref()
        .and_then(|name| match name.parse::<Role>() {
            Ok(role) => Some(role),
            Err(error) => {
                warn!(
                    user_id = %record.user_id,
                    security = true,
                    "user has no recognised role: {error}"
                );

                None
            }
        });

    Identity {
        user_id: record.user_id,
        display_name: record.display_name,
        role,
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash the password and store a new user, returning its id.
    async fn register(&self, user: NewUser) -> Result<UserId, AuthServiceError>;

    /// Check credentials and issue a signed token.
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        database::StoreError,
        test::{TestContext, helpers},
    };

    use super::*;

    fn record(role_name: Option<&str>) -> LoginRecord {
        LoginRecord {
            user_id: UserId::new(3),
            display_name: "Ana".to_string(),
            password_hash: String::new(),
            role_name: role_name.map(str::to_string),
        }
    }

    #[test]
    fn known_role_names_become_roles() {
        let identity = identity_from_record(record(Some("Administrador")));

        assert_eq!(identity.role, Some(Role::Administrator));
        assert_eq!(identity.display_name, "Ana");
    }

    #[test]
    fn unknown_or_missing_roles_leave_identity_without_role() {
        assert_eq!(identity_from_record(record(Some("Cajero"))).role, None);
        assert_eq!(identity_from_record(record(None)).role, None);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn registered_user_can_log_in() -> TestResult {
        let ctx = TestContext::new().await;

        let identity = helpers::sign_up(&ctx, "ana", Role::Seller).await;

        assert_eq!(identity.display_name, "Usuario ana");
        assert_eq!(identity.role, Some(Role::Seller));

        let outcome = ctx
            .auth
            .login(Credentials {
                login: "ana".to_string(),
                password: helpers::PASSWORD.to_string(),
            })
            .await?;

        assert_eq!(outcome.identity, identity);
        assert!(!outcome.token.is_empty(), "login should issue a token");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn login_distinguishes_unknown_users_from_wrong_passwords() {
        let ctx = TestContext::new().await;

        helpers::sign_up(&ctx, "beto", Role::Administrator).await;

        let unknown = ctx
            .auth
            .login(Credentials {
                login: "nadie".to_string(),
                password: helpers::PASSWORD.to_string(),
            })
            .await;

        let wrong = ctx
            .auth
            .login(Credentials {
                login: "beto".to_string(),
                password: "otra-clave".to_string(),
            })
            .await;

        assert!(matches!(unknown, Err(AuthServiceError::UserNotFound)));
        assert!(matches!(wrong, Err(AuthServiceError::WrongPassword)));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn duplicate_logins_are_rejected() {
        let ctx = TestContext::new().await;

        helpers::sign_up(&ctx, "carla", Role::Seller).await;

        let role_id = helpers::role_id(&ctx, Role::Seller).await;

        let result = ctx
            .auth
            .register(NewUser {
                display_name: "Otra Carla".to_string(),
                login: "carla".to_string(),
                password: helpers::PASSWORD.to_string(),
                role_id,
                email: None,
                phone: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(AuthServiceError::Store(StoreError::AlreadyExists))
        ));
    }
}
