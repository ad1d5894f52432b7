//! Auth Command Handlers
//!
//! 注册/登录：argon2 哈希口令，签发不透明 Bearer 令牌

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use rand_core::OsRng;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{LoginUser, RegisterUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{TokenStorePort, UserRecord, UserRepositoryPort};

/// 认证响应（注册与登录共用）
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

/// RegisterUser Handler
pub struct RegisterUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    token_store: Arc<dyn TokenStorePort>,
}

impl RegisterUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, token_store: Arc<dyn TokenStorePort>) -> Self {
        Self {
            user_repo,
            token_store,
        }
    }

    pub async fn handle(&self, command: RegisterUser) -> Result<AuthResponse, ApplicationError> {
        if command.username.trim().is_empty()
            || command.email.trim().is_empty()
            || command.password.is_empty()
        {
            return Err(ApplicationError::validation(
                "Username, email and password are required",
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(command.password.as_bytes(), &salt)
            .map_err(|e| ApplicationError::internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        let user = UserRecord {
            id: Uuid::new_v4(),
            username: command.username.trim().to_string(),
            email: command.email.trim().to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        self.user_repo.insert(&user).await.map_err(|e| match e {
            crate::application::ports::RepositoryError::Duplicate(_) => {
                ApplicationError::conflict("Username or email already registered")
            }
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        let token = self.token_store.issue(user.id);

        Ok(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}

/// LoginUser Handler
pub struct LoginUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    token_store: Arc<dyn TokenStorePort>,
}

impl LoginUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, token_store: Arc<dyn TokenStorePort>) -> Self {
        Self {
            user_repo,
            token_store,
        }
    }

    pub async fn handle(&self, command: LoginUser) -> Result<AuthResponse, ApplicationError> {
        if command.email.trim().is_empty() || command.password.is_empty() {
            return Err(ApplicationError::validation("Email and password are required"));
        }

        // 邮箱不存在和口令错误返回同一错误，避免探测注册邮箱
        let user = self
            .user_repo
            .find_by_email(command.email.trim())
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("Invalid email or password"))?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| ApplicationError::internal(format!("Stored hash invalid: {}", e)))?;

        Argon2::default()
            .verify_password(command.password.as_bytes(), &parsed_hash)
            .map_err(|_| ApplicationError::unauthorized("Invalid email or password"))?;

        tracing::info!(user_id = %user.id, "User logged in");

        let token = self.token_store.issue(user.id);

        Ok(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryTokenStore;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteUserRepository,
    };

    async fn setup() -> (RegisterUserHandler, LoginUserHandler, Arc<InMemoryTokenStore>) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let user_repo = Arc::new(SqliteUserRepository::new(pool));
        let token_store = Arc::new(InMemoryTokenStore::new());

        (
            RegisterUserHandler::new(user_repo.clone(), token_store.clone()),
            LoginUserHandler::new(user_repo, token_store.clone()),
            token_store,
        )
    }

    fn register_command() -> RegisterUser {
        RegisterUser {
            username: "author".to_string(),
            email: "author@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_resolvable_token() {
        let (register, _, token_store) = setup().await;

        let response = register.handle(register_command()).await.unwrap();

        assert_eq!(response.username, "author");
        assert_eq!(token_store.resolve(&response.token), Some(response.user_id));
    }

    #[tokio::test]
    async fn test_register_duplicate_conflicts() {
        let (register, _, _) = setup().await;

        register.handle(register_command()).await.unwrap();
        let result = register.handle(register_command()).await;

        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_missing_fields_rejected() {
        let (register, _, _) = setup().await;

        let mut command = register_command();
        command.password = String::new();

        assert!(matches!(
            register.handle(command).await,
            Err(ApplicationError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_login_roundtrip() {
        let (register, login, token_store) = setup().await;

        let registered = register.handle(register_command()).await.unwrap();

        let response = login
            .handle(LoginUser {
                email: "author@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.user_id, registered.user_id);
        assert_eq!(token_store.resolve(&response.token), Some(registered.user_id));
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let (register, login, _) = setup().await;

        register.handle(register_command()).await.unwrap();

        let result = login
            .handle(LoginUser {
                email: "author@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_email_unauthorized() {
        let (_, login, _) = setup().await;

        let result = login
            .handle(LoginUser {
                email: "nobody@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::Unauthorized(_))));
    }
}
