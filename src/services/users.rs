//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{NewUser, SignupRequest, User, UserClaims, UserQuery, UserShort},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate user by login and return a JWT token
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid login or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((token, user))
    }

    /// Self-service registration for employees and technicians
    pub async fn signup(&self, request: SignupRequest) -> AppResult<(String, User)> {
        request.validate()?;

        if request.role == Role::Manager {
            return Err(AppError::Validation(
                "Manager accounts cannot be self-registered".to_string(),
            ));
        }

        if self.repository.users.login_exists(&request.login).await? {
            return Err(AppError::Conflict("Login already exists".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .repository
            .users
            .create(&NewUser {
                login: &request.login,
                email: Some(&request.email),
                password_hash: &password_hash,
                role: request.role,
            })
            .await?;

        let token = self.create_token_for_user(&user)?;
        tracing::info!(user_id = user.id, role = %user.role, "Account created");
        Ok((token, user))
    }

    /// Create the configured manager account when no manager exists yet
    pub async fn ensure_bootstrap_manager(&self) -> AppResult<()> {
        let (Some(login), Some(password)) = (
            self.config.bootstrap_manager_login.as_deref(),
            self.config.bootstrap_manager_password.as_deref(),
        ) else {
            return Ok(());
        };

        if self.repository.users.role_exists(Role::Manager).await? {
            return Ok(());
        }
        if self.repository.users.login_exists(login).await? {
            tracing::warn!(login, "Bootstrap manager login is taken by a non-manager account");
            return Ok(());
        }

        let password_hash = self.hash_password(password)?;
        let user = self
            .repository
            .users
            .create(&NewUser {
                login,
                email: None,
                password_hash: &password_hash,
                role: Role::Manager,
            })
            .await?;

        tracing::info!(user_id = user.id, login, "Bootstrap manager account created");
        Ok(())
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.login.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List users
    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<UserShort>> {
        self.repository.users.list(query).await
    }
}
