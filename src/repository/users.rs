//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{NewUser, User, UserQuery, UserShort},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by login (case-insensitive)
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(login) = LOWER($1)")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Check if login already exists
    pub async fn login_exists(&self, login: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(login) = LOWER($1))")
                .bind(login)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Check whether any user has the given role
    pub async fn role_exists(&self, role: Role) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE role = $1)")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// List users, optionally filtered by role
    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<UserShort>> {
        let users = match query.role {
            Some(role) => {
                sqlx::query_as::<_, UserShort>(
                    "SELECT id, login, role FROM users WHERE role = $1 ORDER BY login",
                )
                .bind(role)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, UserShort>("SELECT id, login, role FROM users ORDER BY login")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(users)
    }

    /// Create a new user
    pub async fn create(&self, user: &NewUser<'_>) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user.login)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
