//! Repository for the `users` table.

use async_trait::async_trait;
use scenaria_core::entities::user::{NewUser, User};
use scenaria_core::error::CoreError;
use scenaria_core::repository::{RepoResult, UserRepository};
use scenaria_core::types::DbId;
use sqlx::PgPool;

use crate::error::{storage, unique_violation};
use crate::models::user::UserRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepo {
    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage("find user"))?;
        Ok(row.map(Into::into))
    }

    /// Case-sensitive lookup.
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage("find user"))?;
        Ok(row.map(Into::into))
    }

    async fn create(&self, input: &NewUser) -> RepoResult<User> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if unique_violation(&err).as_deref() == Some("uq_users_email") {
                    CoreError::EmailInUse(input.email.clone())
                } else {
                    storage("create user")(err)
                }
            })?;
        Ok(row.into())
    }
}
