use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::accounts::error::AccountError;
use crate::accounts::repo_types::User;

/// Persistence interface for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Insert a new user with a hashed password.
    ///
    /// Fails with [`AccountError::EmailTaken`] when the email is already
    /// present. The unique index on `users.email` is the authoritative
    /// guard; callers may race past a prior lookup and still end up here.
    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AccountError>;
}

/// Postgres-backed [`UserStore`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Store(e.into()))?;
        Ok(user)
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AccountError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AccountError::EmailTaken,
            other => AccountError::Store(other.into()),
        })?;
        Ok(user)
    }
}

/// In-memory [`UserStore`] for tests and local development. Keyed by email,
/// which gives it the same uniqueness rule as the Postgres index.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AccountError> {
        let mut users = self.users.write().await;

        if users.contains_key(email) {
            return Err(AccountError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.email.clone(), user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "created user");
        Ok(user)
    }
}
