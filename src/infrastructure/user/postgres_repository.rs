//! PostgreSQL user repository implementation
//!
//! Users are stored as JSON documents keyed by a UUID primary key. The
//! primary key is what enforces id uniqueness across concurrent creates.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

const TABLE_NAME: &str = "users";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensures the users table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            TABLE_NAME
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

fn to_document(user: &User) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(user)
        .map_err(|e| DomainError::internal(format!("Failed to encode user: {}", e)))
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| DomainError::internal(format!("Failed to read user id: {}", e)))?;
    let document: serde_json::Value = row
        .try_get("document")
        .map_err(|e| DomainError::internal(format!("Failed to read user document: {}", e)))?;

    let mut user: User = serde_json::from_value(document)
        .map_err(|e| DomainError::internal(format!("Failed to decode user '{}': {}", id, e)))?;

    // The key column is authoritative over whatever the document carries
    user.assign_id(UserId::from(id));

    Ok(user)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, document FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, mut user: User) -> Result<UserId, DomainError> {
        if user.id().is_unset() {
            user.assign_id(UserId::generate());
        }

        let id = *user.id();
        let document = to_document(&user)?;

        sqlx::query("INSERT INTO users (id, document) VALUES ($1, $2)")
            .bind(id.as_uuid())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let unique_violation = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());

                if unique_violation {
                    DomainError::conflict(format!("User with ID '{}' already exists", id))
                } else {
                    DomainError::storage(format!("Failed to create user: {}", e))
                }
            })?;

        Ok(id)
    }

    async fn replace(&self, id: &UserId, user: &User) -> Result<bool, DomainError> {
        let mut replacement = user.clone();
        replacement.assign_id(*id);
        let document = to_document(&replacement)?;

        let result = sqlx::query("UPDATE users SET document = $2, updated_at = $3 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(document)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query("SELECT id, document FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let mut users = Vec::with_capacity(rows.len());

        for row in rows {
            users.push(row_to_user(&row)?);
        }

        Ok(users)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}
