//! # User Repository
//!
//! Database operations for accounts (the AuthStore contract).
//!
//! Credentials never leave this layer as part of a `Principal`; the
//! service layer strips `password_hash` when it builds one.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use reel_core::Role;

// =============================================================================
// Row Type
// =============================================================================

/// An account as stored, including the credential hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for account database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new account.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - username already taken
    pub async fn insert(&self, user: &UserRow) -> DbResult<()> {
        debug!(id = %user.id, username = %user.username, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an account by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets an account by username (the login path).
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Updates an account's role.
    ///
    /// Role is the only mutable account attribute; there is no dynamic
    /// field-update path for users.
    pub async fn update_role(&self, id: &str, role: Role) -> DbResult<()> {
        debug!(id = %id, role = %role, "Updating user role");

        let result = sqlx::query("UPDATE users SET role = ?2 WHERE id = ?1")
            .bind(id)
            .bind(role)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

/// Helper to generate a new user ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn user(username: &str, role: Role) -> UserRow {
        UserRow {
            id: generate_user_id(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$stub".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let row = user("ripley", Role::Customer);
        repo.insert(&row).await.unwrap();

        let by_id = repo.get_by_id(&row.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "ripley");
        assert_eq!(by_id.role, Role::Customer);

        let by_name = repo.get_by_username("ripley").await.unwrap().unwrap();
        assert_eq!(by_name.id, row.id);

        assert!(repo.get_by_username("ash").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        repo.insert(&user("ripley", Role::Customer)).await.unwrap();
        let err = repo
            .insert(&user("ripley", Role::Customer))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_role() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let row = user("ripley", Role::Customer);
        repo.insert(&row).await.unwrap();

        repo.update_role(&row.id, Role::Admin).await.unwrap();
        let updated = repo.get_by_id(&row.id).await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Admin);

        let err = repo.update_role("missing", Role::Admin).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
