//! # Accounts Service
//!
//! Registration, login, profile reads, and role changes.
//!
//! Password hashes never leave this module: reads return a
//! [`UserProfile`], and login hands back a signed session token.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use reel_core::authz::authorize;
use reel_core::validation::{validate_email, validate_username, validate_uuid};
use reel_core::{Principal, Role};
use reel_db::{generate_user_id, Database, DbError, UserRow};

use crate::auth::{hash_password, verify_password, JwtManager};
use crate::error::{ServiceError, ServiceResult};

/// Input for creating a new account.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The externally visible shape of an account.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        UserProfile {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

/// A successful login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Account service.
pub struct Accounts {
    db: Database,
    jwt: JwtManager,
}

impl Accounts {
    /// Create a new accounts service.
    pub fn new(db: Database, jwt: JwtManager) -> Self {
        Accounts { db, jwt }
    }

    /// Registers a new customer account.
    ///
    /// Open to anonymous callers; everyone starts as a customer. A
    /// duplicate username is `Invalid`, not a storage fault.
    pub async fn register(&self, draft: UserDraft) -> ServiceResult<UserProfile> {
        validate_username(&draft.username)?;
        validate_email(&draft.email)?;

        if draft.password.len() < 8 {
            return Err(ServiceError::Invalid(
                "password must be at least 8 characters".to_string(),
            ));
        }

        let row = UserRow {
            id: generate_user_id(),
            username: draft.username.trim().to_string(),
            email: draft.email.trim().to_string(),
            password_hash: hash_password(&draft.password)?,
            role: Role::Customer,
            created_at: Utc::now(),
        };

        self.db.users().insert(&row).await.map_err(|e| match e {
            DbError::UniqueViolation { .. } => {
                ServiceError::Invalid(format!("username '{}' is taken", row.username))
            }
            other => ServiceError::Internal(other.to_string()),
        })?;

        info!(id = %row.id, username = %row.username, "Account registered");

        Ok(row.into())
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Wrong username and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<Session> {
        let user = self
            .db
            .users()
            .get_by_username(username)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let user = match user {
            Some(u) if verify_password(password, &u.password_hash) => u,
            _ => {
                warn!(username = %username, "Failed login attempt");
                return Err(ServiceError::Unauthenticated);
            }
        };

        let token = self.jwt.generate_token(&user.id, user.role)?;

        info!(id = %user.id, "Login");

        Ok(Session {
            token,
            user: user.into(),
        })
    }

    /// Reads an account profile.
    ///
    /// A principal may always read itself; admins may read anyone.
    /// Everyone else gets `NotFound`, hiding whether the account exists.
    pub async fn get_user(
        &self,
        user_id: &str,
        principal: Option<&Principal>,
    ) -> ServiceResult<UserProfile> {
        authorize(principal, Role::Customer)?;
        let caller = principal.ok_or(ServiceError::Unauthenticated)?;
        validate_uuid(user_id)?;

        if caller.id != user_id && caller.role != Role::Admin {
            return Err(ServiceError::NotFound(format!("user {}", user_id)));
        }

        let user = self
            .db
            .users()
            .get_by_id(user_id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", user_id)))?;

        Ok(user.into())
    }

    /// Changes an account's role. Admin only.
    ///
    /// The privilege check runs before the target is even read, so a
    /// non-admin probing with arbitrary IDs learns nothing. An
    /// unchanged role skips the write.
    pub async fn patch_user_role(
        &self,
        user_id: &str,
        role: &str,
        principal: Option<&Principal>,
    ) -> ServiceResult<UserProfile> {
        authorize(principal, Role::Admin)?;
        validate_uuid(user_id)?;

        let role: Role = role.parse()?;

        let user = self
            .db
            .users()
            .get_by_id(user_id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", user_id)))?;

        if user.role == role {
            return Ok(user.into());
        }

        self.db
            .users()
            .update_role(user_id, role)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        info!(id = %user_id, role = %role, "Role changed");

        let updated = self
            .db
            .users()
            .get_by_id(user_id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .ok_or_else(|| ServiceError::Internal("user vanished after role change".to_string()))?;

        Ok(updated.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
