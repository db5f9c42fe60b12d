//! # reel-api: Service Layer for Reel Rental
//!
//! Wires the pure decisions in `reel-core` to the SQLite storage in
//! `reel-db`, behind a session-authenticated service surface.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Reel Rental Services                             │
//! │                                                                         │
//! │  Caller (with an optional bearer token)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionAuth ──────► Option<Principal>                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     reel-api (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   MovieCatalog    OrderLedger    InteractionLog    Accounts    │   │
//! │  │       │               │               │               │        │   │
//! │  │       └───── authorize() gate, then reel-db ──────────┘        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation takes an `Option<&Principal>` and runs the
//! authorization gate before touching storage. Transport (HTTP, gRPC,
//! whatever) lives above this crate and is out of scope here.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod interactions;
pub mod orders;

// =============================================================================
// Re-exports
// =============================================================================

pub use accounts::{Accounts, Session, UserDraft, UserProfile};
pub use auth::{extract_bearer_token, JwtManager, SessionAuth};
pub use catalog::{DeleteOutcome, MovieCatalog, MovieDraft};
pub use config::{ConfigError, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use interactions::InteractionLog;
pub use orders::OrderLedger;

use reel_db::{Database, DbConfig};

/// The fully wired application: one database, every service.
pub struct App {
    pub config: ServiceConfig,
    pub db: Database,
    pub catalog: MovieCatalog,
    pub orders: OrderLedger,
    pub interactions: InteractionLog,
    pub accounts: Accounts,
    pub sessions: SessionAuth,
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use reel_core::{Principal, Role};
    use reel_db::{generate_user_id, Database, DbConfig, UserRow};

    use crate::{App, ServiceConfig};

    /// A fully wired app on a fresh in-memory database.
    pub async fn app() -> App {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        App::with_database(ServiceConfig::default(), db)
    }

    /// Inserts a user row and hands back the matching principal.
    pub async fn seed_user(db: &Database, username: &str, role: Role) -> Principal {
        let row = UserRow {
            id: generate_user_id(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$stub".to_string(),
            role,
            created_at: Utc::now(),
        };
        db.users().insert(&row).await.unwrap();

        Principal {
            id: row.id,
            username: row.username,
            email: row.email,
            role,
        }
    }
}

impl App {
    /// Opens the configured database and wires every service to it.
    pub async fn new(config: ServiceConfig) -> ServiceResult<Self> {
        let db = Database::new(DbConfig::new(&config.database_path))
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        Ok(Self::with_database(config, db))
    }

    /// Wires services to an already open database (used by tests with
    /// an in-memory database).
    pub fn with_database(config: ServiceConfig, db: Database) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);

        App {
            catalog: MovieCatalog::new(db.clone()),
            orders: OrderLedger::new(db.clone(), config.rental_terms()),
            interactions: InteractionLog::new(db.clone()),
            accounts: Accounts::new(db.clone(), jwt.clone()),
            sessions: SessionAuth::new(db.clone(), jwt),
            db,
            config,
        }
    }
}
