//! # Interaction Repository
//!
//! Append-only storage for user-to-movie events (likes, views, reviews).
//! There is no update or delete path; the log only grows.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use reel_core::Interaction;

/// Repository for interaction database operations.
#[derive(Debug, Clone)]
pub struct InteractionRepository {
    pool: SqlitePool,
}

impl InteractionRepository {
    /// Creates a new InteractionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InteractionRepository { pool }
    }

    /// Appends an interaction to the log.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - movie or user doesn't exist
    pub async fn insert(&self, interaction: &Interaction) -> DbResult<()> {
        debug!(
            id = %interaction.id,
            movie_id = %interaction.movie_id,
            interaction_type = interaction.interaction_type.as_str(),
            "Inserting interaction"
        );

        sqlx::query(
            r#"
            INSERT INTO interactions (id, user_id, movie_id, interaction_type, interaction_datetime)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&interaction.id)
        .bind(&interaction.user_id)
        .bind(&interaction.movie_id)
        .bind(interaction.interaction_type)
        .bind(interaction.interaction_datetime)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all interactions recorded against a movie, oldest first.
    pub async fn list_for_movie(&self, movie_id: &str) -> DbResult<Vec<Interaction>> {
        let interactions = sqlx::query_as::<_, Interaction>(
            r#"
            SELECT id, user_id, movie_id, interaction_type, interaction_datetime
            FROM interactions
            WHERE movie_id = ?1
            ORDER BY interaction_datetime ASC
            "#,
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(interactions)
    }
}

/// Helper to generate a new interaction ID.
pub fn generate_interaction_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::movie::{generate_movie_id, MovieRow};
    use crate::repository::user::{generate_user_id, UserRow};
    use chrono::Utc;
    use reel_core::{InteractionType, Role};

    async fn db_with_movie_and_user() -> (Database, String, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let now = Utc::now();
        let movie = MovieRow {
            id: generate_movie_id(),
            title: "Heat".to_string(),
            stock: 1,
            rental_price_cents: 299,
            sale_price_cents: 999,
            availability: true,
            images: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };
        db.movies().insert(&movie).await.unwrap();

        let user = UserRow {
            id: generate_user_id(),
            username: "neil".to_string(),
            email: "neil@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Customer,
            created_at: now,
        };
        db.users().insert(&user).await.unwrap();

        (db, movie.id, user.id)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (db, movie_id, user_id) = db_with_movie_and_user().await;

        for kind in [InteractionType::View, InteractionType::Like] {
            let interaction = Interaction {
                id: generate_interaction_id(),
                user_id: user_id.clone(),
                movie_id: movie_id.clone(),
                interaction_type: kind,
                interaction_datetime: Utc::now(),
            };
            db.interactions().insert(&interaction).await.unwrap();
        }

        let listed = db.interactions().list_for_movie(&movie_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].interaction_type, InteractionType::View);
    }

    #[tokio::test]
    async fn test_insert_rejects_dangling_movie() {
        let (db, _movie_id, user_id) = db_with_movie_and_user().await;

        let interaction = Interaction {
            id: generate_interaction_id(),
            user_id,
            movie_id: "no-such-movie".to_string(),
            interaction_type: InteractionType::Like,
            interaction_datetime: Utc::now(),
        };

        let err = db.interactions().insert(&interaction).await.unwrap_err();
        assert!(err.is_foreign_key_violation());
    }
}
