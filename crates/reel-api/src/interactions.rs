//! # Interaction Log Service
//!
//! Append-only recording of user-to-movie events. Any authenticated
//! principal may record; the type string is parsed at the boundary.

use chrono::Utc;
use tracing::info;

use reel_core::authz::authorize;
use reel_core::validation::validate_uuid;
use reel_core::{Interaction, InteractionType, Principal, Role};
use reel_db::{generate_interaction_id, Database};

use crate::error::{ServiceError, ServiceResult};

/// Interaction service.
#[derive(Clone)]
pub struct InteractionLog {
    db: Database,
}

impl InteractionLog {
    /// Create a new interaction log.
    pub fn new(db: Database) -> Self {
        InteractionLog { db }
    }

    /// Records an interaction against a movie.
    ///
    /// An insert failure is reported as `NotFound`: the movie reference
    /// going stale between the click and the write is the expected
    /// cause, and the log does not pre-read to distinguish further.
    pub async fn record_interaction(
        &self,
        movie_id: &str,
        interaction_type: &str,
        principal: Option<&Principal>,
    ) -> ServiceResult<Interaction> {
        authorize(principal, Role::Customer)?;
        let principal = principal.ok_or(ServiceError::Unauthenticated)?;

        validate_uuid(movie_id)?;
        let interaction_type: InteractionType = interaction_type.parse()?;

        let interaction = Interaction {
            id: generate_interaction_id(),
            user_id: principal.id.clone(),
            movie_id: movie_id.to_string(),
            interaction_type,
            interaction_datetime: Utc::now(),
        };

        self.db
            .interactions()
            .insert(&interaction)
            .await
            .map_err(|_| ServiceError::NotFound(format!("movie {}", movie_id)))?;

        info!(
            movie_id = %movie_id,
            interaction_type = interaction_type.as_str(),
            "Interaction recorded"
        );

        Ok(interaction)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MovieDraft;
    use crate::test_support::{app, seed_user};

    #[tokio::test]
    async fn test_requires_authentication() {
        let app = app().await;
        let err = app
            .interactions
            .record_interaction("m-1", "like", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_unknown_type_is_invalid() {
        let app = app().await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let err = app
            .interactions
            .record_interaction("m-1", "dislike", Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_dangling_movie_is_not_found() {
        let app = app().await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let err = app
            .interactions
            .record_interaction(&reel_db::generate_movie_id(), "like", Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_movie_id_is_invalid() {
        let app = app().await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let err = app
            .interactions
            .record_interaction("not-a-uuid", "like", Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_records_against_a_real_movie() {
        let app = app().await;
        let admin = seed_user(&app.db, "a1", Role::Admin).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let movie = app
            .catalog
            .create_movie(
                MovieDraft {
                    title: "Heat".to_string(),
                    stock: 1,
                    rental_price_cents: 299,
                    sale_price_cents: 999,
                    availability: true,
                    images: vec![],
                },
                Some(&admin),
            )
            .await
            .unwrap();

        let interaction = app
            .interactions
            .record_interaction(&movie.id, "review", Some(&customer))
            .await
            .unwrap();

        assert_eq!(interaction.interaction_type, InteractionType::Review);
        assert_eq!(interaction.user_id, customer.id);

        let logged = app.db.interactions().list_for_movie(&movie.id).await.unwrap();
        assert_eq!(logged.len(), 1);
    }
}
