//! # Movie Catalog Service
//!
//! Catalog management: create, list, read, per-field update, delete.
//!
//! ## Authorization Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Movie Catalog Operations                           │
//! │                                                                         │
//! │  create_movie         admin                                            │
//! │  list_movies          anyone (non-admin sees only available titles)    │
//! │  get_movie            anyone                                           │
//! │  update_movie_field   admin, through the MovieUpdate whitelist         │
//! │  delete_movie         admin; hard delete, soft-disable fallback        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Delete Fallback
//! Deleting a movie that orders still reference would orphan the order
//! history. The foreign key raises, and the catalog recovers locally by
//! flipping `availability` off instead. This is the only storage fault
//! the service recovers from; everything else propagates.

use tracing::{debug, info, warn};

use reel_core::authz::{authorize, is_admin};
use reel_core::validation::{
    validate_limit, validate_offset, validate_price_cents, validate_stock, validate_title,
    validate_uuid, MovieUpdate,
};
use reel_core::{Movie, MovieFilter, Principal, Role};
use reel_db::{generate_movie_id, Database, DbError, MovieRow};

use crate::error::{ServiceError, ServiceResult};

/// Input for creating a new movie.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub stock: i64,
    pub rental_price_cents: i64,
    pub sale_price_cents: i64,
    pub availability: bool,
    pub images: Vec<String>,
}

/// What actually happened to a movie on a delete request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The row is gone.
    Deleted,
    /// Orders reference the movie; it was disabled instead of removed.
    SoftDisabled { message: String },
}

/// Catalog service.
#[derive(Clone)]
pub struct MovieCatalog {
    db: Database,
}

impl MovieCatalog {
    /// Create a new catalog service.
    pub fn new(db: Database) -> Self {
        MovieCatalog { db }
    }

    /// Creates a movie. Admin only.
    pub async fn create_movie(
        &self,
        draft: MovieDraft,
        principal: Option<&Principal>,
    ) -> ServiceResult<Movie> {
        authorize(principal, Role::Admin)?;

        validate_title(&draft.title)?;
        validate_stock(draft.stock)?;
        validate_price_cents("rental_price", draft.rental_price_cents)?;
        validate_price_cents("sale_price", draft.sale_price_cents)?;

        let images_json = serde_json::to_string(&draft.images)
            .map_err(|e| ServiceError::Invalid(format!("images could not be encoded: {}", e)))?;

        let now = chrono::Utc::now();
        let row = MovieRow {
            id: generate_movie_id(),
            title: draft.title.trim().to_string(),
            stock: draft.stock,
            rental_price_cents: draft.rental_price_cents,
            sale_price_cents: draft.sale_price_cents,
            availability: draft.availability,
            images: images_json,
            created_at: now,
            updated_at: now,
        };

        self.db
            .movies()
            .insert(&row)
            .await
            .map_err(|e| ServiceError::Invalid(format!("movie could not be stored: {}", e)))?;

        info!(id = %row.id, title = %row.title, "Movie created");

        into_movie(row)
    }

    /// Lists movies matching a filter.
    ///
    /// Non-admin callers only ever see available titles: their
    /// availability filter is overwritten, not merged. An empty result
    /// is `NotFound`.
    pub async fn list_movies(
        &self,
        mut filter: MovieFilter,
        principal: Option<&Principal>,
    ) -> ServiceResult<Vec<Movie>> {
        validate_limit(filter.limit)?;
        validate_offset(filter.offset)?;

        if !is_admin(principal) {
            filter.availability = Some(true);
        }

        debug!(
            sort = ?filter.sort,
            limit = filter.limit,
            offset = filter.offset,
            admin = is_admin(principal),
            "Listing movies"
        );

        let rows = self
            .db
            .movies()
            .list(&filter)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        if rows.is_empty() {
            return Err(ServiceError::NotFound("no movies matched".to_string()));
        }

        rows.into_iter().map(into_movie).collect()
    }

    /// Gets a single movie by ID. No authentication required.
    pub async fn get_movie(&self, id: &str) -> ServiceResult<Movie> {
        validate_uuid(id)?;

        let row = self
            .db
            .movies()
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("movie {}", id)))?;

        into_movie(row)
    }

    /// Applies a single validated field change. Admin only.
    ///
    /// The `(field, value)` pair goes through [`MovieUpdate::parse`];
    /// any name outside the closed attribute set is rejected before the
    /// movie is even looked up.
    pub async fn update_movie_field(
        &self,
        id: &str,
        field: &str,
        value: &str,
        principal: Option<&Principal>,
    ) -> ServiceResult<Movie> {
        authorize(principal, Role::Admin)?;
        validate_uuid(id)?;

        let update = MovieUpdate::parse(field, value)?;

        self.db
            .movies()
            .update_field(id, &update)
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => ServiceError::NotFound(format!("movie {}", id)),
                other => ServiceError::Internal(other.to_string()),
            })?;

        info!(id = %id, field = update.field_name(), "Movie field updated");

        self.get_movie(id).await
    }

    /// Deletes a movie, or disables it when order history references it.
    /// Admin only.
    pub async fn delete_movie(
        &self,
        id: &str,
        principal: Option<&Principal>,
    ) -> ServiceResult<DeleteOutcome> {
        authorize(principal, Role::Admin)?;
        validate_uuid(id)?;

        // Existence first, so an absent movie is NotFound rather than a
        // constraint story.
        if self
            .db
            .movies()
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!("movie {}", id)));
        }

        match self.db.movies().delete(id).await {
            Ok(()) => {
                info!(id = %id, "Movie deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.is_foreign_key_violation() => {
                warn!(id = %id, "Movie referenced by orders; disabling instead");

                self.db
                    .movies()
                    .update_field(id, &MovieUpdate::Availability(false))
                    .await
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;

                Ok(DeleteOutcome::SoftDisabled {
                    message: "movie is referenced by existing orders; \
                              it was marked unavailable instead of deleted"
                        .to_string(),
                })
            }
            Err(other) => Err(ServiceError::Internal(other.to_string())),
        }
    }
}

/// Decodes a storage row into the domain movie.
fn into_movie(row: MovieRow) -> ServiceResult<Movie> {
    let images: Vec<String> = serde_json::from_str(&row.images)
        .map_err(|e| ServiceError::Internal(format!("corrupt images column: {}", e)))?;

    Ok(Movie {
        id: row.id,
        title: row.title,
        stock: row.stock,
        rental_price_cents: row.rental_price_cents,
        sale_price_cents: row.sale_price_cents,
        availability: row.availability,
        images,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
