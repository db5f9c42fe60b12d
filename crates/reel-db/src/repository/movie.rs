//! # Movie Repository
//!
//! Database operations for the movie catalog (the CatalogStore contract).
//!
//! ## Key Operations
//! - CRUD with a filtered, paged listing
//! - Typed single-field updates (each [`MovieUpdate`] variant owns its
//!   fixed column - caller text never becomes SQL)
//! - Hard delete that surfaces referential conflicts distinguishably,
//!   so the catalog service can fall back to a soft-disable

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use reel_core::{MovieFilter, MovieUpdate};

// =============================================================================
// Row Type
// =============================================================================

/// A movie as stored: `images` is the raw JSON-encoded TEXT column.
///
/// The service layer owns the encode/decode step between this and the
/// domain `Movie` (the catalog serializes the image list before handing
/// a draft to storage).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieRow {
    pub id: String,
    pub title: String,
    pub stock: i64,
    pub rental_price_cents: i64,
    pub sale_price_cents: i64,
    pub availability: bool,
    /// JSON-encoded array of image URLs.
    pub images: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const MOVIE_COLUMNS: &str = "id, title, stock, rental_price_cents, sale_price_cents, \
     availability, images, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for movie database operations.
#[derive(Debug, Clone)]
pub struct MovieRepository {
    pool: SqlitePool,
}

impl MovieRepository {
    /// Creates a new MovieRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MovieRepository { pool }
    }

    /// Inserts a new movie row.
    pub async fn insert(&self, movie: &MovieRow) -> DbResult<()> {
        debug!(id = %movie.id, title = %movie.title, "Inserting movie");

        sqlx::query(
            r#"
            INSERT INTO movies (
                id, title, stock, rental_price_cents, sale_price_cents,
                availability, images, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&movie.id)
        .bind(&movie.title)
        .bind(movie.stock)
        .bind(movie.rental_price_cents)
        .bind(movie.sale_price_cents)
        .bind(movie.availability)
        .bind(&movie.images)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a movie by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(MovieRow))` - Movie found
    /// * `Ok(None)` - Movie not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MovieRow>> {
        let movie = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movie)
    }

    /// Lists movies matching the filter.
    ///
    /// ## SQL Construction
    /// The ORDER BY fragment comes from `MovieSort::column()` and
    /// `SortDirection::keyword()` - closed enums mapping to fixed
    /// identifiers. Everything caller-supplied (title substring,
    /// availability, paging) is bound as a parameter.
    pub async fn list(&self, filter: &MovieFilter) -> DbResult<Vec<MovieRow>> {
        debug!(
            sort = filter.sort.column(),
            limit = filter.limit,
            offset = filter.offset,
            "Listing movies"
        );

        let mut sql = format!("SELECT {MOVIE_COLUMNS} FROM movies");

        let mut clauses: Vec<&str> = Vec::new();
        if filter.title.is_some() {
            clauses.push("title LIKE '%' || ? || '%'");
        }
        if filter.availability.is_some() {
            clauses.push("availability = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        sql.push_str(&format!(
            " ORDER BY {} {} LIMIT ? OFFSET ?",
            filter.sort.column(),
            filter.direction.keyword()
        ));

        let mut query = sqlx::query_as::<_, MovieRow>(&sql);
        if let Some(title) = &filter.title {
            query = query.bind(title);
        }
        if let Some(availability) = filter.availability {
            query = query.bind(availability);
        }
        query = query.bind(filter.limit).bind(filter.offset);

        let movies = query.fetch_all(&self.pool).await?;

        debug!(count = movies.len(), "Listing returned movies");
        Ok(movies)
    }

    /// Applies a single validated field change.
    ///
    /// Each variant carries its own fixed column name; there is no
    /// dynamic "SET {field} = ?" path.
    ///
    /// ## Returns
    /// * `Ok(())` - Update applied
    /// * `Err(DbError::NotFound)` - Movie doesn't exist
    pub async fn update_field(&self, id: &str, update: &MovieUpdate) -> DbResult<()> {
        debug!(id = %id, field = update.field_name(), "Updating movie field");

        let now = Utc::now();

        let result = match update {
            MovieUpdate::Title(title) => {
                sqlx::query("UPDATE movies SET title = ?2, updated_at = ?3 WHERE id = ?1")
                    .bind(id)
                    .bind(title)
                    .bind(now)
                    .execute(&self.pool)
                    .await?
            }
            MovieUpdate::Stock(stock) => {
                sqlx::query("UPDATE movies SET stock = ?2, updated_at = ?3 WHERE id = ?1")
                    .bind(id)
                    .bind(stock)
                    .bind(now)
                    .execute(&self.pool)
                    .await?
            }
            MovieUpdate::RentalPriceCents(cents) => {
                sqlx::query(
                    "UPDATE movies SET rental_price_cents = ?2, updated_at = ?3 WHERE id = ?1",
                )
                .bind(id)
                .bind(cents)
                .bind(now)
                .execute(&self.pool)
                .await?
            }
            MovieUpdate::SalePriceCents(cents) => {
                sqlx::query(
                    "UPDATE movies SET sale_price_cents = ?2, updated_at = ?3 WHERE id = ?1",
                )
                .bind(id)
                .bind(cents)
                .bind(now)
                .execute(&self.pool)
                .await?
            }
            MovieUpdate::Availability(availability) => {
                sqlx::query("UPDATE movies SET availability = ?2, updated_at = ?3 WHERE id = ?1")
                    .bind(id)
                    .bind(availability)
                    .bind(now)
                    .execute(&self.pool)
                    .await?
            }
            MovieUpdate::Images(images) => {
                let encoded = serde_json::to_string(images)
                    .map_err(|e| DbError::Internal(e.to_string()))?;
                sqlx::query("UPDATE movies SET images = ?2, updated_at = ?3 WHERE id = ?1")
                    .bind(id)
                    .bind(encoded)
                    .bind(now)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Movie", id));
        }

        Ok(())
    }

    /// Hard-deletes a movie.
    ///
    /// ## Referential Conflicts
    /// A movie referenced by any order fails here with
    /// `DbError::ForeignKeyViolation` (ON DELETE RESTRICT). The caller
    /// decides what to do with that - the catalog service falls back to
    /// soft-disabling.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting movie");

        let result = sqlx::query("DELETE FROM movies WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Movie", id));
        }

        Ok(())
    }

    /// Counts total movies (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new movie ID.
pub fn generate_movie_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use reel_core::{MovieSort, SortDirection};

    fn row(title: &str, availability: bool) -> MovieRow {
        let now = Utc::now();
        MovieRow {
            id: generate_movie_id(),
            title: title.to_string(),
            stock: 3,
            rental_price_cents: 399,
            sale_price_cents: 1499,
            availability,
            images: "[]".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = db().await;
        let movie = row("Alien", true);

        db.movies().insert(&movie).await.unwrap();

        let found = db.movies().get_by_id(&movie.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Alien");
        assert_eq!(found.rental_price_cents, 399);
        assert!(found.availability);

        assert!(db.movies().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let db = db().await;
        let repo = db.movies();

        repo.insert(&row("Alien", true)).await.unwrap();
        repo.insert(&row("Aliens", false)).await.unwrap();
        repo.insert(&row("Blade Runner", true)).await.unwrap();

        // Availability filter
        let filter = MovieFilter {
            availability: Some(true),
            ..Default::default()
        };
        let movies = repo.list(&filter).await.unwrap();
        assert_eq!(movies.len(), 2);
        assert!(movies.iter().all(|m| m.availability));

        // Title substring
        let filter = MovieFilter {
            title: Some("alien".to_string()),
            ..Default::default()
        };
        let movies = repo.list(&filter).await.unwrap();
        assert_eq!(movies.len(), 2);

        // Descending sort + paging
        let filter = MovieFilter {
            sort: MovieSort::Title,
            direction: SortDirection::Desc,
            limit: 1,
            offset: 0,
            ..Default::default()
        };
        let movies = repo.list(&filter).await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Blade Runner");
    }

    #[tokio::test]
    async fn test_update_field() {
        let db = db().await;
        let repo = db.movies();
        let movie = row("Alien", true);
        repo.insert(&movie).await.unwrap();

        repo.update_field(&movie.id, &MovieUpdate::RentalPriceCents(599))
            .await
            .unwrap();
        repo.update_field(&movie.id, &MovieUpdate::Availability(false))
            .await
            .unwrap();

        let found = repo.get_by_id(&movie.id).await.unwrap().unwrap();
        assert_eq!(found.rental_price_cents, 599);
        assert!(!found.availability);

        // Missing movie
        let err = repo
            .update_field("missing", &MovieUpdate::Stock(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db().await;
        let repo = db.movies();
        let movie = row("Alien", true);
        repo.insert(&movie).await.unwrap();

        repo.delete(&movie.id).await.unwrap();
        assert!(repo.get_by_id(&movie.id).await.unwrap().is_none());

        let err = repo.delete(&movie.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
