//! # Order Repository
//!
//! Database operations for orders (the OrderStore contract).
//!
//! ## Order Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Writes                                      │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── insert() - the full row, price and due date already frozen     │
//! │                                                                         │
//! │  2. RETURN (rentals only)                                              │
//! │     └── record_return() - a PARTIAL update touching exactly            │
//! │         returned_date and delay_penalty_paid_cents, nothing else.      │
//! │         Creation-time fields are never rewritten.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use reel_core::Order;

const ORDER_COLUMNS: &str = "id, movie_id, user_id, order_type, order_datetime, \
     price_paid_cents, expected_return_date, returned_date, delay_penalty_paid_cents";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Inserts a fully populated order.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - movie or user doesn't exist
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(
            id = %order.id,
            movie_id = %order.movie_id,
            order_type = %order.order_type,
            "Inserting order"
        );

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, movie_id, user_id, order_type, order_datetime,
                price_paid_cents, expected_return_date, returned_date,
                delay_penalty_paid_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&order.id)
        .bind(&order.movie_id)
        .bind(&order.user_id)
        .bind(order.order_type)
        .bind(order.order_datetime)
        .bind(order.price_paid_cents)
        .bind(order.expected_return_date)
        .bind(order.returned_date)
        .bind(order.delay_penalty_paid_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records a return: partial update of exactly two columns.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - order doesn't exist
    pub async fn record_return(
        &self,
        id: &str,
        returned_date: NaiveDate,
        delay_penalty_paid_cents: i64,
    ) -> DbResult<()> {
        debug!(
            id = %id,
            returned_date = %returned_date,
            penalty_cents = delay_penalty_paid_cents,
            "Recording order return"
        );

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET returned_date = ?2, delay_penalty_paid_cents = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(returned_date)
        .bind(delay_penalty_paid_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
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
    use reel_core::{OrderType, Role};

    async fn db_with_movie_and_user() -> (Database, String, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let now = Utc::now();
        let movie = MovieRow {
            id: generate_movie_id(),
            title: "Alien".to_string(),
            stock: 3,
            rental_price_cents: 399,
            sale_price_cents: 1499,
            availability: true,
            images: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };
        db.movies().insert(&movie).await.unwrap();

        let user = UserRow {
            id: generate_user_id(),
            username: "ripley".to_string(),
            email: "ripley@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Customer,
            created_at: now,
        };
        db.users().insert(&user).await.unwrap();

        (db, movie.id, user.id)
    }

    fn rental(movie_id: &str, user_id: &str) -> Order {
        let now = Utc::now();
        Order {
            id: generate_order_id(),
            movie_id: movie_id.to_string(),
            user_id: user_id.to_string(),
            order_type: OrderType::Rental,
            order_datetime: now,
            price_paid_cents: 399,
            expected_return_date: Some(now.date_naive() + chrono::Duration::days(14)),
            returned_date: None,
            delay_penalty_paid_cents: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (db, movie_id, user_id) = db_with_movie_and_user().await;
        let order = rental(&movie_id, &user_id);

        db.orders().insert(&order).await.unwrap();

        let found = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(found.order_type, OrderType::Rental);
        assert_eq!(found.price_paid_cents, 399);
        assert_eq!(found.expected_return_date, order.expected_return_date);
        assert!(found.returned_date.is_none());
        assert_eq!(found.delay_penalty_paid_cents, 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_dangling_movie() {
        let (db, _movie_id, user_id) = db_with_movie_and_user().await;
        let order = rental("no-such-movie", &user_id);

        let err = db.orders().insert(&order).await.unwrap_err();
        assert!(err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn test_record_return_is_partial() {
        let (db, movie_id, user_id) = db_with_movie_and_user().await;
        let order = rental(&movie_id, &user_id);
        db.orders().insert(&order).await.unwrap();

        let returned = order.expected_return_date.unwrap() + chrono::Duration::days(2);
        db.orders()
            .record_return(&order.id, returned, 80)
            .await
            .unwrap();

        let found = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(found.returned_date, Some(returned));
        assert_eq!(found.delay_penalty_paid_cents, 80);
        // Creation-time fields untouched
        assert_eq!(found.price_paid_cents, order.price_paid_cents);
        assert_eq!(found.expected_return_date, order.expected_return_date);
    }

    #[tokio::test]
    async fn test_referenced_movie_cannot_be_deleted() {
        let (db, movie_id, user_id) = db_with_movie_and_user().await;
        db.orders().insert(&rental(&movie_id, &user_id)).await.unwrap();

        let err = db.movies().delete(&movie_id).await.unwrap_err();
        assert!(err.is_foreign_key_violation());

        // Movie is still there
        assert!(db.movies().get_by_id(&movie_id).await.unwrap().is_some());
    }
}
