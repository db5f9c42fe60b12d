//! # Order Ledger Service
//!
//! Order creation and the rental return path. All pricing decisions are
//! delegated to `reel_core::pricing`; this layer stamps the clock, does
//! the lookups, and persists the outcome.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use reel_core::authz::authorize;
use reel_core::error::CoreError;
use reel_core::pricing::{delay_penalty, price_order, RentalTerms};
use reel_core::validation::validate_uuid;
use reel_core::{Order, OrderType, Principal, Role};
use reel_db::{generate_order_id, Database};

use crate::catalog::MovieCatalog;
use crate::error::{ServiceError, ServiceResult};

/// Order service.
#[derive(Clone)]
pub struct OrderLedger {
    db: Database,
    catalog: MovieCatalog,
    terms: RentalTerms,
}

impl OrderLedger {
    /// Create a new order ledger with the deployment's rental terms.
    pub fn new(db: Database, terms: RentalTerms) -> Self {
        let catalog = MovieCatalog::new(db.clone());
        OrderLedger { db, catalog, terms }
    }

    /// Places an order for the authenticated principal.
    ///
    /// The price and (for rentals) the due date are derived here, once,
    /// from the movie's current prices and the order timestamp. Later
    /// catalog edits never touch an existing order.
    pub async fn create_order(
        &self,
        movie_id: &str,
        order_type: &str,
        principal: Option<&Principal>,
    ) -> ServiceResult<Order> {
        authorize(principal, Role::Customer)?;
        let principal = principal.ok_or(ServiceError::Unauthenticated)?;

        let order_type: OrderType = order_type.parse()?;
        let movie = self.catalog.get_movie(movie_id).await?;

        let ordered_at = Utc::now();
        let pricing = price_order(&movie, order_type, ordered_at, self.terms);

        let order = Order {
            id: generate_order_id(),
            movie_id: movie.id.clone(),
            user_id: principal.id.clone(),
            order_type,
            order_datetime: ordered_at,
            price_paid_cents: pricing.price.cents(),
            expected_return_date: pricing.expected_return_date,
            returned_date: None,
            delay_penalty_paid_cents: 0,
        };

        self.db
            .orders()
            .insert(&order)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        info!(
            id = %order.id,
            movie_id = %order.movie_id,
            order_type = %order.order_type,
            price_cents = order.price_paid_cents,
            "Order created"
        );

        Ok(order)
    }

    /// Records the return of a rental.
    ///
    /// The return date is caller-supplied (backdating a drop-box return
    /// is legitimate). An on-time return carries no penalty; a late one
    /// is charged per day against the price paid.
    pub async fn return_order(
        &self,
        order_id: &str,
        returned_date: NaiveDate,
        principal: Option<&Principal>,
    ) -> ServiceResult<Order> {
        authorize(principal, Role::Customer)?;
        validate_uuid(order_id)?;

        let order = self
            .db
            .orders()
            .get_by_id(order_id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", order_id)))?;

        let expected = match order.order_type {
            OrderType::Rental => order
                .expected_return_date
                .ok_or_else(|| ServiceError::Internal("rental without a due date".to_string()))?,
            OrderType::Purchase => {
                return Err(CoreError::NotReturnable {
                    order_id: order_id.to_string(),
                    reason: "purchases have no return path".to_string(),
                }
                .into());
            }
        };

        if order.returned_date.is_some() {
            return Err(CoreError::NotReturnable {
                order_id: order_id.to_string(),
                reason: "already returned".to_string(),
            }
            .into());
        }

        let penalty = delay_penalty(
            order.price_paid(),
            self.terms.penalty_rate,
            expected,
            returned_date,
        );

        debug!(
            id = %order_id,
            expected = %expected,
            returned = %returned_date,
            penalty_cents = penalty.cents(),
            "Processing return"
        );

        self.db
            .orders()
            .record_return(order_id, returned_date, penalty.cents())
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        info!(id = %order_id, penalty_cents = penalty.cents(), "Order returned");

        self.db
            .orders()
            .get_by_id(order_id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .ok_or_else(|| ServiceError::Internal("order vanished after return".to_string()))
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
    use crate::App;
    use chrono::Duration;

    async fn seed_movie(app: &App, rental_cents: i64, sale_cents: i64) -> String {
        let admin = seed_user(&app.db, "seeder", Role::Admin).await;
        let movie = app
            .catalog
            .create_movie(
                MovieDraft {
                    title: "Alien".to_string(),
                    stock: 5,
                    rental_price_cents: rental_cents,
                    sale_price_cents: sale_cents,
                    availability: true,
                    images: vec![],
                },
                Some(&admin),
            )
            .await
            .unwrap();
        movie.id
    }

    #[tokio::test]
    async fn test_create_requires_authentication() {
        let app = app().await;
        let err = app.orders.create_order("m-1", "rental", None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_rental_gets_rental_price_and_due_date() {
        let app = app().await;
        let movie_id = seed_movie(&app, 399, 1499).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let order = app
            .orders
            .create_order(&movie_id, "rental", Some(&customer))
            .await
            .unwrap();

        assert_eq!(order.order_type, OrderType::Rental);
        assert_eq!(order.price_paid_cents, 399);
        assert_eq!(
            order.expected_return_date,
            Some(order.order_datetime.date_naive() + Duration::days(14))
        );
        assert_eq!(order.delay_penalty_paid_cents, 0);
    }

    #[tokio::test]
    async fn test_purchase_gets_sale_price_and_no_due_date() {
        let app = app().await;
        let movie_id = seed_movie(&app, 399, 1499).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let order = app
            .orders
            .create_order(&movie_id, "purchase", Some(&customer))
            .await
            .unwrap();

        assert_eq!(order.price_paid_cents, 1499);
        assert!(order.expected_return_date.is_none());
    }

    #[tokio::test]
    async fn test_unknown_order_type_is_invalid() {
        let app = app().await;
        let movie_id = seed_movie(&app, 399, 1499).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let err = app
            .orders
            .create_order(&movie_id, "lease", Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_missing_movie_is_not_found() {
        let app = app().await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let err = app
            .orders
            .create_order(&reel_db::generate_movie_id(), "rental", Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_on_time_return_has_no_penalty() {
        let app = app().await;
        let movie_id = seed_movie(&app, 1000, 2000).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let order = app
            .orders
            .create_order(&movie_id, "rental", Some(&customer))
            .await
            .unwrap();

        let due = order.expected_return_date.unwrap();
        let returned = app
            .orders
            .return_order(&order.id, due, Some(&customer))
            .await
            .unwrap();

        assert_eq!(returned.returned_date, Some(due));
        assert_eq!(returned.delay_penalty_paid_cents, 0);
    }

    #[tokio::test]
    async fn test_three_days_late_charges_per_day() {
        let app = app().await;
        let movie_id = seed_movie(&app, 1000, 2000).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let order = app
            .orders
            .create_order(&movie_id, "rental", Some(&customer))
            .await
            .unwrap();

        // $10.00 rental at 10%/day, three days late: $3.00
        let late = order.expected_return_date.unwrap() + Duration::days(3);
        let returned = app
            .orders
            .return_order(&order.id, late, Some(&customer))
            .await
            .unwrap();

        assert_eq!(returned.delay_penalty_paid_cents, 300);
        // Creation-time fields frozen
        assert_eq!(returned.price_paid_cents, 1000);
        assert_eq!(returned.expected_return_date, order.expected_return_date);
    }

    #[tokio::test]
    async fn test_returning_a_purchase_is_invalid() {
        let app = app().await;
        let movie_id = seed_movie(&app, 1000, 2000).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let order = app
            .orders
            .create_order(&movie_id, "purchase", Some(&customer))
            .await
            .unwrap();

        let err = app
            .orders
            .return_order(&order.id, Utc::now().date_naive(), Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_double_return_is_invalid() {
        let app = app().await;
        let movie_id = seed_movie(&app, 1000, 2000).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let order = app
            .orders
            .create_order(&movie_id, "rental", Some(&customer))
            .await
            .unwrap();

        let due = order.expected_return_date.unwrap();
        app.orders
            .return_order(&order.id, due, Some(&customer))
            .await
            .unwrap();

        let err = app
            .orders
            .return_order(&order.id, due, Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_return_of_unknown_order_is_not_found() {
        let app = app().await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let err = app
            .orders
            .return_order(&generate_order_id(), Utc::now().date_naive(), Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_return_with_malformed_id_is_invalid() {
        let app = app().await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let err = app
            .orders
            .return_order("not-a-uuid", Utc::now().date_naive(), Some(&customer))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_catalog_edits_never_touch_existing_orders() {
        let app = app().await;
        let movie_id = seed_movie(&app, 399, 1499).await;
        let admin = seed_user(&app.db, "a1", Role::Admin).await;
        let customer = seed_user(&app.db, "c1", Role::Customer).await;

        let order = app
            .orders
            .create_order(&movie_id, "rental", Some(&customer))
            .await
            .unwrap();

        app.catalog
            .update_movie_field(&movie_id, "rental_price", "999", Some(&admin))
            .await
            .unwrap();

        let unchanged = app.db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(unchanged.price_paid_cents, 399);
    }
}
