mod common;

use uuid::Uuid;

use common::Fixture;
use foodiehub_core::errors::AppError;
use foodiehub_core::models::{OrderStatus, Role};
use foodiehub_core::orders::Actor;

async fn place_pending_order(f: &Fixture) -> Uuid {
    f.service
        .create_order(&f.customer_actor(), f.two_pizza_request())
        .await
        .unwrap()
        .order
        .id
}

async fn deliver(f: &Fixture, order_id: Uuid) {
    let owner = f.owner_actor();
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ] {
        f.service
            .update_status(&owner, order_id, status, None)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn owner_walks_order_through_forward_path() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;

    deliver(&f, order_id).await;

    let order = f
        .service
        .get_order(&f.customer_actor(), order_id)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
    assert!(order.delivered_at.is_some());
}

#[tokio::test]
async fn owner_cannot_skip_states() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;

    let err = f
        .service
        .update_status(&f.owner_actor(), order_id, OrderStatus::Delivered, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        }
    ));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn only_owner_or_admin_may_update_status() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;

    let err = f
        .service
        .update_status(&f.customer_actor(), order_id, OrderStatus::Confirmed, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.status_code(), 403);

    f.service
        .update_status(&f.admin_actor(), order_id, OrderStatus::Confirmed, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn owner_cancellation_records_reason() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;

    let order = f
        .service
        .update_status(
            &f.owner_actor(),
            order_id,
            OrderStatus::Cancelled,
            Some("out of dough".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert!(order.cancelled_at.is_some());
    assert_eq!(order.cancellation_reason.as_deref(), Some("out of dough"));
}

#[tokio::test]
async fn customer_may_cancel_pending_and_confirmed_only() {
    let f = Fixture::new();

    let order_id = place_pending_order(&f).await;
    let order = f
        .service
        .cancel(&f.customer_actor(), order_id, "changed my mind".to_string())
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert!(order.cancelled_at.is_some());

    let order_id = place_pending_order(&f).await;
    f.service
        .update_status(&f.owner_actor(), order_id, OrderStatus::Confirmed, None)
        .await
        .unwrap();
    f.service
        .cancel(&f.customer_actor(), order_id, "too slow".to_string())
        .await
        .unwrap();

    // Once preparing, the customer is locked out.
    let order_id = place_pending_order(&f).await;
    f.service
        .update_status(&f.owner_actor(), order_id, OrderStatus::Confirmed, None)
        .await
        .unwrap();
    f.service
        .update_status(&f.owner_actor(), order_id, OrderStatus::Preparing, None)
        .await
        .unwrap();
    let err = f
        .service
        .cancel(&f.customer_actor(), order_id, "too late".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[tokio::test]
async fn cancelled_and_delivered_orders_stay_put() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;
    f.service
        .cancel(&f.customer_actor(), order_id, "mistake".to_string())
        .await
        .unwrap();

    let err = f
        .service
        .cancel(&f.customer_actor(), order_id, "again".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));

    let order_id = place_pending_order(&f).await;
    deliver(&f, order_id).await;
    let err = f
        .service
        .update_status(&f.owner_actor(), order_id, OrderStatus::Confirmed, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[tokio::test]
async fn only_the_ordering_customer_may_cancel() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;

    let stranger = Actor::new(Uuid::new_v4(), Role::Customer);
    let err = f
        .service
        .cancel(&stranger, order_id, "not mine".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn rating_requires_delivery_and_valid_range() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;

    let err = f
        .service
        .rate(&f.customer_actor(), order_id, 5, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotRatable(OrderStatus::Pending)));

    deliver(&f, order_id).await;
    for out_of_range in [0, 6] {
        let err = f
            .service
            .rate(&f.customer_actor(), order_id, out_of_range, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RatingOutOfRange));
    }

    let order = f
        .service
        .rate(&f.customer_actor(), order_id, 5, Some("great pie".to_string()))
        .await
        .unwrap();
    assert_eq!(order.rating, Some(5));
    assert_eq!(order.review.as_deref(), Some("great pie"));

    let restaurant = f.store.get_restaurant(f.restaurant.id).unwrap();
    assert_eq!(restaurant.rating, 5.0);
    assert_eq!(restaurant.num_reviews, 1);
}

#[tokio::test]
async fn ratings_aggregate_incrementally() {
    let f = Fixture::new();

    for rating in [5, 3, 4] {
        let order_id = place_pending_order(&f).await;
        deliver(&f, order_id).await;
        f.service
            .rate(&f.customer_actor(), order_id, rating, None)
            .await
            .unwrap();
    }

    let restaurant = f.store.get_restaurant(f.restaurant.id).unwrap();
    assert_eq!(restaurant.rating, 4.0);
    assert_eq!(restaurant.num_reviews, 3);
    assert_eq!(restaurant.rating_sum, 12);
}

#[tokio::test]
async fn re_rating_replaces_the_previous_score() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;
    deliver(&f, order_id).await;

    f.service
        .rate(&f.customer_actor(), order_id, 5, None)
        .await
        .unwrap();
    f.service
        .rate(&f.customer_actor(), order_id, 3, Some("cold on arrival".to_string()))
        .await
        .unwrap();

    let restaurant = f.store.get_restaurant(f.restaurant.id).unwrap();
    assert_eq!(restaurant.rating, 3.0);
    assert_eq!(restaurant.num_reviews, 1);
    assert_eq!(restaurant.rating_sum, 3);
}

#[tokio::test]
async fn recompute_matches_incremental_totals_and_is_idempotent() {
    let f = Fixture::new();

    for rating in [5, 3, 4] {
        let order_id = place_pending_order(&f).await;
        deliver(&f, order_id).await;
        f.service
            .rate(&f.customer_actor(), order_id, rating, None)
            .await
            .unwrap();
    }

    f.service.recompute_rating(f.restaurant.id).await.unwrap();
    let first = f.store.get_restaurant(f.restaurant.id).unwrap();
    assert_eq!(first.rating, 4.0);
    assert_eq!(first.num_reviews, 3);

    f.service.recompute_rating(f.restaurant.id).await.unwrap();
    let second = f.store.get_restaurant(f.restaurant.id).unwrap();
    assert_eq!(second.rating, first.rating);
    assert_eq!(second.num_reviews, first.num_reviews);
    assert_eq!(second.rating_sum, first.rating_sum);
}

#[tokio::test]
async fn recompute_with_no_rated_orders_changes_nothing() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;
    deliver(&f, order_id).await;

    f.service.recompute_rating(f.restaurant.id).await.unwrap();
    let restaurant = f.store.get_restaurant(f.restaurant.id).unwrap();
    assert_eq!(restaurant.rating, 0.0);
    assert_eq!(restaurant.num_reviews, 0);
}

#[tokio::test]
async fn order_visibility_follows_ownership() {
    let f = Fixture::new();
    let order_id = place_pending_order(&f).await;

    // Owning customer, restaurant owner, and admin can all read it.
    f.service
        .get_order(&f.customer_actor(), order_id)
        .await
        .unwrap();
    f.service.get_order(&f.owner_actor(), order_id).await.unwrap();
    f.service.get_order(&f.admin_actor(), order_id).await.unwrap();

    let stranger = Actor::new(Uuid::new_v4(), Role::Customer);
    let err = f.service.get_order(&stranger, order_id).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = f
        .service
        .get_order(&stranger, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::OrderNotFound));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn restaurant_order_listing_is_owner_or_admin_only() {
    let f = Fixture::new();
    place_pending_order(&f).await;
    place_pending_order(&f).await;

    let orders = f
        .service
        .orders_for_restaurant(&f.owner_actor(), f.restaurant.id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);

    let err = f
        .service
        .orders_for_restaurant(&f.customer_actor(), f.restaurant.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let mine = f
        .service
        .orders_for_user(&f.customer_actor())
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
}
