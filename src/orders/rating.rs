use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Order, OrderStatus};
use crate::orders::Actor;
use crate::store::Store;

pub(crate) async fn rate_order(
    store: &dyn Store,
    actor: &Actor,
    order_id: Uuid,
    rating: i32,
    review: Option<String>,
) -> AppResult<Order> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::RatingOutOfRange);
    }

    let mut order = store
        .find_order(order_id)
        .await?
        .ok_or(AppError::OrderNotFound)?;

    if order.user_id != actor.user_id {
        return Err(AppError::Unauthorized("rate this order"));
    }
    if order.status != OrderStatus::Delivered {
        return Err(AppError::NotRatable(order.status));
    }

    // Re-rating overwrites in place; the aggregate absorbs the delta.
    let previous = order.rating;
    order.rating = Some(rating);
    order.review = review;
    store.update_order(&order).await?;

    apply_rating_delta(store, order.restaurant_id, previous, rating).await?;

    info!(order_id = %order.id, rating, "order rated");
    Ok(order)
}

// Incremental aggregate update: one read-modify-write of the running
// sum/count pair instead of scanning every rated order.
async fn apply_rating_delta(
    store: &dyn Store,
    restaurant_id: Uuid,
    previous: Option<i32>,
    new_rating: i32,
) -> AppResult<()> {
    let restaurant = store
        .find_restaurant(restaurant_id)
        .await?
        .ok_or(AppError::RestaurantNotFound)?;

    let (sum, count) = match previous {
        Some(old) => (
            restaurant.rating_sum - i64::from(old) + i64::from(new_rating),
            restaurant.num_reviews,
        ),
        None => (
            restaurant.rating_sum + i64::from(new_rating),
            restaurant.num_reviews + 1,
        ),
    };
    let mean = if count > 0 { sum as f64 / count as f64 } else { 0.0 };

    store
        .update_restaurant_rating(restaurant_id, mean, count, sum)
        .await
}

// Full recompute from every rated order. O(n) in rated-order count, kept as
// a reconciliation tool; re-running with unchanged inputs is idempotent.
pub(crate) async fn recompute_rating(store: &dyn Store, restaurant_id: Uuid) -> AppResult<()> {
    let orders = store.rated_orders_for_restaurant(restaurant_id).await?;
    if orders.is_empty() {
        return Ok(());
    }

    let count = orders.len() as i64;
    let sum: i64 = orders
        .iter()
        .filter_map(|o| o.rating)
        .map(i64::from)
        .sum();
    let mean = sum as f64 / count as f64;

    store
        .update_restaurant_rating(restaurant_id, mean, count, sum)
        .await
}
