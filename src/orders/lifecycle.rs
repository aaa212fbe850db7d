use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Order, OrderStatus};
use crate::orders::Actor;
use crate::store::Store;

// Single transition table shared by the owner/admin status-update path and
// the customer self-cancel path.
pub fn allowed_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[Preparing, Cancelled],
        Preparing => &[OutForDelivery],
        OutForDelivery => &[Delivered],
        Delivered | Cancelled => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

pub(crate) async fn update_status(
    store: &dyn Store,
    actor: &Actor,
    order_id: Uuid,
    new_status: OrderStatus,
    cancellation_reason: Option<String>,
) -> AppResult<Order> {
    let mut order = store
        .find_order(order_id)
        .await?
        .ok_or(AppError::OrderNotFound)?;

    let restaurant = store
        .find_restaurant(order.restaurant_id)
        .await?
        .ok_or(AppError::RestaurantNotFound)?;
    if restaurant.owner_id != actor.user_id && !actor.is_admin() {
        return Err(AppError::Unauthorized("update this order"));
    }

    if !can_transition(order.status, new_status) {
        return Err(AppError::InvalidTransition {
            from: order.status,
            to: new_status,
        });
    }

    match new_status {
        OrderStatus::Delivered => order.mark_delivered(),
        OrderStatus::Cancelled => order.mark_cancelled(cancellation_reason),
        status => order.status = status,
    }

    store.update_order(&order).await?;
    info!(order_id = %order.id, status = %order.status, "order status updated");
    Ok(order)
}

pub(crate) async fn cancel(
    store: &dyn Store,
    actor: &Actor,
    order_id: Uuid,
    reason: String,
) -> AppResult<Order> {
    let mut order = store
        .find_order(order_id)
        .await?
        .ok_or(AppError::OrderNotFound)?;

    if order.user_id != actor.user_id {
        return Err(AppError::Unauthorized("cancel this order"));
    }

    if !can_transition(order.status, OrderStatus::Cancelled) {
        return Err(AppError::InvalidTransition {
            from: order.status,
            to: OrderStatus::Cancelled,
        });
    }

    order.mark_cancelled(Some(reason));
    store.update_order(&order).await?;
    info!(order_id = %order.id, "order cancelled by customer");
    Ok(order)
}
