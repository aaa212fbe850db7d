pub mod lifecycle;
pub mod pricing;
pub mod rating;

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{
    ContactInfo, DeliveryAddress, Order, OrderStatus, PaymentMethod, RestaurantSummary, Role,
    UserSummary,
};
use crate::store::Store;

// Already-authenticated caller; credential checks happen upstream.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub restaurant_id: Uuid,
    pub items: Vec<CartItem>,
    pub delivery_address: DeliveryAddress,
    pub contact_info: ContactInfo,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
    pub special_instructions: Option<String>,
}

// Created order plus the display slices the storefront shows alongside it.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub restaurant: RestaurantSummary,
    pub user: UserSummary,
}

pub struct OrderService {
    store: Arc<dyn Store>,
}

impl OrderService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_order(
        &self,
        actor: &Actor,
        request: CreateOrderRequest,
    ) -> AppResult<PlacedOrder> {
        pricing::place_order(self.store.as_ref(), actor, request).await
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        order_id: Uuid,
        new_status: OrderStatus,
        cancellation_reason: Option<String>,
    ) -> AppResult<Order> {
        lifecycle::update_status(self.store.as_ref(), actor, order_id, new_status, cancellation_reason)
            .await
    }

    pub async fn cancel(&self, actor: &Actor, order_id: Uuid, reason: String) -> AppResult<Order> {
        lifecycle::cancel(self.store.as_ref(), actor, order_id, reason).await
    }

    pub async fn rate(
        &self,
        actor: &Actor,
        order_id: Uuid,
        rating: i32,
        review: Option<String>,
    ) -> AppResult<Order> {
        rating::rate_order(self.store.as_ref(), actor, order_id, rating, review).await
    }

    // Full recompute over every rated order; kept as a repair tool beside
    // the incremental path `rate` drives.
    pub async fn recompute_rating(&self, restaurant_id: Uuid) -> AppResult<()> {
        rating::recompute_rating(self.store.as_ref(), restaurant_id).await
    }

    pub async fn get_order(&self, actor: &Actor, order_id: Uuid) -> AppResult<Order> {
        let order = self
            .store
            .find_order(order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;

        if order.user_id == actor.user_id || actor.is_admin() {
            return Ok(order);
        }

        let restaurant = self
            .store
            .find_restaurant(order.restaurant_id)
            .await?
            .ok_or(AppError::RestaurantNotFound)?;
        if restaurant.owner_id == actor.user_id {
            Ok(order)
        } else {
            Err(AppError::Unauthorized("view this order"))
        }
    }

    pub async fn orders_for_user(&self, actor: &Actor) -> AppResult<Vec<Order>> {
        self.store.orders_for_user(actor.user_id).await
    }

    pub async fn orders_for_restaurant(
        &self,
        actor: &Actor,
        restaurant_id: Uuid,
    ) -> AppResult<Vec<Order>> {
        let restaurant = self
            .store
            .find_restaurant(restaurant_id)
            .await?
            .ok_or(AppError::RestaurantNotFound)?;
        if restaurant.owner_id != actor.user_id && !actor.is_admin() {
            return Err(AppError::Unauthorized("view these orders"));
        }
        self.store.orders_for_restaurant(restaurant_id).await
    }
}
