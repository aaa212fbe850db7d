use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{Coupon, Order, Product, Restaurant, User};
use crate::store::Store;

// In-memory stand-in for the document store. One lock guards all
// collections, which also makes insert_order's order+coupon write a single
// atomic step.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

#[derive(Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    restaurants: HashMap<Uuid, Restaurant>,
    products: HashMap<Uuid, Product>,
    coupons: HashMap<String, Coupon>,
    orders: HashMap<Uuid, Order>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.inner.lock().users.insert(user.id, user);
    }

    pub fn add_restaurant(&self, restaurant: Restaurant) {
        self.inner.lock().restaurants.insert(restaurant.id, restaurant);
    }

    pub fn add_product(&self, product: Product) {
        self.inner.lock().products.insert(product.id, product);
    }

    pub fn add_coupon(&self, coupon: Coupon) {
        self.inner
            .lock()
            .coupons
            .insert(coupon.code.clone(), coupon);
    }

    pub fn get_restaurant(&self, id: Uuid) -> Option<Restaurant> {
        self.inner.lock().restaurants.get(&id).cloned()
    }

    pub fn get_coupon(&self, code: &str) -> Option<Coupon> {
        self.inner.lock().coupons.get(&code.to_uppercase()).cloned()
    }

    pub fn order_count(&self) -> usize {
        self.inner.lock().orders.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.inner.lock().users.get(&id).cloned())
    }

    async fn find_restaurant(&self, id: Uuid) -> AppResult<Option<Restaurant>> {
        Ok(self.inner.lock().restaurants.get(&id).cloned())
    }

    async fn find_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.inner.lock().products.get(&id).cloned())
    }

    async fn find_coupon(&self, code: &str) -> AppResult<Option<Coupon>> {
        Ok(self.inner.lock().coupons.get(&code.to_uppercase()).cloned())
    }

    async fn find_order(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.inner.lock().orders.get(&id).cloned())
    }

    async fn orders_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .inner
            .lock()
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn orders_for_restaurant(&self, restaurant_id: Uuid) -> AppResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .inner
            .lock()
            .orders
            .values()
            .filter(|o| o.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn rated_orders_for_restaurant(&self, restaurant_id: Uuid) -> AppResult<Vec<Order>> {
        let orders = self
            .inner
            .lock()
            .orders
            .values()
            .filter(|o| o.restaurant_id == restaurant_id && o.rating.unwrap_or(0) > 0)
            .cloned()
            .collect();
        Ok(orders)
    }

    async fn insert_order(&self, order: &Order, applied_coupon: Option<&str>) -> AppResult<()> {
        let mut inner = self.inner.lock();
        inner.orders.insert(order.id, order.clone());
        if let Some(code) = applied_coupon {
            if let Some(coupon) = inner.coupons.get_mut(code) {
                coupon.used_count += 1;
            }
        }
        Ok(())
    }

    async fn update_order(&self, order: &Order) -> AppResult<()> {
        self.inner.lock().orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn update_restaurant_rating(
        &self,
        restaurant_id: Uuid,
        rating: f64,
        num_reviews: i64,
        rating_sum: i64,
    ) -> AppResult<()> {
        if let Some(restaurant) = self.inner.lock().restaurants.get_mut(&restaurant_id) {
            restaurant.rating = rating;
            restaurant.num_reviews = num_reviews;
            restaurant.rating_sum = rating_sum;
        }
        Ok(())
    }
}
