pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{Coupon, Order, Product, Restaurant, User};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

// Document-store boundary of the order engine. Handlers receive a store
// handle instead of reaching for a connection singleton, so tests can run
// against `MemoryStore`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_restaurant(&self, id: Uuid) -> AppResult<Option<Restaurant>>;
    async fn find_product(&self, id: Uuid) -> AppResult<Option<Product>>;
    // Coupon codes are matched case-insensitively.
    async fn find_coupon(&self, code: &str) -> AppResult<Option<Coupon>>;
    async fn find_order(&self, id: Uuid) -> AppResult<Option<Order>>;

    // Newest first.
    async fn orders_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>>;
    async fn orders_for_restaurant(&self, restaurant_id: Uuid) -> AppResult<Vec<Order>>;
    // Orders carrying a rating > 0, for the full rating recompute.
    async fn rated_orders_for_restaurant(&self, restaurant_id: Uuid) -> AppResult<Vec<Order>>;

    // Persists the order and, when a coupon was applied, bumps its
    // used_count in the same transactional unit.
    async fn insert_order(&self, order: &Order, applied_coupon: Option<&str>) -> AppResult<()>;
    async fn update_order(&self, order: &Order) -> AppResult<()>;
    async fn update_restaurant_rating(
        &self,
        restaurant_id: Uuid,
        rating: f64,
        num_reviews: i64,
        rating_sum: i64,
    ) -> AppResult<()>;
}
