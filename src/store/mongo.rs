use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, Database as MongoDatabase};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{Coupon, Order, Product, Restaurant, User};
use crate::store::Store;

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: MongoDatabase,
}

impl MongoStore {
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let db = client.database(&config.mongodb_db);
        Ok(Self { client, db })
    }

    fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    fn restaurants(&self) -> Collection<Restaurant> {
        self.db.collection("restaurants")
    }

    fn products(&self) -> Collection<Product> {
        self.db.collection("products")
    }

    fn coupons(&self) -> Collection<Coupon> {
        self.db.collection("coupons")
    }

    fn orders(&self) -> Collection<Order> {
        self.db.collection("orders")
    }

    fn newest_first() -> FindOptions {
        FindOptions::builder().sort(doc! { "created_at": -1 }).build()
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = self
            .users()
            .find_one(doc! { "id": id.to_string() }, None)
            .await?;
        Ok(user)
    }

    async fn find_restaurant(&self, id: Uuid) -> AppResult<Option<Restaurant>> {
        let restaurant = self
            .restaurants()
            .find_one(doc! { "id": id.to_string() }, None)
            .await?;
        Ok(restaurant)
    }

    async fn find_product(&self, id: Uuid) -> AppResult<Option<Product>> {
        let product = self
            .products()
            .find_one(doc! { "id": id.to_string() }, None)
            .await?;
        Ok(product)
    }

    async fn find_coupon(&self, code: &str) -> AppResult<Option<Coupon>> {
        // Codes are stored uppercased.
        let coupon = self
            .coupons()
            .find_one(doc! { "code": code.to_uppercase() }, None)
            .await?;
        Ok(coupon)
    }

    async fn find_order(&self, id: Uuid) -> AppResult<Option<Order>> {
        let order = self
            .orders()
            .find_one(doc! { "id": id.to_string() }, None)
            .await?;
        Ok(order)
    }

    async fn orders_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>> {
        let cursor = self
            .orders()
            .find(doc! { "user_id": user_id.to_string() }, Self::newest_first())
            .await?;
        let orders: Vec<Order> = cursor.try_collect().await?;
        Ok(orders)
    }

    async fn orders_for_restaurant(&self, restaurant_id: Uuid) -> AppResult<Vec<Order>> {
        let cursor = self
            .orders()
            .find(
                doc! { "restaurant_id": restaurant_id.to_string() },
                Self::newest_first(),
            )
            .await?;
        let orders: Vec<Order> = cursor.try_collect().await?;
        Ok(orders)
    }

    async fn rated_orders_for_restaurant(&self, restaurant_id: Uuid) -> AppResult<Vec<Order>> {
        let cursor = self
            .orders()
            .find(
                doc! {
                    "restaurant_id": restaurant_id.to_string(),
                    "rating": { "$gt": 0 },
                },
                None,
            )
            .await?;
        let orders: Vec<Order> = cursor.try_collect().await?;
        Ok(orders)
    }

    async fn insert_order(&self, order: &Order, applied_coupon: Option<&str>) -> AppResult<()> {
        match applied_coupon {
            None => {
                self.orders().insert_one(order, None).await?;
            }
            Some(code) => {
                // Order insert and coupon counter bump commit together.
                let mut session = self.client.start_session(None).await?;
                session.start_transaction(None).await?;
                self.orders()
                    .insert_one_with_session(order, None, &mut session)
                    .await?;
                self.coupons()
                    .update_one_with_session(
                        doc! { "code": code },
                        doc! { "$inc": { "used_count": 1 } },
                        None,
                        &mut session,
                    )
                    .await?;
                session.commit_transaction().await?;
            }
        }
        Ok(())
    }

    async fn update_order(&self, order: &Order) -> AppResult<()> {
        self.orders()
            .replace_one(doc! { "id": order.id.to_string() }, order, None)
            .await?;
        Ok(())
    }

    async fn update_restaurant_rating(
        &self,
        restaurant_id: Uuid,
        rating: f64,
        num_reviews: i64,
        rating_sum: i64,
    ) -> AppResult<()> {
        self.restaurants()
            .update_one(
                doc! { "id": restaurant_id.to_string() },
                doc! { "$set": {
                    "rating": rating,
                    "num_reviews": num_reviews,
                    "rating_sum": rating_sum,
                } },
                None,
            )
            .await?;
        Ok(())
    }
}
