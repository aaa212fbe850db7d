use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Vec<String>,
    pub delivery_info: DeliveryInfo,
    pub rating: f64,
    pub num_reviews: i64,
    // Running sum backing the incremental rating average.
    pub rating_sum: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub delivery_fee: Decimal,
    pub min_order: Decimal,
    pub delivery_time: i64, // minutes
}

impl Default for DeliveryInfo {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(299, 2),
            min_order: Decimal::new(10, 0),
            delivery_time: 30,
        }
    }
}

// Display-only slice of a restaurant embedded in order responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub name: String,
    pub cuisine: Vec<String>,
    pub delivery_info: DeliveryInfo,
}

impl Restaurant {
    pub fn new(owner_id: Uuid, name: String, cuisine: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            description: None,
            cuisine,
            delivery_info: DeliveryInfo::default(),
            rating: 0.0,
            num_reviews: 0,
            rating_sum: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn summary(&self) -> RestaurantSummary {
        RestaurantSummary {
            name: self.name.clone(),
            cuisine: self.cuisine.clone(),
            delivery_info: self.delivery_info.clone(),
        }
    }
}
