use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(restaurant_id: Uuid, name: String, price: Decimal, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            restaurant_id,
            name,
            description: None,
            price,
            category,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }
}
