use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub max_discount: Option<Decimal>,
    // Empty list means no restriction.
    pub applicable_restaurants: Vec<Uuid>,
    pub applicable_categories: Vec<String>,
    pub max_uses: Option<i64>,
    pub used_count: i64,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    pub fn new(code: &str, discount_type: DiscountType, discount_value: Decimal) -> Self {
        Self {
            code: code.to_uppercase(),
            discount_type,
            discount_value,
            max_discount: None,
            applicable_restaurants: Vec::new(),
            applicable_categories: Vec::new(),
            max_uses: None,
            used_count: 0,
            valid_until: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        // Check if expired
        if let Some(valid_until) = self.valid_until {
            if Utc::now() > valid_until {
                return false;
            }
        }

        // Check usage limit
        if let Some(max_uses) = self.max_uses {
            if self.used_count >= max_uses {
                return false;
            }
        }

        true
    }

    pub fn applies_to_restaurant(&self, restaurant_id: Uuid) -> bool {
        self.applicable_restaurants.is_empty()
            || self.applicable_restaurants.contains(&restaurant_id)
    }

    // The cart must hold at least one item in a restricted category.
    pub fn applies_to_categories(&self, cart_categories: &[String]) -> bool {
        self.applicable_categories.is_empty()
            || cart_categories
                .iter()
                .any(|c| self.applicable_categories.contains(c))
    }

    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        match self.discount_type {
            DiscountType::Percentage => {
                let mut discount = subtotal * self.discount_value / Decimal::new(100, 0);
                if let Some(max_discount) = self.max_discount {
                    if discount > max_discount {
                        discount = max_discount;
                    }
                }
                discount
            }
            // A fixed discount never exceeds the subtotal.
            DiscountType::Fixed => self.discount_value.min(subtotal),
        }
    }
}
