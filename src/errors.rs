use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::OrderStatus;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("User not found")]
    UserNotFound,

    #[error("Restaurant not found")]
    RestaurantNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Restaurant is not available")]
    RestaurantNotAvailable,

    #[error("Product {0} is not available")]
    ItemNotAvailable(Uuid),

    #[error("All items must be from the same restaurant")]
    CrossRestaurantOrder,

    #[error("Minimum order amount is ${0}")]
    BelowMinimumOrder(Decimal),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authorized to {0}")]
    Unauthorized(&'static str),

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order in status {0} cannot be rated")]
    NotRatable(OrderStatus),

    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
}

impl AppError {
    // HTTP-style status class for the transport layer to surface verbatim.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Database(_) => 500,
            AppError::UserNotFound | AppError::RestaurantNotFound | AppError::OrderNotFound => 404,
            AppError::Unauthorized(_) => 403,
            AppError::RestaurantNotAvailable
            | AppError::ItemNotAvailable(_)
            | AppError::CrossRestaurantOrder
            | AppError::BelowMinimumOrder(_)
            | AppError::InvalidInput(_)
            | AppError::InvalidTransition { .. }
            | AppError::NotRatable(_)
            | AppError::RatingOutOfRange => 400,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
