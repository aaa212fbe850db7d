use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{
    ContactInfo, DeliveryAddress, Order, OrderItem, OrderStatus, PaymentStatus,
};
use crate::orders::{Actor, CreateOrderRequest, PlacedOrder};
use crate::store::Store;

const MAX_NOTE_LEN: usize = 200;

// Flat 8% tax, applied post-discount and pre-delivery-fee.
fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

pub(crate) async fn place_order(
    store: &dyn Store,
    actor: &Actor,
    request: CreateOrderRequest,
) -> AppResult<PlacedOrder> {
    let restaurant = store
        .find_restaurant(request.restaurant_id)
        .await?
        .filter(|r| r.is_active)
        .ok_or(AppError::RestaurantNotAvailable)?;

    let user = store
        .find_user(actor.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    validate_address(&request.delivery_address)?;
    validate_contact(&request.contact_info)?;
    if request.items.is_empty() {
        return Err(AppError::InvalidInput("order has no items".to_string()));
    }

    // Snapshot each cart line against the live product and accumulate the
    // subtotal. Everything here must fail before any write happens.
    let mut subtotal = Decimal::ZERO;
    let mut items = Vec::with_capacity(request.items.len());
    let mut cart_categories = Vec::with_capacity(request.items.len());

    for cart_item in &request.items {
        if cart_item.quantity < 1 {
            return Err(AppError::InvalidInput(format!(
                "quantity for product {} must be at least 1",
                cart_item.product_id
            )));
        }
        if let Some(note) = &cart_item.special_instructions {
            if note.chars().count() > MAX_NOTE_LEN {
                return Err(AppError::InvalidInput(format!(
                    "item note exceeds {MAX_NOTE_LEN} characters"
                )));
            }
        }

        let product = store
            .find_product(cart_item.product_id)
            .await?
            .filter(|p| p.is_available)
            .ok_or(AppError::ItemNotAvailable(cart_item.product_id))?;

        if product.restaurant_id != request.restaurant_id {
            return Err(AppError::CrossRestaurantOrder);
        }

        subtotal += product.price * Decimal::from(cart_item.quantity);
        cart_categories.push(product.category.clone());
        items.push(OrderItem {
            product_id: product.id,
            name: product.name,
            price: product.price,
            quantity: cart_item.quantity,
            special_instructions: cart_item.special_instructions.clone(),
        });
    }

    if subtotal < restaurant.delivery_info.min_order {
        return Err(AppError::BelowMinimumOrder(restaurant.delivery_info.min_order));
    }

    // Invalid or out-of-scope coupons are a soft failure: the order goes
    // through at zero discount with no coupon attached.
    let mut discount = Decimal::ZERO;
    let mut applied_coupon: Option<String> = None;
    if let Some(code) = &request.coupon_code {
        if let Some(coupon) = store.find_coupon(code).await? {
            if coupon.is_valid()
                && coupon.applies_to_restaurant(request.restaurant_id)
                && coupon.applies_to_categories(&cart_categories)
            {
                discount = coupon.discount_for(subtotal);
                applied_coupon = Some(coupon.code.clone());
            }
        }
    }

    let delivery_fee = restaurant.delivery_info.delivery_fee;
    let tax = ((subtotal - discount) * tax_rate()).round_dp(2);
    let total = (subtotal - discount + delivery_fee + tax).round_dp(2);

    let now = Utc::now();
    let order = Order {
        id: Uuid::new_v4(),
        user_id: user.id,
        restaurant_id: restaurant.id,
        items,
        subtotal,
        discount,
        tax,
        delivery_fee,
        total,
        delivery_address: request.delivery_address,
        contact_info: request.contact_info,
        payment_method: request.payment_method,
        payment_status: PaymentStatus::Pending,
        payment_id: None,
        coupon_code: applied_coupon.clone(),
        special_instructions: request.special_instructions,
        status: OrderStatus::Pending,
        estimated_delivery: now + Duration::minutes(restaurant.delivery_info.delivery_time),
        delivered_at: None,
        cancelled_at: None,
        cancellation_reason: None,
        rating: None,
        review: None,
        created_at: now,
    };

    store.insert_order(&order, applied_coupon.as_deref()).await?;

    info!(
        order_id = %order.id,
        restaurant_id = %restaurant.id,
        total = %order.total,
        coupon = applied_coupon.as_deref().unwrap_or("-"),
        "order created"
    );

    Ok(PlacedOrder {
        restaurant: restaurant.summary(),
        user: user.summary(),
        order,
    })
}

fn validate_address(address: &DeliveryAddress) -> AppResult<()> {
    let required = [
        ("street", &address.street),
        ("city", &address.city),
        ("state", &address.state),
        ("zip_code", &address.zip_code),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "delivery address is missing {field}"
            )));
        }
    }
    Ok(())
}

fn validate_contact(contact: &ContactInfo) -> AppResult<()> {
    let required = [
        ("name", &contact.name),
        ("phone", &contact.phone),
        ("email", &contact.email),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "contact info is missing {field}"
            )));
        }
    }
    Ok(())
}
