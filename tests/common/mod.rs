use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use foodiehub_core::models::{
    ContactInfo, DeliveryAddress, PaymentMethod, Product, Restaurant, Role, User,
};
use foodiehub_core::orders::{Actor, CartItem, CreateOrderRequest, OrderService};
use foodiehub_core::store::MemoryStore;

pub fn money(s: &str) -> Decimal {
    s.parse().unwrap()
}

// Seeded marketplace: one restaurant (min order 10.00, fee 2.99, 30 min)
// with a 10.00 pizza and a 7.50 burger.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub service: OrderService,
    pub customer: User,
    pub owner: User,
    pub restaurant: Restaurant,
    pub pizza: Product,
    pub burger: Product,
}

impl Fixture {
    pub fn new() -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();

        let store = Arc::new(MemoryStore::new());

        let owner = User::new(
            "Olive Romano".to_string(),
            "olive@marios.example".to_string(),
            Role::RestaurantOwner,
        );
        let customer = User::new(
            "Casey Diner".to_string(),
            "casey@example.com".to_string(),
            Role::Customer,
        );

        let restaurant = Restaurant::new(
            owner.id,
            "Mario's Pizzeria".to_string(),
            vec!["italian".to_string()],
        );
        let pizza = Product::new(
            restaurant.id,
            "Margherita".to_string(),
            money("10.00"),
            "pizza".to_string(),
        );
        let burger = Product::new(
            restaurant.id,
            "Smash Burger".to_string(),
            money("7.50"),
            "burgers".to_string(),
        );

        store.add_user(owner.clone());
        store.add_user(customer.clone());
        store.add_restaurant(restaurant.clone());
        store.add_product(pizza.clone());
        store.add_product(burger.clone());

        let service = OrderService::new(store.clone());

        Self {
            store,
            service,
            customer,
            owner,
            restaurant,
            pizza,
            burger,
        }
    }

    pub fn customer_actor(&self) -> Actor {
        Actor::new(self.customer.id, Role::Customer)
    }

    pub fn owner_actor(&self) -> Actor {
        Actor::new(self.owner.id, Role::RestaurantOwner)
    }

    pub fn admin_actor(&self) -> Actor {
        Actor::new(Uuid::new_v4(), Role::Admin)
    }

    // Two pizzas: subtotal 20.00, comfortably above the minimum.
    pub fn two_pizza_request(&self) -> CreateOrderRequest {
        self.request(vec![CartItem {
            product_id: self.pizza.id,
            quantity: 2,
            special_instructions: None,
        }])
    }

    pub fn request(&self, items: Vec<CartItem>) -> CreateOrderRequest {
        CreateOrderRequest {
            restaurant_id: self.restaurant.id,
            items,
            delivery_address: address(),
            contact_info: contact(),
            payment_method: PaymentMethod::CreditCard,
            coupon_code: None,
            special_instructions: None,
        }
    }
}

pub fn address() -> DeliveryAddress {
    DeliveryAddress {
        street: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        country: "United States".to_string(),
        instructions: None,
    }
}

pub fn contact() -> ContactInfo {
    ContactInfo {
        name: "Casey Diner".to_string(),
        phone: "555-0100".to_string(),
        email: "casey@example.com".to_string(),
    }
}
