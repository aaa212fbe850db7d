pub mod coupon;
pub mod order;
pub mod product;
pub mod restaurant;
pub mod user;

pub use coupon::*;
pub use order::*;
pub use product::*;
pub use restaurant::*;
pub use user::*;
