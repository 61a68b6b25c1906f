//! Aggregates module
pub mod cart;
pub mod coupon;
pub mod member;
pub mod order;
pub mod product;

pub use cart::CartItem;
pub use coupon::Coupon;
pub use member::Member;
pub use order::{NewOrder, Order};
pub use product::Product;
