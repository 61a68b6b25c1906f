//! Storage collaborators behind a unit-of-work seam.
//!
//! Every mutation in an order placement must land together or not at all, so
//! the store hands out transactions: [`Store::begin`] opens a [`StoreTx`]
//! carrying all collaborator operations, and dropping one without
//! [`StoreTx::commit`] rolls everything back. Read paths use the same seam
//! for a single consistent snapshot.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::aggregates::{CartItem, Coupon, Member, NewOrder, Order, Product};
use crate::domain::value_objects::{Amount, Quantity};
use crate::Result;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    type Tx: StoreTx;

    async fn begin(&self) -> Result<Self::Tx>;
}

/// One all-or-nothing unit of work.
#[async_trait]
pub trait StoreTx: Send {
    async fn product_by_id(&mut self, id: Uuid) -> Result<Option<Product>>;
    async fn products(&mut self) -> Result<Vec<Product>>;
    async fn insert_product(&mut self, name: &str, price: Amount, image_url: &str)
        -> Result<Product>;

    async fn member_by_credentials(&mut self, email: &str, password: &str)
        -> Result<Option<Member>>;

    async fn coupon_by_id(&mut self, id: Uuid) -> Result<Option<Coupon>>;
    async fn coupon_by_id_and_owner(&mut self, id: Uuid, member_id: Uuid)
        -> Result<Option<Coupon>>;
    async fn coupons(&mut self) -> Result<Vec<Coupon>>;
    async fn unused_coupons_by_owner(&mut self, member_id: Uuid) -> Result<Vec<Coupon>>;
    async fn update_coupon(&mut self, coupon: &Coupon, member_id: Uuid) -> Result<()>;

    async fn save_order(&mut self, order: NewOrder, member_id: Uuid) -> Result<Order>;
    async fn order_by_id(&mut self, id: Uuid) -> Result<Option<Order>>;
    async fn orders_by_member(&mut self, member_id: Uuid) -> Result<Vec<Order>>;
    /// Persisted order-line rows for `(product_id, order_id)`, one per unit.
    async fn order_product_count(&mut self, product_id: Uuid, order_id: Uuid) -> Result<u32>;

    async fn cart_items_by_member(&mut self, member_id: Uuid) -> Result<Vec<CartItem>>;
    async fn upsert_cart_item(&mut self, member_id: Uuid, product_id: Uuid, quantity: Quantity)
        -> Result<()>;
    async fn delete_cart_item(&mut self, member_id: Uuid, product_id: Uuid) -> Result<()>;

    async fn commit(self) -> Result<()>;
}
