//! Cart line management.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::Member;
use crate::domain::value_objects::Quantity;
use crate::store::{Store, StoreTx};
use crate::{CommerceError, Result};

#[derive(Clone, Debug, Serialize)]
pub struct CartItemView {
    pub product_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub quantity: u32,
}

#[derive(Clone)]
pub struct CartService<S> {
    store: S,
}

impl<S: Store> CartService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn cart_items(&self, member: &Member) -> Result<Vec<CartItemView>> {
        let mut tx = self.store.begin().await?;
        let items = tx.cart_items_by_member(member.id).await?;
        Ok(items
            .into_iter()
            .map(|item| CartItemView {
                product_id: item.product.id,
                name: item.product.name,
                price: item.product.price.value(),
                image_url: item.product.image_url,
                quantity: item.quantity.value(),
            })
            .collect())
    }

    /// Adds a line to the cart; a repeat add merges into the existing
    /// quantity.
    pub async fn add_cart_item(
        &self,
        member: &Member,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<()> {
        let mut tx = self.store.begin().await?;
        tx.product_by_id(product_id).await?.ok_or(CommerceError::ProductNotFound)?;
        tx.upsert_cart_item(member.id, product_id, quantity).await?;
        tx.commit().await
    }

    /// Removes a line if present; removing an absent line is a no-op.
    pub async fn remove_cart_item(&self, member: &Member, product_id: Uuid) -> Result<()> {
        let mut tx = self.store.begin().await?;
        tx.delete_cart_item(member.id, product_id).await?;
        tx.commit().await
    }
}
