//! Order placement and lookup.
//!
//! The submitted total is never trusted: every line is re-resolved against
//! the catalog and the recomputed sum must match exactly, which catches a
//! client resubmitting a stale total after prices changed. Placement runs
//! inside one store transaction, so a failure consumes no coupon, persists
//! no order and deletes nothing from the cart.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{Member, NewOrder, Order, Product};
use crate::domain::value_objects::{Amount, Quantity};
use crate::store::{Store, StoreTx};
use crate::{CommerceError, Result};

/// One requested cart line.
#[derive(Clone, Debug)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: Quantity,
}

/// Checkout input as submitted by the client.
#[derive(Clone, Debug)]
pub struct PlaceOrder {
    pub lines: Vec<OrderLine>,
    pub total_amount: Amount,
    pub delivery_amount: Amount,
    pub address: String,
    pub coupon_id: Option<Uuid>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderProductView {
    pub product_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub total_amount: i64,
    pub discounted_amount: i64,
    pub delivery_amount: i64,
    pub address: String,
    pub products: Vec<OrderProductView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderSummaryView {
    pub id: Uuid,
    pub products: Vec<OrderProductView>,
}

#[derive(Clone)]
pub struct OrderService<S> {
    store: S,
}

impl<S: Store> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Verifies the submitted total, applies the coupon if any, persists the
    /// order and clears the purchased lines from the cart. All or nothing.
    pub async fn place_order(&self, request: PlaceOrder, member: &Member) -> Result<OrderView> {
        let mut tx = self.store.begin().await?;

        let products = Self::resolve_and_verify(&mut tx, &request).await?;
        let discounted = match request.coupon_id {
            None => request.total_amount,
            Some(coupon_id) => {
                Self::redeem_coupon(&mut tx, coupon_id, request.total_amount, member).await?
            }
        };

        let order = tx
            .save_order(
                NewOrder::new(
                    products,
                    request.total_amount,
                    discounted,
                    request.delivery_amount,
                    request.address.clone(),
                ),
                member.id,
            )
            .await?;

        for line in &request.lines {
            tx.delete_cart_item(member.id, line.product_id).await?;
        }
        tx.commit().await?;

        info!(
            order_id = %order.id,
            member_id = %member.id,
            total = order.total_amount.value(),
            discounted = order.discounted_amount.value(),
            "order placed"
        );

        Ok(Self::placed_view(&order, &request))
    }

    /// Resolves every line against the catalog, expands it into one product
    /// entry per unit and checks the recomputed sum against the submitted
    /// total.
    async fn resolve_and_verify(tx: &mut S::Tx, request: &PlaceOrder) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        let mut line_totals = Vec::new();
        for line in &request.lines {
            let product = tx
                .product_by_id(line.product_id)
                .await?
                .ok_or(CommerceError::ProductNotFound)?;
            line_totals.push(product.price.multiply(line.quantity.value()));
            for _ in 0..line.quantity.value() {
                products.push(product.clone());
            }
        }
        let expected = Amount::sum(line_totals);
        if expected != request.total_amount {
            return Err(CommerceError::PriceMismatch {
                submitted: request.total_amount.value(),
                expected: expected.value(),
            });
        }
        Ok(products)
    }

    /// Resolves the coupon scoped to its owner, persists the used state and
    /// returns the discounted total. The compound lookup is what enforces
    /// ownership.
    async fn redeem_coupon(
        tx: &mut S::Tx,
        coupon_id: Uuid,
        total: Amount,
        member: &Member,
    ) -> Result<Amount> {
        let coupon = tx
            .coupon_by_id_and_owner(coupon_id, member.id)
            .await?
            .ok_or(CommerceError::CouponNotFound)?;
        let used = coupon.redeem()?;
        tx.update_coupon(&used, member.id).await?;
        used.apply(total)
    }

    /// View of a freshly placed order: one entry per distinct product, with
    /// the quantity keyed by product id across all request lines.
    fn placed_view(order: &Order, request: &PlaceOrder) -> OrderView {
        let mut requested: HashMap<Uuid, u32> = HashMap::new();
        for line in &request.lines {
            *requested.entry(line.product_id).or_default() += line.quantity.value();
        }
        let products = order
            .distinct_products()
            .into_iter()
            .map(|product| OrderProductView {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price.value(),
                image_url: product.image_url.clone(),
                quantity: requested.get(&product.id).copied().unwrap_or_default(),
            })
            .collect();
        Self::view(order, products)
    }

    pub async fn find_order(&self, order_id: Uuid) -> Result<OrderView> {
        let mut tx = self.store.begin().await?;
        let order = tx.order_by_id(order_id).await?.ok_or(CommerceError::OrderNotFound)?;
        let products = Self::counted_products(&mut tx, &order).await?;
        Ok(Self::view(&order, products))
    }

    pub async fn find_orders(&self, member: &Member) -> Result<Vec<OrderSummaryView>> {
        let mut tx = self.store.begin().await?;
        let orders = tx.orders_by_member(member.id).await?;
        let mut summaries = Vec::with_capacity(orders.len());
        for order in &orders {
            summaries.push(OrderSummaryView {
                id: order.id,
                products: Self::counted_products(&mut tx, order).await?,
            });
        }
        Ok(summaries)
    }

    /// Per-product quantities recounted from the persisted order lines
    /// rather than the expanded list held in memory.
    async fn counted_products(tx: &mut S::Tx, order: &Order) -> Result<Vec<OrderProductView>> {
        let mut views = Vec::new();
        for product in order.distinct_products() {
            let quantity = tx.order_product_count(product.id, order.id).await?;
            views.push(OrderProductView {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price.value(),
                image_url: product.image_url.clone(),
                quantity,
            });
        }
        Ok(views)
    }

    fn view(order: &Order, products: Vec<OrderProductView>) -> OrderView {
        OrderView {
            id: order.id,
            total_amount: order.total_amount.value(),
            discounted_amount: order.discounted_amount.value(),
            delivery_amount: order.delivery_amount.value(),
            address: order.address.clone(),
            products,
        }
    }
}
