//! In-memory store used by the service tests.
//!
//! A transaction stages a copy of the shared state and publishes it on
//! commit, so a failed operation must leave no observable side effect —
//! which is exactly what the checkout tests assert.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{Store, StoreTx};
use crate::domain::aggregates::{CartItem, Coupon, Member, NewOrder, Order, Product};
use crate::domain::value_objects::{Amount, Quantity};
use crate::Result;

#[derive(Clone, Default)]
struct State {
    members: Vec<Member>,
    products: Vec<Product>,
    /// (owner, coupon)
    coupons: Vec<(Uuid, Coupon)>,
    /// (owner, order)
    orders: Vec<(Uuid, Order)>,
    /// (member, product, quantity)
    cart: Vec<(Uuid, Uuid, u32)>,
}

#[derive(Clone, Default)]
pub struct MemStore {
    state: Arc<Mutex<State>>,
}

impl MemStore {
    pub fn seed_member(&self, email: &str, password: &str) -> Member {
        let member = Member { id: Uuid::new_v4(), email: email.into(), password: password.into() };
        self.state.lock().unwrap().members.push(member.clone());
        member
    }

    pub fn seed_product(&self, name: &str, price: i64, image_url: &str) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            name: name.into(),
            price: Amount::of(price).unwrap(),
            image_url: image_url.into(),
        };
        self.state.lock().unwrap().products.push(product.clone());
        product
    }

    pub fn seed_coupon(&self, member_id: Uuid, name: &str, min: i64, discount: i64) -> Coupon {
        let coupon = Coupon {
            id: Uuid::new_v4(),
            name: name.into(),
            min_amount: Amount::of(min).unwrap(),
            discount_amount: Amount::of(discount).unwrap(),
            used: false,
        };
        self.state.lock().unwrap().coupons.push((member_id, coupon.clone()));
        coupon
    }

    pub fn seed_cart_item(&self, member_id: Uuid, product_id: Uuid, quantity: u32) {
        self.state.lock().unwrap().cart.push((member_id, product_id, quantity));
    }

    pub fn mark_coupon_used(&self, id: Uuid) {
        let mut state = self.state.lock().unwrap();
        let (_, coupon) = state.coupons.iter_mut().find(|(_, c)| c.id == id).unwrap();
        coupon.used = true;
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    pub fn coupon(&self, id: Uuid) -> Option<Coupon> {
        self.state.lock().unwrap().coupons.iter().find(|(_, c)| c.id == id).map(|(_, c)| c.clone())
    }

    pub fn cart_len(&self, member_id: Uuid) -> usize {
        self.state.lock().unwrap().cart.iter().filter(|(m, _, _)| *m == member_id).count()
    }

    pub fn set_product_price(&self, id: Uuid, price: i64) {
        let mut state = self.state.lock().unwrap();
        let product = state.products.iter_mut().find(|p| p.id == id).unwrap();
        product.price = Amount::of(price).unwrap();
    }
}

#[async_trait]
impl Store for MemStore {
    type Tx = MemTx;

    async fn begin(&self) -> Result<MemTx> {
        let work = self.state.lock().unwrap().clone();
        Ok(MemTx { shared: Arc::clone(&self.state), work })
    }
}

pub struct MemTx {
    shared: Arc<Mutex<State>>,
    work: State,
}

#[async_trait]
impl StoreTx for MemTx {
    async fn product_by_id(&mut self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.work.products.iter().find(|p| p.id == id).cloned())
    }

    async fn products(&mut self) -> Result<Vec<Product>> {
        Ok(self.work.products.clone())
    }

    async fn insert_product(
        &mut self,
        name: &str,
        price: Amount,
        image_url: &str,
    ) -> Result<Product> {
        let product =
            Product { id: Uuid::new_v4(), name: name.into(), price, image_url: image_url.into() };
        self.work.products.push(product.clone());
        Ok(product)
    }

    async fn member_by_credentials(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Option<Member>> {
        Ok(self
            .work
            .members
            .iter()
            .find(|m| m.email == email && m.password == password)
            .cloned())
    }

    async fn coupon_by_id(&mut self, id: Uuid) -> Result<Option<Coupon>> {
        Ok(self.work.coupons.iter().find(|(_, c)| c.id == id).map(|(_, c)| c.clone()))
    }

    async fn coupon_by_id_and_owner(
        &mut self,
        id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<Coupon>> {
        Ok(self
            .work
            .coupons
            .iter()
            .find(|(owner, c)| c.id == id && *owner == member_id)
            .map(|(_, c)| c.clone()))
    }

    async fn coupons(&mut self) -> Result<Vec<Coupon>> {
        Ok(self.work.coupons.iter().map(|(_, c)| c.clone()).collect())
    }

    async fn unused_coupons_by_owner(&mut self, member_id: Uuid) -> Result<Vec<Coupon>> {
        Ok(self
            .work
            .coupons
            .iter()
            .filter(|(owner, c)| *owner == member_id && !c.used)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn update_coupon(&mut self, coupon: &Coupon, member_id: Uuid) -> Result<()> {
        for (owner, stored) in &mut self.work.coupons {
            if stored.id == coupon.id && *owner == member_id {
                *stored = coupon.clone();
            }
        }
        Ok(())
    }

    async fn save_order(&mut self, order: NewOrder, member_id: Uuid) -> Result<Order> {
        let saved = Order {
            id: Uuid::new_v4(),
            products: order.products,
            total_amount: order.total_amount,
            discounted_amount: order.discounted_amount,
            delivery_amount: order.delivery_amount,
            address: order.address,
            created_at: Utc::now(),
        };
        self.work.orders.push((member_id, saved.clone()));
        Ok(saved)
    }

    async fn order_by_id(&mut self, id: Uuid) -> Result<Option<Order>> {
        Ok(self.work.orders.iter().find(|(_, o)| o.id == id).map(|(_, o)| o.clone()))
    }

    async fn orders_by_member(&mut self, member_id: Uuid) -> Result<Vec<Order>> {
        Ok(self
            .work
            .orders
            .iter()
            .filter(|(owner, _)| *owner == member_id)
            .map(|(_, o)| o.clone())
            .collect())
    }

    async fn order_product_count(&mut self, product_id: Uuid, order_id: Uuid) -> Result<u32> {
        Ok(self
            .work
            .orders
            .iter()
            .find(|(_, o)| o.id == order_id)
            .map(|(_, o)| o.products.iter().filter(|p| p.id == product_id).count() as u32)
            .unwrap_or(0))
    }

    async fn cart_items_by_member(&mut self, member_id: Uuid) -> Result<Vec<CartItem>> {
        let mut items = Vec::new();
        for (member, product_id, quantity) in &self.work.cart {
            if *member != member_id {
                continue;
            }
            let product = self
                .work
                .products
                .iter()
                .find(|p| p.id == *product_id)
                .cloned()
                .expect("cart entry references a seeded product");
            items.push(CartItem { product, quantity: Quantity::new(*quantity)? });
        }
        Ok(items)
    }

    async fn upsert_cart_item(
        &mut self,
        member_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<()> {
        for (member, product, stored) in &mut self.work.cart {
            if *member == member_id && *product == product_id {
                *stored += quantity.value();
                return Ok(());
            }
        }
        self.work.cart.push((member_id, product_id, quantity.value()));
        Ok(())
    }

    async fn delete_cart_item(&mut self, member_id: Uuid, product_id: Uuid) -> Result<()> {
        self.work.cart.retain(|(member, product, _)| !(*member == member_id && *product == product_id));
        Ok(())
    }

    async fn commit(self) -> Result<()> {
        *self.shared.lock().unwrap() = self.work;
        Ok(())
    }
}
