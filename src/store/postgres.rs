//! Postgres-backed store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{Store, StoreTx};
use crate::domain::aggregates::{CartItem, Coupon, Member, NewOrder, Order, Product};
use crate::domain::value_objects::{Amount, Quantity};
use crate::Result;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    type Tx = PgTx;

    async fn begin(&self) -> Result<PgTx> {
        Ok(PgTx { tx: self.pool.begin().await? })
    }
}

pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: i64,
    image_url: String,
}

impl ProductRow {
    fn into_product(self) -> Result<Product> {
        Ok(Product {
            id: self.id,
            name: self.name,
            price: Amount::of(self.price)?,
            image_url: self.image_url,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CouponRow {
    id: Uuid,
    name: String,
    min_amount: i64,
    discount_amount: i64,
    used: bool,
}

impl CouponRow {
    fn into_coupon(self) -> Result<Coupon> {
        Ok(Coupon {
            id: self.id,
            name: self.name,
            min_amount: Amount::of(self.min_amount)?,
            discount_amount: Amount::of(self.discount_amount)?,
            used: self.used,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    total_amount: i64,
    discounted_amount: i64,
    delivery_amount: i64,
    address: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, products: Vec<Product>) -> Result<Order> {
        Ok(Order {
            id: self.id,
            products,
            total_amount: Amount::of(self.total_amount)?,
            discounted_amount: Amount::of(self.discounted_amount)?,
            delivery_amount: Amount::of(self.delivery_amount)?,
            address: self.address,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CartRow {
    product_id: Uuid,
    name: String,
    price: i64,
    image_url: String,
    quantity: i32,
}

impl PgTx {
    /// Snapshot rows for one order, expanded one row per unit, in purchase order.
    async fn order_products(&mut self, order_id: Uuid) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT product_id AS id, name, price, image_url FROM order_products \
             WHERE order_id = $1 ORDER BY seq",
        )
        .bind(order_id)
        .fetch_all(&mut *self.tx)
        .await?;
        rows.into_iter().map(ProductRow::into_product).collect()
    }
}

#[async_trait]
impl StoreTx for PgTx {
    async fn product_by_id(&mut self, id: Uuid) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, image_url FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.map(ProductRow::into_product).transpose()
    }

    async fn products(&mut self) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, image_url FROM products ORDER BY created_at DESC",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn insert_product(
        &mut self,
        name: &str,
        price: Amount,
        image_url: &str,
    ) -> Result<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products (id, name, price, image_url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) RETURNING id, name, price, image_url",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(price.value())
        .bind(image_url)
        .fetch_one(&mut *self.tx)
        .await?;
        row.into_product()
    }

    async fn member_by_credentials(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, (Uuid, String, String)>(
            "SELECT id, email, password FROM members WHERE email = $1 AND password = $2",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(member.map(|(id, email, password)| Member { id, email, password }))
    }

    async fn coupon_by_id(&mut self, id: Uuid) -> Result<Option<Coupon>> {
        let row = sqlx::query_as::<_, CouponRow>(
            "SELECT id, name, min_amount, discount_amount, used FROM coupons WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.map(CouponRow::into_coupon).transpose()
    }

    async fn coupon_by_id_and_owner(
        &mut self,
        id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<Coupon>> {
        let row = sqlx::query_as::<_, CouponRow>(
            "SELECT id, name, min_amount, discount_amount, used FROM coupons \
             WHERE id = $1 AND member_id = $2",
        )
        .bind(id)
        .bind(member_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.map(CouponRow::into_coupon).transpose()
    }

    async fn coupons(&mut self) -> Result<Vec<Coupon>> {
        let rows = sqlx::query_as::<_, CouponRow>(
            "SELECT id, name, min_amount, discount_amount, used FROM coupons \
             ORDER BY created_at",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        rows.into_iter().map(CouponRow::into_coupon).collect()
    }

    async fn unused_coupons_by_owner(&mut self, member_id: Uuid) -> Result<Vec<Coupon>> {
        let rows = sqlx::query_as::<_, CouponRow>(
            "SELECT id, name, min_amount, discount_amount, used FROM coupons \
             WHERE member_id = $1 AND used = FALSE ORDER BY created_at",
        )
        .bind(member_id)
        .fetch_all(&mut *self.tx)
        .await?;
        rows.into_iter().map(CouponRow::into_coupon).collect()
    }

    async fn update_coupon(&mut self, coupon: &Coupon, member_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE coupons SET used = $3 WHERE id = $1 AND member_id = $2")
            .bind(coupon.id)
            .bind(member_id)
            .bind(coupon.used)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn save_order(&mut self, order: NewOrder, member_id: Uuid) -> Result<Order> {
        let id = Uuid::now_v7();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO orders (id, member_id, total_amount, discounted_amount, \
             delivery_amount, address, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW()) RETURNING created_at",
        )
        .bind(id)
        .bind(member_id)
        .bind(order.total_amount.value())
        .bind(order.discounted_amount.value())
        .bind(order.delivery_amount.value())
        .bind(&order.address)
        .fetch_one(&mut *self.tx)
        .await?;

        for (seq, product) in order.products.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_products (id, order_id, product_id, seq, name, price, image_url) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(Uuid::now_v7())
            .bind(id)
            .bind(product.id)
            .bind(seq as i32)
            .bind(&product.name)
            .bind(product.price.value())
            .bind(&product.image_url)
            .execute(&mut *self.tx)
            .await?;
        }

        Ok(Order {
            id,
            products: order.products,
            total_amount: order.total_amount,
            discounted_amount: order.discounted_amount,
            delivery_amount: order.delivery_amount,
            address: order.address,
            created_at,
        })
    }

    async fn order_by_id(&mut self, id: Uuid) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, total_amount, discounted_amount, delivery_amount, address, created_at \
             FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        match row {
            None => Ok(None),
            Some(row) => {
                let products = self.order_products(row.id).await?;
                Ok(Some(row.into_order(products)?))
            }
        }
    }

    async fn orders_by_member(&mut self, member_id: Uuid) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, total_amount, discounted_amount, delivery_amount, address, created_at \
             FROM orders WHERE member_id = $1 ORDER BY created_at",
        )
        .bind(member_id)
        .fetch_all(&mut *self.tx)
        .await?;
        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let products = self.order_products(row.id).await?;
            orders.push(row.into_order(products)?);
        }
        Ok(orders)
    }

    async fn order_product_count(&mut self, product_id: Uuid, order_id: Uuid) -> Result<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM order_products WHERE product_id = $1 AND order_id = $2",
        )
        .bind(product_id)
        .bind(order_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(count as u32)
    }

    async fn cart_items_by_member(&mut self, member_id: Uuid) -> Result<Vec<CartItem>> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT p.id AS product_id, p.name, p.price, p.image_url, c.quantity \
             FROM cart_items c JOIN products p ON p.id = c.product_id \
             WHERE c.member_id = $1 ORDER BY c.created_at",
        )
        .bind(member_id)
        .fetch_all(&mut *self.tx)
        .await?;
        rows.into_iter()
            .map(|row| {
                Ok(CartItem {
                    product: Product {
                        id: row.product_id,
                        name: row.name,
                        price: Amount::of(row.price)?,
                        image_url: row.image_url,
                    },
                    quantity: Quantity::new(row.quantity as u32)?,
                })
            })
            .collect()
    }

    async fn upsert_cart_item(
        &mut self,
        member_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO cart_items (member_id, product_id, quantity, created_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (member_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + $3",
        )
        .bind(member_id)
        .bind(product_id)
        .bind(quantity.value() as i32)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn delete_cart_item(&mut self, member_id: Uuid, product_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM cart_items WHERE member_id = $1 AND product_id = $2")
            .bind(member_id)
            .bind(product_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
