//! Order Aggregate

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::Amount;

/// Order ready to persist; the store assigns the identifier.
///
/// `products` holds one entry per unit purchased, in request order, so a
/// product bought in quantity 3 appears 3 times.
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub products: Vec<Product>,
    pub total_amount: Amount,
    pub discounted_amount: Amount,
    pub delivery_amount: Amount,
    pub address: String,
}

impl NewOrder {
    pub fn new(
        products: Vec<Product>,
        total_amount: Amount,
        discounted_amount: Amount,
        delivery_amount: Amount,
        address: String,
    ) -> Self {
        // Both construction paths keep the discounted amount at or under the
        // total; Amount itself forbids a negative difference.
        debug_assert!(discounted_amount <= total_amount);
        Self { products, total_amount, discounted_amount, delivery_amount, address }
    }
}

/// Persisted order. Amounts are fixed at creation time and never recomputed.
#[derive(Clone, Debug)]
pub struct Order {
    pub id: Uuid,
    pub products: Vec<Product>,
    pub total_amount: Amount,
    pub discounted_amount: Amount,
    pub delivery_amount: Amount,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Distinct purchased products in first-occurrence order.
    pub fn distinct_products(&self) -> Vec<&Product> {
        let mut seen = Vec::new();
        let mut distinct: Vec<&Product> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.id) {
                seen.push(product.id);
                distinct.push(product);
            }
        }
        distinct
    }
}
