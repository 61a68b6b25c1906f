//! Cart line

use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::Quantity;

/// One product in a member's cart, joined to its current catalog entry.
#[derive(Clone, Debug)]
pub struct CartItem {
    pub product: Product,
    pub quantity: Quantity,
}
