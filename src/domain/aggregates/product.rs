//! Product snapshot

use uuid::Uuid;

use crate::domain::value_objects::Amount;

/// Catalog product as priced at lookup time. Orders keep their own copy so
/// later catalog changes never alter what was sold.
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Amount,
    pub image_url: String,
}
