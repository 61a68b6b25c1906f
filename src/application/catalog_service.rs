//! Product catalog reads and creation.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::Amount;
use crate::store::{Store, StoreTx};
use crate::{CommerceError, Result};

#[derive(Clone, Debug, Serialize)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
}

impl ProductView {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.value(),
            image_url: product.image_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CatalogService<S> {
    store: S,
}

impl<S: Store> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn products(&self) -> Result<Vec<ProductView>> {
        let mut tx = self.store.begin().await?;
        let products = tx.products().await?;
        Ok(products.iter().map(ProductView::from_product).collect())
    }

    pub async fn product(&self, id: Uuid) -> Result<ProductView> {
        let mut tx = self.store.begin().await?;
        let product = tx.product_by_id(id).await?.ok_or(CommerceError::ProductNotFound)?;
        Ok(ProductView::from_product(&product))
    }

    pub async fn create_product(
        &self,
        name: &str,
        price: Amount,
        image_url: &str,
    ) -> Result<ProductView> {
        let mut tx = self.store.begin().await?;
        let product = tx.insert_product(name, price, image_url).await?;
        tx.commit().await?;
        Ok(ProductView::from_product(&product))
    }
}
