//! Coupon listings and the standalone discount computation.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{Coupon, Member};
use crate::domain::value_objects::Amount;
use crate::store::{Store, StoreTx};
use crate::{CommerceError, Result};

#[derive(Clone, Debug, Serialize)]
pub struct CouponView {
    pub id: Uuid,
    pub name: String,
    pub min_amount: i64,
    pub discount_amount: i64,
    pub used: bool,
}

impl CouponView {
    fn from_coupon(coupon: &Coupon) -> Self {
        Self {
            id: coupon.id,
            name: coupon.name.clone(),
            min_amount: coupon.min_amount.value(),
            discount_amount: coupon.discount_amount.value(),
            used: coupon.used,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PossibleCouponView {
    pub id: Uuid,
    pub name: String,
    pub min_amount: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct CouponDiscountView {
    pub discounted_amount: i64,
}

#[derive(Clone)]
pub struct CouponService<S> {
    store: S,
}

impl<S: Store> CouponService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn find_all_coupons(&self) -> Result<Vec<CouponView>> {
        let mut tx = self.store.begin().await?;
        let coupons = tx.coupons().await?;
        Ok(coupons.iter().map(CouponView::from_coupon).collect())
    }

    /// Coupons the member can still spend.
    pub async fn find_possible_coupons(&self, member: &Member) -> Result<Vec<PossibleCouponView>> {
        let mut tx = self.store.begin().await?;
        let coupons = tx.unused_coupons_by_owner(member.id).await?;
        Ok(coupons
            .into_iter()
            .map(|c| PossibleCouponView {
                id: c.id,
                name: c.name,
                min_amount: c.min_amount.value(),
            })
            .collect())
    }

    /// What `total` becomes under the coupon. Pure computation: no state
    /// change, no ownership scoping.
    pub async fn calculate_discount(
        &self,
        coupon_id: Uuid,
        total: Amount,
    ) -> Result<CouponDiscountView> {
        let mut tx = self.store.begin().await?;
        let coupon = tx.coupon_by_id(coupon_id).await?.ok_or(CommerceError::CouponNotFound)?;
        Ok(CouponDiscountView { discounted_amount: coupon.apply(total)?.value() })
    }
}
