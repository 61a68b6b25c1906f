//! Coupon Aggregate

use uuid::Uuid;

use crate::domain::value_objects::Amount;
use crate::{CommerceError, Result};

/// Single-use discount owned by exactly one member.
#[derive(Clone, Debug)]
pub struct Coupon {
    pub id: Uuid,
    pub name: String,
    pub min_amount: Amount,
    pub discount_amount: Amount,
    pub used: bool,
}

impl Coupon {
    /// Marks the coupon used, producing the new value for the caller to
    /// persist. A coupon transitions to used exactly once.
    pub fn redeem(self) -> Result<Coupon> {
        if self.used {
            return Err(CommerceError::CouponAlreadyUsed);
        }
        Ok(Coupon { used: true, ..self })
    }

    /// Discounted total for `total`. The minimum-amount floor is a hard
    /// error, as is a discount larger than the total itself.
    pub fn apply(&self, total: Amount) -> Result<Amount> {
        if total < self.min_amount {
            return Err(CommerceError::CouponBelowMinimum {
                total: total.value(),
                min: self.min_amount.value(),
            });
        }
        total
            .checked_sub(self.discount_amount)
            .ok_or(CommerceError::CouponExceedsTotal {
                discount: self.discount_amount.value(),
                total: total.value(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(min: i64, discount: i64) -> Coupon {
        Coupon {
            id: Uuid::new_v4(),
            name: "welcome".into(),
            min_amount: Amount::of(min).unwrap(),
            discount_amount: Amount::of(discount).unwrap(),
            used: false,
        }
    }

    #[test]
    fn test_apply_above_minimum() {
        let c = coupon(10_000, 1_000);
        assert_eq!(c.apply(Amount::of(30_000).unwrap()).unwrap().value(), 29_000);
    }

    #[test]
    fn test_apply_exactly_at_minimum() {
        let c = coupon(10_000, 1_000);
        assert_eq!(c.apply(Amount::of(10_000).unwrap()).unwrap().value(), 9_000);
    }

    #[test]
    fn test_apply_below_minimum_is_an_error() {
        let c = coupon(10_000, 1_000);
        assert!(matches!(
            c.apply(Amount::of(8_000).unwrap()),
            Err(CommerceError::CouponBelowMinimum { total: 8_000, min: 10_000 })
        ));
    }

    #[test]
    fn test_apply_discount_larger_than_total_is_an_error() {
        // min_amount and discount_amount are independent fields
        let c = coupon(100, 5_000);
        assert!(matches!(
            c.apply(Amount::of(3_000).unwrap()),
            Err(CommerceError::CouponExceedsTotal { discount: 5_000, total: 3_000 })
        ));
    }

    #[test]
    fn test_redeem_flips_used() {
        let used = coupon(1_000, 500).redeem().unwrap();
        assert!(used.used);
    }

    #[test]
    fn test_redeem_twice_fails() {
        let used = coupon(1_000, 500).redeem().unwrap();
        assert!(matches!(used.redeem(), Err(CommerceError::CouponAlreadyUsed)));
    }
}
