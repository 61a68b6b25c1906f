//! Value objects for order pricing.

use std::fmt;

use crate::{CommerceError, Result};

/// Money value object: an exact amount in currency minor units, never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn of(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(CommerceError::NegativeAmount);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i64 { self.0 }

    pub fn add(self, other: Amount) -> Amount { Amount(self.0 + other.0) }

    pub fn multiply(self, quantity: u32) -> Amount { Amount(self.0 * i64::from(quantity)) }

    pub fn sum(amounts: impl IntoIterator<Item = Amount>) -> Amount {
        amounts.into_iter().fold(Amount::ZERO, Amount::add)
    }

    /// Exact subtraction; `None` when the result would fall below zero.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        if other.0 > self.0 {
            return None;
        }
        Some(Amount(self.0 - other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Quantity value object: a positive purchase count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(CommerceError::ZeroQuantity);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 { self.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rejects_negative() {
        assert!(matches!(Amount::of(-1), Err(CommerceError::NegativeAmount)));
        assert_eq!(Amount::of(0).unwrap().value(), 0);
    }

    #[test]
    fn test_amount_arithmetic() {
        let a = Amount::of(5000).unwrap();
        let b = Amount::of(3000).unwrap();
        assert_eq!(a.add(b).value(), 8000);
        assert_eq!(a.multiply(2).value(), 10000);
        assert_eq!(Amount::sum([a.multiply(2), b]).value(), 13000);
    }

    #[test]
    fn test_amount_subtraction_never_goes_negative() {
        let a = Amount::of(1000).unwrap();
        let b = Amount::of(1500).unwrap();
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(b.checked_sub(a).unwrap().value(), 500);
        assert_eq!(a.checked_sub(a).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert!(matches!(Quantity::new(0), Err(CommerceError::ZeroQuantity)));
        assert_eq!(Quantity::new(3).unwrap().value(), 3);
    }
}
