//! Cartify - shopping cart checkout and order service
//!
//! Prices a submitted cart against the live catalog, rejects stale or
//! tampered totals, applies at most one coupon per order and persists the
//! result atomically.
//!
//! ## Features
//! - Product catalog reads
//! - Shopping cart management
//! - Checkout with server-side price verification
//! - Single-use coupon discounts
//! - Order history

use thiserror::Error;

pub mod api;
pub mod application;
pub mod domain;
pub mod store;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum CommerceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("coupon not found")]
    CouponNotFound,

    #[error("order not found")]
    OrderNotFound,

    #[error("submitted total {submitted} does not match the current product total {expected}")]
    PriceMismatch { submitted: i64, expected: i64 },

    #[error("order total {total} is below the coupon minimum {min}")]
    CouponBelowMinimum { total: i64, min: i64 },

    #[error("coupon has already been used")]
    CouponAlreadyUsed,

    #[error("coupon discount {discount} exceeds the order total {total}")]
    CouponExceedsTotal { discount: i64, total: i64 },

    #[error("amount cannot be negative")]
    NegativeAmount,

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("invalid credentials")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, CommerceError>;
