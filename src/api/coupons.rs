//! Coupon endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthMember;
use super::AppState;
use crate::application::coupon_service::{CouponDiscountView, CouponView, PossibleCouponView};
use crate::domain::value_objects::Amount;
use crate::store::Store;
use crate::Result;

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
    _member: AuthMember,
) -> Result<Json<Vec<CouponView>>> {
    state.coupons.find_all_coupons().await.map(Json)
}

pub async fn possible<S: Store>(
    State(state): State<AppState<S>>,
    member: AuthMember,
) -> Result<Json<Vec<PossibleCouponView>>> {
    state.coupons.find_possible_coupons(&member.0).await.map(Json)
}

#[derive(Debug, Deserialize)]
pub struct DiscountParams {
    pub total: i64,
}

pub async fn discount<S: Store>(
    State(state): State<AppState<S>>,
    _member: AuthMember,
    Path(id): Path<Uuid>,
    Query(params): Query<DiscountParams>,
) -> Result<Json<CouponDiscountView>> {
    state.coupons.calculate_discount(id, Amount::of(params.total)?).await.map(Json)
}
