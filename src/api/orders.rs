//! Order endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::auth::AuthMember;
use super::AppState;
use crate::application::order_service::{OrderLine, OrderSummaryView, OrderView, PlaceOrder};
use crate::domain::value_objects::{Amount, Quantity};
use crate::store::Store;
use crate::Result;

#[derive(Debug, Deserialize, Validate)]
pub struct OrderRequest {
    #[validate]
    pub products: Vec<OrderLineRequest>,
    #[validate(range(min = 0))]
    pub total_product_amount: i64,
    #[validate(range(min = 0))]
    pub delivery_amount: i64,
    #[validate(length(min = 1))]
    pub address: String,
    pub coupon_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: u32,
}

pub async fn create<S: Store>(
    State(state): State<AppState<S>>,
    member: AuthMember,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderView>)> {
    request.validate()?;
    let lines = request
        .products
        .iter()
        .map(|line| {
            Ok(OrderLine {
                product_id: line.product_id,
                quantity: Quantity::new(line.quantity)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let place = PlaceOrder {
        lines,
        total_amount: Amount::of(request.total_product_amount)?,
        delivery_amount: Amount::of(request.delivery_amount)?,
        address: request.address,
        coupon_id: request.coupon_id,
    };
    let view = state.orders.place_order(place, &member.0).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_by_id<S: Store>(
    State(state): State<AppState<S>>,
    _member: AuthMember,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderView>> {
    state.orders.find_order(id).await.map(Json)
}

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
    member: AuthMember,
) -> Result<Json<Vec<OrderSummaryView>>> {
    state.orders.find_orders(&member.0).await.map(Json)
}
