//! Cart endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::auth::AuthMember;
use super::AppState;
use crate::application::cart_service::CartItemView;
use crate::domain::value_objects::Quantity;
use crate::store::Store;
use crate::Result;

#[derive(Debug, Deserialize, Validate)]
pub struct CartItemRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: u32,
}

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
    member: AuthMember,
) -> Result<Json<Vec<CartItemView>>> {
    state.cart.cart_items(&member.0).await.map(Json)
}

pub async fn add<S: Store>(
    State(state): State<AppState<S>>,
    member: AuthMember,
    Json(request): Json<CartItemRequest>,
) -> Result<StatusCode> {
    request.validate()?;
    state
        .cart
        .add_cart_item(&member.0, request.product_id, Quantity::new(request.quantity)?)
        .await?;
    Ok(StatusCode::CREATED)
}

pub async fn remove<S: Store>(
    State(state): State<AppState<S>>,
    member: AuthMember,
    Path(product_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.cart.remove_cart_item(&member.0, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
