//! Product endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::AppState;
use crate::application::catalog_service::ProductView;
use crate::domain::value_objects::Amount;
use crate::store::Store;
use crate::Result;

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ProductView>>> {
    state.catalog.products().await.map(Json)
}

pub async fn get_by_id<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductView>> {
    state.catalog.product(id).await.map(Json)
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub image_url: Option<String>,
}

pub async fn create<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductView>)> {
    request.validate()?;
    let view = state
        .catalog
        .create_product(
            &request.name,
            Amount::of(request.price)?,
            request.image_url.as_deref().unwrap_or(""),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}
