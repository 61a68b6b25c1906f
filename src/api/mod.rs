//! HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::cart_service::CartService;
use crate::application::catalog_service::CatalogService;
use crate::application::coupon_service::CouponService;
use crate::application::order_service::OrderService;
use crate::store::Store;
use crate::CommerceError;

pub mod auth;
pub mod cart;
pub mod coupons;
pub mod orders;
pub mod products;

#[derive(Clone)]
pub struct AppState<S: Store> {
    pub orders: OrderService<S>,
    pub coupons: CouponService<S>,
    pub catalog: CatalogService<S>,
    pub cart: CartService<S>,
    pub store: S,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            orders: OrderService::new(store.clone()),
            coupons: CouponService::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            cart: CartService::new(store.clone()),
            store,
        }
    }
}

pub fn router<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/products", get(products::list).post(products::create))
        .route("/api/v1/products/:id", get(products::get_by_id))
        .route("/api/v1/cart", get(cart::list).post(cart::add))
        .route("/api/v1/cart/:product_id", delete(cart::remove))
        .route("/api/v1/coupons", get(coupons::list))
        .route("/api/v1/coupons/possible", get(coupons::possible))
        .route("/api/v1/coupons/:id/discount", get(coupons::discount))
        .route("/api/v1/orders", get(orders::list).post(orders::create))
        .route("/api/v1/orders/:id", get(orders::get_by_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy", "service": "cartify"}))
}

impl IntoResponse for CommerceError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Storage(_)) {
            tracing::error!(error = %self, "request failed");
        }
        let status = match &self {
            Self::ProductNotFound | Self::CouponNotFound | Self::OrderNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        // Storage detail stays out of the response body
        let message = match &self {
            Self::Storage(_) => "internal server error".to_string(),
            _ => self.to_string(),
        };
        (status, Json(serde_json::json!({"message": message}))).into_response()
    }
}
