//! HTTP endpoints of the gateway service

pub mod health;
pub mod payments;

use crate::config::Config;
use crate::payments::traits::AdyenApi;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub adyen: Arc<dyn AdyenApi>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/payments/result", post(payments::payment_result))
        .route("/notifications", post(payments::notifications))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
