use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub adyen_environment: String,
    pub merchant_configured: bool,
    pub checked_at: String,
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let config = &state.config;

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.server.environment.clone(),
        adyen_environment: config.adyen.environment.as_str().to_string(),
        merchant_configured: !config.adyen.merchant_account.trim().is_empty()
            && !config.adyen.api_key.trim().is_empty(),
        checked_at: chrono::Utc::now().to_rfc3339(),
    };

    Ok(Json(response))
}
