use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::AppState;
use crate::error::GatewayError;
use crate::payments::host::PaymentStatus;
use crate::payments::notifications::{verify_signature, NotificationItem, NotificationRequest};
use crate::payments::providers::AdyenEnvironment;
use crate::payments::reconciler;
use crate::payments::types::{PaymentResultRequest, ResultCode};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResultBody {
    pub psp_reference: String,
    pub result_code: ResultCode,
    pub merchant_reference: String,
    pub status: PaymentStatus,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_status(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::InvalidAmount { .. } | GatewayError::InvalidRequest { .. } => {
            StatusCode::BAD_REQUEST
        }
        GatewayError::Transport { .. } => StatusCode::GATEWAY_TIMEOUT,
        GatewayError::Api { status, .. } if *status == 422 => StatusCode::UNPROCESSABLE_ENTITY,
        GatewayError::Api { .. } | GatewayError::Decode { .. } => StatusCode::BAD_GATEWAY,
        GatewayError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Decode the payload the checkout SDK returns after payment.
pub async fn payment_result(
    State(state): State<AppState>,
    Json(request): Json<PaymentResultRequest>,
) -> Result<Json<PaymentResultBody>, (StatusCode, Json<ErrorBody>)> {
    if request.payload.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "payload is required".to_string(),
            }),
        ));
    }

    let result = state.adyen.get_payment_result(&request).await.map_err(|e| {
        error!("Payment result lookup failed: {}", e);
        (error_status(&e), Json(ErrorBody { error: e.to_string() }))
    })?;

    let status = reconciler::status_for(&result.result_code);

    Ok(Json(PaymentResultBody {
        psp_reference: result.psp_reference,
        result_code: result.result_code,
        merchant_reference: result.merchant_reference,
        status,
    }))
}

/// Check an item's HMAC signature. Without a key, test notifications pass
/// unverified and live ones are refused.
fn authenticate(
    item: &NotificationItem,
    hmac_key: Option<&str>,
    environment: AdyenEnvironment,
) -> Result<(), (StatusCode, &'static str)> {
    let Some(key) = hmac_key else {
        if environment == AdyenEnvironment::Live {
            error!(
                "Rejecting live notification without a configured HMAC key: psp_reference={}",
                item.psp_reference
            );
            return Err((StatusCode::UNAUTHORIZED, "HMAC key not configured"));
        }
        warn!(
            "Accepting unverified notification, no HMAC key configured: psp_reference={}",
            item.psp_reference
        );
        return Ok(());
    };

    match verify_signature(item, key) {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(
                "Rejecting notification with invalid signature: psp_reference={}",
                item.psp_reference
            );
            Err((StatusCode::UNAUTHORIZED, "invalid signature"))
        }
        Err(e) => {
            error!("Cannot verify notification signature: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "invalid HMAC key"))
        }
    }
}

/// Receive standard notifications, answering `[accepted]` once verified.
pub async fn notifications(
    State(state): State<AppState>,
    Json(request): Json<NotificationRequest>,
) -> impl IntoResponse {
    let hmac_key = state.config.adyen.hmac_key.as_deref();
    let environment = state.config.adyen.environment;

    for wrapper in &request.notification_items {
        let item = &wrapper.item;

        if let Err(rejection) = authenticate(item, hmac_key, environment) {
            return rejection;
        }

        info!(
            "Adyen notification: event={}, success={}, merchant_reference={}, psp_reference={}, status={:?}",
            item.event_code,
            item.success,
            item.merchant_reference,
            item.psp_reference,
            item.authorisation_status()
        );
    }

    (StatusCode::OK, "[accepted]")
}
