//! Result reconciler
//!
//! Maps Adyen responses onto [`PaymentPatch`]es for the host payment.

use crate::payments::host::{
    Payment, PaymentPatch, PaymentStatus, META_PAYMENT_SESSION, META_SDK_VERSION,
};
use crate::payments::types::{
    PaymentResponse, PaymentResultResponse, PaymentSessionResponse, ResultCode,
};
use tracing::{info, warn};

/// Host status for an Adyen result code. Unknown codes stay pending.
pub fn status_for(code: &ResultCode) -> PaymentStatus {
    match code {
        ResultCode::Authorised => PaymentStatus::Authorized,
        ResultCode::Refused => PaymentStatus::Refused,
        ResultCode::Cancelled => PaymentStatus::Cancelled,
        ResultCode::Error => PaymentStatus::Error,
        ResultCode::Pending
        | ResultCode::Received
        | ResultCode::RedirectShopper
        | ResultCode::IdentifyShopper
        | ResultCode::ChallengeShopper
        | ResultCode::PresentToShopper => PaymentStatus::Pending,
        ResultCode::Other(code) => {
            warn!("Unrecognised Adyen result code '{}', keeping payment pending", code);
            PaymentStatus::Pending
        }
    }
}

/// Outcome of a `/payments` call.
pub fn payment_created(response: &PaymentResponse) -> PaymentPatch {
    PaymentPatch {
        transaction_id: Some(response.psp_reference.clone()),
        action_url: response.redirect.as_ref().map(|redirect| redirect.url.clone()),
        ..Default::default()
    }
}

/// Outcome of a `/paymentSession` call.
///
/// No transaction id yet; it arrives with the result payload.
pub fn session_created(
    payment: &Payment,
    response: &PaymentSessionResponse,
    sdk_version: &str,
) -> PaymentPatch {
    let mut patch = PaymentPatch {
        action_url: payment.pay_redirect_url.clone(),
        ..Default::default()
    };
    patch
        .meta
        .insert(META_SDK_VERSION.to_string(), sdk_version.to_string());
    patch.meta.insert(
        META_PAYMENT_SESSION.to_string(),
        response.payment_session_token.clone(),
    );
    patch
}

/// Outcome of a decoded return payload.
///
/// A result for another merchant reference changes nothing.
pub fn update(payment: &Payment, result: &PaymentResultResponse) -> PaymentPatch {
    if result.merchant_reference != payment.id {
        warn!(
            "Ignoring result for merchant reference {} on payment {}",
            result.merchant_reference, payment.id
        );
        return PaymentPatch::default();
    }

    let status = status_for(&result.result_code);

    let mut patch = PaymentPatch {
        transaction_id: Some(result.psp_reference.clone()),
        ..Default::default()
    };

    if payment.status.is_terminal() && payment.status != status {
        warn!(
            "Ignoring result {} for payment {}: already {:?}",
            result.result_code, payment.id, payment.status
        );
        return patch;
    }

    info!(
        "Payment {} reconciled: psp_reference={}, result_code={}, status={:?}",
        payment.id, result.psp_reference, result.result_code, status
    );

    patch.status = Some(status);
    patch
}
