//! Adyen gateway
//!
//! Entry points the host framework calls: starting a payment, reconciling
//! the shopper's return, listing methods and issuers, and the configuration
//! the browser checkout needs for session payments.

use crate::error::GatewayResult;
use crate::payments::builder::RequestBuilder;
use crate::payments::host::{
    HostEnvironment, Payment, PaymentPatch, META_PAYMENT_SESSION, META_SDK_VERSION,
};
use crate::payments::methods::{MethodTag, PaymentMethodType};
use crate::payments::reconciler;
use crate::payments::traits::AdyenApi;
use crate::payments::types::{PaymentRequest, PaymentResultRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Version of the Adyen Checkout Web SDK rendered for session payments.
pub const SDK_VERSION: &str = "1.9.2";

/// Query parameters of the shopper's return request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnParams {
    pub payload: Option<String>,
}

/// Issuers grouped the way the host renders a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuerGroup {
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutContext {
    pub context: String,
}

/// Data for the browser checkout script of a session payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    pub sdk_script_url: String,
    pub payments_result_url: String,
    pub payment_return_url: String,
    pub payment_session: String,
    pub config_object: CheckoutContext,
}

pub struct Gateway {
    api: Arc<dyn AdyenApi>,
    host: Arc<dyn HostEnvironment>,
    builder: RequestBuilder,
}

impl Gateway {
    pub fn new(
        api: Arc<dyn AdyenApi>,
        host: Arc<dyn HostEnvironment>,
        merchant_account: impl Into<String>,
    ) -> Self {
        Self {
            api,
            host,
            builder: RequestBuilder::new(merchant_account, SDK_VERSION),
        }
    }

    pub fn supported_payment_methods(&self) -> &'static [MethodTag] {
        &MethodTag::SUPPORTED
    }

    /// Start a payment.
    ///
    /// On error nothing is returned to apply, so the payment keeps its
    /// prior state.
    pub async fn start(&self, payment: &Payment) -> GatewayResult<PaymentPatch> {
        let request = self.builder.build(payment, self.host.as_ref()).map_err(|e| {
            error!("Unable to build Adyen request for payment {}: {}", payment.id, e);
            e
        })?;

        match request {
            PaymentRequest::Api(request) => {
                let response = self.api.create_payment(&request).await?;
                Ok(reconciler::payment_created(&response))
            }
            PaymentRequest::Session(request) => {
                let response = self.api.create_payment_session(&request).await?;
                Ok(reconciler::session_created(
                    payment,
                    &response,
                    self.builder.sdk_version(),
                ))
            }
        }
    }

    /// Reconcile the shopper's return.
    ///
    /// Never fails: without a `payload` nothing happens, and a failed result
    /// call only adds a note.
    pub async fn update_status(&self, payment: &Payment, params: &ReturnParams) -> PaymentPatch {
        let Some(payload) = params.payload.as_deref().filter(|p| !p.is_empty()) else {
            return PaymentPatch::default();
        };

        let request = PaymentResultRequest::new(payload);

        match self.api.get_payment_result(&request).await {
            Ok(result) => reconciler::update(payment, &result),
            Err(e) => {
                error!("Error getting payment result for payment {}: {}", payment.id, e);
                PaymentPatch::default().with_note(format!("Error getting payment result: {}", e))
            }
        }
    }

    /// Host methods the merchant account has enabled, in listing order.
    pub async fn get_available_payment_methods(&self) -> GatewayResult<Vec<MethodTag>> {
        let methods = self.api.get_payment_methods().await?;

        let mut tags = Vec::new();
        for method in &methods {
            match PaymentMethodType::from_provider(&method.method_type) {
                Some(method_type) => {
                    let tag = method_type.to_host();
                    if !tags.contains(&tag) {
                        tags.push(tag);
                    }
                }
                None => warn!("Skipping unmapped Adyen payment method '{}'", method.method_type),
            }
        }

        Ok(tags)
    }

    /// iDEAL issuers offered by the merchant account.
    pub async fn get_issuers(&self) -> GatewayResult<Vec<IssuerGroup>> {
        let methods = self.api.get_payment_methods().await?;

        let options: BTreeMap<String, String> = methods
            .iter()
            .filter(|method| method.method_type == PaymentMethodType::Ideal.as_str())
            .flat_map(|method| method.details.iter().flatten())
            .filter(|detail| detail.key == "issuer" && detail.detail_type == "select")
            .flat_map(|detail| detail.items.iter())
            .map(|item| (item.id.clone(), item.name.clone()))
            .collect();

        if options.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![IssuerGroup { options }])
    }

    /// Checkout configuration for a started session payment.
    pub fn checkout_config(&self, payment: &Payment) -> Option<CheckoutConfig> {
        let sdk_version = payment.meta(META_SDK_VERSION)?;
        let payment_session = payment.meta(META_PAYMENT_SESSION)?;
        let context = payment.mode.context();

        info!("Rendering Adyen checkout for payment {}", payment.id);

        Some(CheckoutConfig {
            sdk_script_url: format!(
                "https://checkoutshopper-{}.adyen.com/checkoutshopper/assets/js/sdk/checkoutSDK.{}.min.js",
                context, sdk_version
            ),
            payments_result_url: self.host.payments_result_url(),
            payment_return_url: payment.return_url.clone(),
            payment_session: payment_session.to_string(),
            config_object: CheckoutContext {
                context: context.to_string(),
            },
        })
    }
}
